use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use pager_core::QueryId;
use pager_logging::{pager_debug, pager_warn};
use tokio_util::sync::CancellationToken;

use crate::query::{ChannelFindCallback, PagedQuery};
use crate::{Completion, LoaderError};

enum ExecutorCommand<T> {
    Find {
        query_id: QueryId,
        query: Arc<dyn PagedQuery<T>>,
        token: CancellationToken,
    },
}

/// Runs finds on a background tokio runtime and funnels every completion
/// into one queue drained by the owning loader.
pub struct QueryExecutor<T> {
    cmd_tx: mpsc::Sender<ExecutorCommand<T>>,
    completion_rx: mpsc::Receiver<Completion<T>>,
}

impl<T: Send + 'static> QueryExecutor<T> {
    pub fn start(worker_threads: Option<usize>) -> Result<Self, LoaderError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ExecutorCommand<T>>();
        let (completion_tx, completion_rx) = mpsc::channel();

        let mut builder = tokio::runtime::Builder::new_multi_thread();
        builder.enable_time();
        if let Some(threads) = worker_threads {
            builder.worker_threads(threads);
        }
        let runtime = builder.build().map_err(LoaderError::Runtime)?;

        thread::Builder::new()
            .name("pager-executor".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    runtime.spawn(run_command(command, completion_tx.clone()));
                }
            })
            .map_err(LoaderError::Runtime)?;

        Ok(Self {
            cmd_tx,
            completion_rx,
        })
    }

    pub fn dispatch(
        &self,
        query_id: QueryId,
        query: Arc<dyn PagedQuery<T>>,
        token: CancellationToken,
    ) {
        let command = ExecutorCommand::Find {
            query_id,
            query,
            token,
        };
        if self.cmd_tx.send(command).is_err() {
            pager_warn!("executor stopped; query {} was not dispatched", query_id);
        }
    }

    pub fn try_recv(&self) -> Option<Completion<T>> {
        self.completion_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Completion<T>, mpsc::RecvTimeoutError> {
        self.completion_rx.recv_timeout(timeout)
    }
}

async fn run_command<T: Send + 'static>(
    command: ExecutorCommand<T>,
    completion_tx: mpsc::Sender<Completion<T>>,
) {
    match command {
        ExecutorCommand::Find {
            query_id,
            query,
            token,
        } => {
            let callback = ChannelFindCallback::new(query_id, completion_tx, token.clone());
            tokio::select! {
                _ = token.cancelled() => {
                    pager_debug!("query {} dropped after cancellation", query_id);
                }
                _ = query.find(&callback) => {}
            }
        }
    }
}
