//! Pager engine: query execution and effect handling around the core state machine.
mod executor;
mod listener;
mod loader;
mod memory;
mod query;
mod settings;
mod target;
mod types;

pub use executor::QueryExecutor;
pub use listener::{ListenerId, ListenerRegistry, OnQueryLoadListener};
pub use loader::PagedLoader;
pub use memory::{MemoryBackend, MemoryQuery};
pub use query::{ChannelFindCallback, FindCallback, PagedQuery, QueryFactory};
pub use settings::{LoaderSettings, MAX_OBJECTS_PER_PAGE};
pub use target::{LoaderTarget, VecTarget};
pub use types::{Completion, LoaderError};

pub use pager_core::{
    CachePolicy, FindOutcome, LoaderView, QueryError, QueryErrorKind, QueryId,
};
