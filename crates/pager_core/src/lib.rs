//! Pager core: pure pagination state machine and view-model helpers.
mod cache_policy;
mod effect;
mod error;
mod msg;
mod page_table;
mod state;
mod update;
mod view_model;

pub use cache_policy::CachePolicy;
pub use effect::Effect;
pub use error::{QueryError, QueryErrorKind};
pub use msg::{FindOutcome, Msg};
pub use page_table::PageTable;
pub use state::{
    LoadKind, LoaderState, PageRequest, PageWindow, PagingConfig, QueryId,
    DEFAULT_OBJECTS_PER_PAGE,
};
pub use update::update;
pub use view_model::LoaderView;
