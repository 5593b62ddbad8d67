use std::collections::BTreeMap;

use crate::view_model::LoaderView;
use crate::{CachePolicy, PageTable};

pub type QueryId = u64;

pub const DEFAULT_OBJECTS_PER_PAGE: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    pub objects_per_page: usize,
    pub pagination_enabled: bool,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            objects_per_page: DEFAULT_OBJECTS_PER_PAGE,
            pagination_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// Page 0, discarding everything loaded so far once results arrive.
    First,
    /// The page after the current one, appended.
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub should_clear: bool,
}

/// Limit/skip window put on a query. The limit carries one sentinel item so
/// a further page can be detected without a count query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: usize,
    pub skip: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delivery {
    AwaitingFirst,
    AwaitingSecond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InFlight {
    pub(crate) page: usize,
    pub(crate) cache_policy: CachePolicy,
    /// Set for clearing requests until their first result set resets the table.
    pub(crate) reset_pending: bool,
    pub(crate) delivery: Delivery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderState<T> {
    pub(crate) pages: PageTable<T>,
    pub(crate) current_page: Option<usize>,
    pub(crate) has_next_page: bool,
    pub(crate) in_flight: BTreeMap<QueryId, InFlight>,
    pub(crate) config: PagingConfig,
    dirty: bool,
}

impl<T> Default for LoaderState<T> {
    fn default() -> Self {
        Self::with_config(PagingConfig::default())
    }
}

impl<T> LoaderState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PagingConfig) -> Self {
        Self {
            pages: PageTable::new(),
            current_page: None,
            has_next_page: true,
            in_flight: BTreeMap::new(),
            config,
            dirty: false,
        }
    }

    pub fn config(&self) -> PagingConfig {
        self.config
    }

    pub fn set_objects_per_page(&mut self, objects_per_page: usize) {
        self.config.objects_per_page = objects_per_page;
    }

    pub fn set_pagination_enabled(&mut self, enabled: bool) {
        self.config.pagination_enabled = enabled;
    }

    pub fn current_page(&self) -> Option<usize> {
        self.current_page
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn is_in_flight(&self, query_id: QueryId) -> bool {
        self.in_flight.contains_key(&query_id)
    }

    pub fn in_flight(&self) -> impl Iterator<Item = QueryId> + '_ {
        self.in_flight.keys().copied()
    }

    pub fn pages(&self) -> &PageTable<T> {
        &self.pages
    }

    /// Resolves a load request, or `None` once the last page was reached.
    pub fn next_request(&self, kind: LoadKind) -> Option<PageRequest> {
        if !self.has_next_page {
            return None;
        }
        let request = match kind {
            LoadKind::First => PageRequest {
                page: 0,
                should_clear: true,
            },
            LoadKind::Next => PageRequest {
                page: self.current_page.map_or(0, |page| page + 1),
                should_clear: false,
            },
        };
        Some(request)
    }

    /// Window to apply to the query for `page`; `None` when pagination is off
    /// or the window does not fit in `usize`.
    pub fn window_for(&self, page: usize) -> Option<PageWindow> {
        let per_page = self.config.objects_per_page;
        if !self.config.pagination_enabled || per_page == 0 {
            return None;
        }
        Some(PageWindow {
            limit: per_page.checked_add(1)?,
            skip: page.checked_mul(per_page)?,
        })
    }

    pub fn view(&self) -> LoaderView {
        let item_count = self.pages.item_count();
        LoaderView {
            item_count,
            page_count: self.pages.page_count(),
            current_page: self.current_page,
            has_next_page: self.has_next_page,
            is_loading: self.is_loading(),
            show_next_page_item: self.config.pagination_enabled
                && item_count > 0
                && self.has_next_page,
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether content changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl<T: Clone> LoaderState<T> {
    /// The flattened content currently presented to the sink.
    pub fn items(&self) -> Vec<T> {
        self.pages.flatten()
    }
}
