#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoaderView {
    pub item_count: usize,
    pub page_count: usize,
    pub current_page: Option<usize>,
    pub has_next_page: bool,
    pub is_loading: bool,
    /// Whether a "load more" row should follow the items.
    pub show_next_page_item: bool,
    pub dirty: bool,
}
