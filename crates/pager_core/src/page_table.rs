/// Ordered pages of results, indexed from 0.
///
/// The flattened content is always the concatenation of every page in index
/// order. Pages are only ever grown contiguously, so a page never exists
/// without its predecessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTable<T> {
    pages: Vec<Vec<T>>,
}

impl<T> Default for PageTable<T> {
    fn default() -> Self {
        Self { pages: Vec::new() }
    }
}

impl<T> PageTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn item_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    pub fn page(&self, index: usize) -> Option<&[T]> {
        self.pages.get(index).map(Vec::as_slice)
    }

    pub fn pages(&self) -> impl Iterator<Item = &[T]> {
        self.pages.iter().map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.pages.iter().flatten()
    }

    /// Appends empty pages until `index` exists.
    pub fn ensure_page(&mut self, index: usize) {
        while self.pages.len() <= index {
            self.pages.push(Vec::new());
        }
    }

    /// Replaces the contents of page `index`, growing the table if needed.
    pub fn replace(&mut self, index: usize, items: Vec<T>) {
        self.ensure_page(index);
        self.pages[index] = items;
    }

    /// Drops every page and starts over with a single empty page.
    pub fn reset(&mut self) {
        self.pages.clear();
        self.pages.push(Vec::new());
    }

    pub fn clear(&mut self) {
        self.pages.clear();
    }
}

impl<T: Clone> PageTable<T> {
    pub fn flatten(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    pub fn snapshot(&self) -> Vec<Vec<T>> {
        self.pages.clone()
    }
}
