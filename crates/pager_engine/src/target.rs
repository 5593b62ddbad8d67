/// Consumer of the flattened page table.
pub trait LoaderTarget<T> {
    fn append_sublist(&mut self, items: &[T]);

    fn clear_list(&mut self);

    fn notify_data_changed(&mut self);
}

/// A plain list sink, for headless use and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VecTarget<T> {
    items: Vec<T>,
    revision: u64,
}

impl<T> Default for VecTarget<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            revision: 0,
        }
    }
}

impl<T> VecTarget<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of change notifications received.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl<T: Clone> LoaderTarget<T> for VecTarget<T> {
    fn append_sublist(&mut self, items: &[T]) {
        self.items.extend_from_slice(items);
    }

    fn clear_list(&mut self) {
        self.items.clear();
    }

    fn notify_data_changed(&mut self) {
        self.revision += 1;
    }
}
