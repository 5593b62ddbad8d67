use pager_core::QueryError;

/// Hooks fired before and after every query completion is handled.
pub trait OnQueryLoadListener<T> {
    fn on_loading(&mut self);

    fn on_loaded(&mut self, items: Option<&[T]>, has_next_page: bool, error: Option<&QueryError>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Listeners owned by one loader, notified in registration order.
pub struct ListenerRegistry<T> {
    listeners: Vec<(ListenerId, Box<dyn OnQueryLoadListener<T>>)>,
    next_id: u64,
}

impl<T> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> ListenerRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: Box<dyn OnQueryLoadListener<T>>) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify_loading(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener.on_loading();
        }
    }

    pub fn notify_loaded(
        &mut self,
        items: Option<&[T]>,
        has_next_page: bool,
        error: Option<&QueryError>,
    ) {
        for (_, listener) in &mut self.listeners {
            listener.on_loaded(items, has_next_page, error);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{ListenerRegistry, OnQueryLoadListener};
    use pager_core::QueryError;

    struct Tagged {
        tag: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl OnQueryLoadListener<u8> for Tagged {
        fn on_loading(&mut self) {
            self.log.lock().unwrap().push(format!("{}:loading", self.tag));
        }

        fn on_loaded(&mut self, items: Option<&[u8]>, has_next_page: bool, error: Option<&QueryError>) {
            self.log.lock().unwrap().push(format!(
                "{}:loaded:{}:{}:{}",
                self.tag,
                items.map_or(0, <[u8]>::len),
                has_next_page,
                error.is_some()
            ));
        }
    }

    #[test]
    fn notifies_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        registry.add(Box::new(Tagged {
            tag: "a",
            log: log.clone(),
        }));
        registry.add(Box::new(Tagged {
            tag: "b",
            log: log.clone(),
        }));

        registry.notify_loading();
        registry.notify_loaded(Some(&[1, 2]), true, None);

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "a:loading",
                "b:loading",
                "a:loaded:2:true:false",
                "b:loaded:2:true:false",
            ]
        );
    }

    #[test]
    fn removed_listener_stops_receiving() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        let first = registry.add(Box::new(Tagged {
            tag: "a",
            log: log.clone(),
        }));
        registry.add(Box::new(Tagged {
            tag: "b",
            log: log.clone(),
        }));

        assert!(registry.remove(first));
        assert!(!registry.remove(first));
        registry.notify_loading();
        assert_eq!(*log.lock().unwrap(), vec!["b:loading"]);

        registry.clear();
        assert!(registry.is_empty());
    }
}
