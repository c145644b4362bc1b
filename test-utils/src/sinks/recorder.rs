use std::sync::{Arc, Mutex, PoisonError};

use publisher::Listener;

/// Keeps every value delivered to its listeners, in delivery order.
pub struct Recorder<T> {
    received: Arc<Mutex<Vec<Arc<T>>>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            received: Arc::clone(&self.received),
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T> Recorder<T>
where
    T: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener appending to this recorder.
    pub fn listener(&self) -> Listener<T> {
        let received = Arc::clone(&self.received);
        Listener::new(move |_id, value: Arc<T>| {
            received
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(value);
        })
    }

    pub fn received(&self) -> Vec<Arc<T>> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
