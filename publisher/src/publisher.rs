use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use common::traits::Notifiable;
use common::types::Callback;

#[derive(Error, PartialEq, Clone, Debug)]
pub enum PublisherError {
    #[error("Listener with id {0} not found")]
    ListenerNotFound(Uuid),

    #[error("Publisher doesnt exist")]
    PublisherNotFound,
}

pub trait Publishable<T> {
    fn register_listener(&self, listener: &mut dyn Notifiable<T>) -> Uuid;
    fn unregister_listener(&self, listener_id: Uuid) -> Result<(), PublisherError>;
    fn unregister_all(&self);
    fn notify_listeners(&self, data: Arc<T>);
}

/// Record of registered listeners that will be notified of updates
pub struct Publisher<T> {
    listeners: Arc<DashMap<Uuid, Callback<T>>>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
        }
    }
}

impl<T> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Publisher<T> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(DashMap::new()),
        }
    }

    // Returns true if no listeners registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    // Returns number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl<T> Publishable<T> for Publisher<T>
where
    T: Send + Sync + 'static,
{
    fn register_listener(&self, listener: &mut dyn Notifiable<T>) -> Uuid {
        let callback = listener.get_callback();
        let listener_id = Uuid::new_v4();
        listener.set_id(listener_id);
        self.listeners.insert(listener_id, callback);
        listener_id
    }

    fn unregister_all(&self) {
        self.listeners.clear();
    }

    /// Unregisters a listener callback with a given id
    /// Returns PublisherError::ListenerNotFound if no id matches with any of the registered listeners
    fn unregister_listener(&self, listener_id: Uuid) -> Result<(), PublisherError> {
        self.listeners
            .remove(&listener_id)
            .map(|_| ())
            .ok_or(PublisherError::ListenerNotFound(listener_id))
    }

    /// Calls each registered listener with the provided data.
    fn notify_listeners(&self, data: Arc<T>) {
        // Callbacks are collected first so no shard lock is held while user code runs.
        let listeners: Vec<(Uuid, Callback<T>)> = self
            .listeners
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        for (id, callback) in listeners {
            callback(id, data.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Listener;
    use common::types::{Channel, Sample};
    use std::sync::Mutex;

    #[test]
    fn test_publisher_initialization() {
        let publisher = Publisher::<Sample>::new();
        assert!(publisher.is_empty());
    }

    #[test]
    fn test_register_listener() {
        let publisher = Publisher::<Sample>::new();
        let mut listener = Listener::new(|_id, sample: Arc<Sample>| {
            println!("Received sample: {:?}", sample);
        });

        publisher.register_listener(&mut listener);
        assert_eq!(publisher.len(), 1);
    }

    #[test]
    fn test_unregister_listener() {
        let publisher = Publisher::<Sample>::new();
        let mut listener1 = Listener::new(|_id, _sample: Arc<Sample>| {});
        let mut listener2 = Listener::new(|_id, _sample: Arc<Sample>| {});

        let id1 = publisher.register_listener(&mut listener1);
        let id2 = publisher.register_listener(&mut listener2);
        assert_eq!(publisher.len(), 2);

        assert_eq!(publisher.unregister_listener(id2), Ok(()));
        assert_eq!(publisher.len(), 1);
        assert_eq!(publisher.unregister_listener(id1), Ok(()));
        assert_eq!(publisher.len(), 0);
        assert_eq!(
            publisher.unregister_listener(id1),
            Err(PublisherError::ListenerNotFound(id1))
        );
    }

    #[test]
    fn test_notify_listeners() {
        let publisher = Publisher::<Sample>::new();
        let shared_state = Arc::new(Mutex::new(Vec::new()));

        let mut listener = {
            let shared_state = Arc::clone(&shared_state);
            Listener::new(move |_id, sample: Arc<Sample>| {
                shared_state.lock().unwrap().push(*sample);
            })
        };
        publisher.register_listener(&mut listener);

        publisher.notify_listeners(Arc::new(Sample::new(Channel::Accel, 0, [1.0, 2.0, 3.0])));

        let shared_data = shared_state.lock().unwrap();
        assert_eq!(shared_data.len(), 1);
        assert_eq!(shared_data[0].measurement().inner(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_unregister_all() {
        let publisher = Publisher::<Sample>::new();
        let mut listener = Listener::new(|_id, _sample: Arc<Sample>| {});
        publisher.register_listener(&mut listener);
        publisher.register_listener(&mut listener);
        publisher.unregister_all();
        assert!(publisher.is_empty());
    }
}
