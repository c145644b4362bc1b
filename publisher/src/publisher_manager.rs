use dashmap::DashMap;
use std::cmp::Eq;
use std::hash::Hash;
use std::sync::Arc;
use uuid::Uuid;

use crate::publisher::{Publishable, Publisher, PublisherError};
use common::traits::Notifiable;

/// Manages one `Publisher` per key (typically a `Channel`) and remembers which
/// publisher every listener id belongs to, so listeners can be removed by id alone.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use uuid::Uuid;
/// use common::types::{Channel, Sample};
/// use publisher::{listener, Listener, PublisherManager};
///
/// #[derive(Debug, Clone)]
/// struct Display;
///
/// impl Display {
///     fn handle(&self, _id: Uuid, sample: Arc<Sample>) {
///         println!("Sample: {:?}", sample);
///     }
/// }
///
/// let manager = PublisherManager::<Sample, Channel>::new(&Channel::ALL);
///
/// let display = Arc::new(Display);
/// let mut listener = listener!(display.handle);
///
/// let id = manager.add_listener(&mut listener, &Channel::Accel).unwrap();
/// manager.notify_listeners(Channel::Accel, Arc::new(Sample::new(Channel::Accel, 0, [0.0, 0.0, 9.8])));
/// manager.remove_listener(id).unwrap();
/// ```
pub struct PublisherManager<T, S>
where
    S: Hash + Eq,
{
    publishers: Arc<DashMap<S, Publisher<T>>>,
    control: Arc<DashMap<Uuid, S>>,
}

impl<T, S> Clone for PublisherManager<T, S>
where
    S: Hash + Eq,
{
    fn clone(&self) -> Self {
        Self {
            publishers: Arc::clone(&self.publishers),
            control: Arc::clone(&self.control),
        }
    }
}

impl<T, S> PublisherManager<T, S>
where
    T: Send + Sync + 'static,
    S: Send + Sync + Hash + Eq + Clone,
{
    pub fn new(publisher_types: &[S]) -> Self {
        let collection = DashMap::<S, Publisher<T>>::new();
        for publisher_type in publisher_types {
            collection.insert(publisher_type.clone(), Publisher::new());
        }

        Self {
            publishers: Arc::new(collection),
            control: Arc::new(DashMap::new()),
        }
    }

    pub fn add_listener(
        &self,
        listener: &mut dyn Notifiable<T>,
        publisher_type: &S,
    ) -> Result<Uuid, PublisherError> {
        let publisher = self
            .publishers
            .get(publisher_type)
            .ok_or(PublisherError::PublisherNotFound)?;
        let id = publisher.register_listener(listener);
        self.control.insert(id, publisher_type.clone());
        Ok(id)
    }

    pub fn remove_listener(&self, id: Uuid) -> Result<(), PublisherError> {
        let (_, publisher_type) = self
            .control
            .remove(&id)
            .ok_or(PublisherError::ListenerNotFound(id))?;
        let publisher = self
            .publishers
            .get(&publisher_type)
            .ok_or(PublisherError::PublisherNotFound)?;
        publisher.unregister_listener(id)
    }

    pub fn notify_listeners(&self, publisher_type: S, data: Arc<T>) {
        // Clone out of the map so the shard lock is released before callbacks run.
        let publisher = self
            .publishers
            .get(&publisher_type)
            .map(|entry| entry.value().clone());
        if let Some(publisher) = publisher {
            publisher.notify_listeners(data);
        }
    }

    /// Total number of listeners across all publishers.
    pub fn len(&self) -> usize {
        self.control.len()
    }

    pub fn is_empty(&self) -> bool {
        self.control.is_empty()
    }
}
