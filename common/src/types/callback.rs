use std::sync::Arc;
use uuid::Uuid;

/// Listener callback. Invoked synchronously by the publisher with the listener id and the event.
pub type Callback<T> = Arc<dyn Fn(Uuid, Arc<T>) + Send + Sync>;
