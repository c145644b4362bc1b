//! # Crate publisher
//!
//! ## publisher
//!
//! The `publisher` crate provides a mechanism for registering and notifying listeners
//! of new events of type `T`, plus the board holding the latest sample of every
//! channel for display collaborators that prefer polling.
//!
//! Listeners are invoked synchronously from the thread that publishes, so they
//! must be cheap: the sample publisher sits on the sensor callback path.
//!
//! ### Example
//!
//! ```
//! use std::sync::Arc;
//! use publisher::{Listener, Publishable, Publisher};
//!
//! let publisher = Publisher::<String>::new();
//!
//! // Register a listener
//! let mut listener = Listener::new(|_id, data: Arc<String>| {
//!     println!("Listener received: {}", data);
//! });
//! let listener_id = publisher.register_listener(&mut listener);
//!
//! // Notify all listeners
//! publisher.notify_listeners(Arc::new("Hello, World!".to_string()));
//!
//! // Unregister the listener
//! publisher.unregister_listener(listener_id).expect("Failed to unregister listener");
//! assert!(publisher.is_empty());
//! ```

pub mod latest;
pub mod listener;
pub mod macros;
pub mod publisher;
pub mod publisher_manager;

pub use latest::LatestSamples;
pub use listener::Listener;
pub use publisher::{Publishable, Publisher, PublisherError};
pub use publisher_manager::PublisherManager;
