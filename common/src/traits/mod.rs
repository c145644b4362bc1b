pub mod ports;
pub mod publisher;
pub mod time;

pub use crate::traits::ports::{SessionPort, UploadPort};
pub use crate::traits::publisher::Notifiable;
pub use crate::traits::time::TimeSource;
