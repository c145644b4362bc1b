//! General functionality for the `sensor-uplink` workspace
//!
//! Holds the data model shared by the acquisition pipeline and its adapters
//! (channels, samples, batches, session state) together with the ports the
//! pipeline talks to: the upload endpoint, the session collaborator and the
//! time source used to stamp samples.

pub mod constants;
pub mod errors;

#[doc(hidden)]
pub mod traits;
#[doc(hidden)]
pub mod types;

// Re-export traits
#[doc(inline)]
pub use traits::{Notifiable, SessionPort, TimeSource, UploadPort};

// Re-export types
#[doc(inline)]
pub use errors::UploadError;
#[doc(inline)]
pub use types::{
    Ack, Batch, Callback, Channel, Destination, ManualClock, MonotonicClock, RawEvent, Sample,
    Session, SessionClock, UploadReport, XYZ,
};
