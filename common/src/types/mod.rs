pub mod batch;
pub mod callback;
pub mod channel;
pub mod clock;
pub mod sample;
pub mod session;
pub mod upload;
pub mod xyz;

pub use batch::Batch;
pub use callback::Callback;
pub use channel::Channel;
pub use clock::{ManualClock, MonotonicClock};
pub use sample::{RawEvent, Sample};
pub use session::{Session, SessionClock};
pub use upload::{Ack, Destination, UploadReport};
pub use xyz::XYZ;
