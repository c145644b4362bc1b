use crate::errors::UploadError;
use crate::types::Channel;

/// Positive acknowledgement of a request: the 2xx status the server answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    pub status: u16,
}

/// Where a batch is shipped: the ingest URL and the bucket it is filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub url: String,
    pub bucket: String,
}

impl Destination {
    pub fn new(url: &str, bucket: &str) -> Self {
        Self {
            url: url.to_string(),
            bucket: bucket.to_string(),
        }
    }
}

/// Outcome of one upload attempt, published to upload listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReport {
    pub channel: Channel,
    pub batch_name: String,
    pub rows: usize,
    pub outcome: Result<Ack, UploadError>,
}

impl UploadReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
