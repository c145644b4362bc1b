use async_trait::async_trait;

use crate::errors::UploadError;
use crate::types::{Ack, Destination};

#[async_trait]
pub trait UploadPort: Send + Sync {
    /// Ships one serialized batch to `destination` as a single request.
    /// Returns Network error if no response was received, and ServerRejected
    /// if the server answered with a non-2xx status. Never retries.
    async fn upload(
        &self,
        batch_bytes: Vec<u8>,
        batch_name: &str,
        destination: &Destination,
    ) -> Result<Ack, UploadError>;
}

#[async_trait]
pub trait SessionPort: Send + Sync {
    /// Announces the beginning of a sensing session to the collector.
    async fn session_started(&self) -> Result<Ack, UploadError>;

    /// Announces the end of a sensing session to the collector.
    async fn session_finished(&self) -> Result<Ack, UploadError>;
}
