// Adapters shipping batches and session announcements to the collector over HTTP.

use async_trait::async_trait;

use common::errors::UploadError;
use common::traits::{SessionPort, UploadPort};
use common::types::{Ack, Destination};

use crate::config::{SessionConfig, UploadConfig};
use crate::constants::CSV_EXTENSION;
use crate::http_client::HttpClient;
use crate::models::walking::{FinishWalkingData, StartWalkingData};

/// Ships serialized batches to the CSV ingest endpoint as multipart uploads.
pub struct HttpUploader {
    client: HttpClient,
    file_field: String,
    bucket_field: String,
}

impl HttpUploader {
    /// Creates a new `HttpUploader` from the upload configuration.
    /// Returns a ClientBuild error if the Http client cannot be created
    pub fn new(config: &UploadConfig) -> Result<Self, UploadError> {
        let client = HttpClient::new(config.timeout_secs)?;

        Ok(Self {
            client,
            file_field: config.file_field.clone(),
            bucket_field: config.bucket_field.clone(),
        })
    }
}

#[async_trait]
impl UploadPort for HttpUploader {
    async fn upload(
        &self,
        batch_bytes: Vec<u8>,
        batch_name: &str,
        destination: &Destination,
    ) -> Result<Ack, UploadError> {
        let file_name = format!("{batch_name}.{CSV_EXTENSION}");
        log::debug!(
            "Uploading {} ({} bytes) to {}",
            file_name,
            batch_bytes.len(),
            destination.url
        );
        self.client
            .post_file(
                &destination.url,
                &self.file_field,
                &file_name,
                batch_bytes,
                &[(self.bucket_field.as_str(), destination.bucket.as_str())],
            )
            .await
    }
}

/// Announces walking-session boundaries to the collector.
pub struct HttpSessionNotifier {
    client: HttpClient,
    start_url: String,
    finish_url: String,
    start: StartWalkingData,
    finish: FinishWalkingData,
}

impl HttpSessionNotifier {
    /// Returns a ClientBuild error if the Http client cannot be created
    pub fn new(upload: &UploadConfig, session: &SessionConfig) -> Result<Self, UploadError> {
        let client = HttpClient::new(upload.timeout_secs)?;

        Ok(Self {
            client,
            start_url: session.start_url(&upload.base_url),
            finish_url: session.finish_url(&upload.base_url),
            start: StartWalkingData {
                pedestrian_id: session.pedestrian_id.clone(),
                floor_map_id: session.floor_map_id.clone(),
            },
            finish: FinishWalkingData {
                trajectory_id: session.trajectory_id.clone(),
            },
        })
    }
}

#[async_trait]
impl SessionPort for HttpSessionNotifier {
    async fn session_started(&self) -> Result<Ack, UploadError> {
        log::info!("Announcing walking session start...");
        self.client.post_json(&self.start_url, &self.start).await
    }

    async fn session_finished(&self) -> Result<Ack, UploadError> {
        log::info!("Announcing walking session finish...");
        self.client.post_json(&self.finish_url, &self.finish).await
    }
}
