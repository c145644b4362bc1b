use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, Response};
use serde::Serialize;
use std::time::Duration;

use common::errors::UploadError;
use common::types::Ack;

use crate::constants::CSV_MIME_TYPE;

pub(crate) struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    pub(crate) fn new(timeout_secs: u64) -> Result<Self, UploadError> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| UploadError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }

    /// Posts `file_bytes` as a CSV file part named `file_field`, plus plain text fields.
    pub(crate) async fn post_file(
        &self,
        url: &str,
        file_field: &str,
        file_name: &str,
        file_bytes: Vec<u8>,
        text_fields: &[(&str, &str)],
    ) -> Result<Ack, UploadError> {
        let part = Part::bytes(file_bytes)
            .file_name(file_name.to_string())
            .mime_str(CSV_MIME_TYPE)
            .map_err(|e| UploadError::ClientBuild(e.to_string()))?;

        let form = text_fields.iter().fold(
            Form::new().part(file_field.to_string(), part),
            |form, (name, value)| form.text(name.to_string(), value.to_string()),
        );

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;

        check_status(response)
    }

    pub(crate) async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Ack, UploadError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;

        check_status(response)
    }
}

fn check_status(response: Response) -> Result<Ack, UploadError> {
    let status = response.status();
    if status.is_success() {
        Ok(Ack {
            status: status.as_u16(),
        })
    } else {
        Err(UploadError::ServerRejected {
            status_code: status.as_u16(),
        })
    }
}
