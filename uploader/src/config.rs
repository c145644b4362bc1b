use serde::Deserialize;

use common::types::Destination;

use crate::constants::*;

/// Configuration of the batch ingest endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub base_url: String,
    pub csv_path: String,
    /// Multipart field carrying the file.
    pub file_field: String,
    /// Multipart field carrying the bucket name.
    pub bucket_field: String,
    pub bucket: String,
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            csv_path: DEFAULT_CSV_PATH.to_string(),
            file_field: DEFAULT_FILE_FIELD.to_string(),
            bucket_field: DEFAULT_BUCKET_FIELD.to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
            timeout_secs: CLIENT_TIMEOUT_DEFAULT_SECS,
        }
    }
}

impl UploadConfig {
    pub fn csv_url(&self) -> String {
        join_url(&self.base_url, &self.csv_path)
    }

    pub fn destination(&self) -> Destination {
        Destination::new(&self.csv_url(), &self.bucket)
    }

    /// Returns a description of the first invalid setting, if any.
    pub fn validate(&self) -> Result<(), String> {
        reqwest::Url::parse(&self.csv_url())
            .map_err(|e| format!("Invalid upload url {}: {}", self.csv_url(), e))?;
        if self.file_field.is_empty() {
            return Err("upload.file_field must not be empty".to_string());
        }
        if self.bucket_field.is_empty() {
            return Err("upload.bucket_field must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("upload.timeout_secs must be positive".to_string());
        }
        Ok(())
    }
}

/// Configuration of the walking-session announcements.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub enabled: bool,
    pub start_path: String,
    pub finish_path: String,
    pub pedestrian_id: String,
    pub floor_map_id: String,
    pub trajectory_id: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            start_path: DEFAULT_START_PATH.to_string(),
            finish_path: DEFAULT_FINISH_PATH.to_string(),
            pedestrian_id: DEFAULT_PEDESTRIAN_ID.to_string(),
            floor_map_id: DEFAULT_FLOOR_MAP_ID.to_string(),
            trajectory_id: String::new(),
        }
    }
}

impl SessionConfig {
    pub fn start_url(&self, base_url: &str) -> String {
        join_url(base_url, &self.start_path)
    }

    pub fn finish_url(&self, base_url: &str) -> String {
        join_url(base_url, &self.finish_path)
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_destination() {
        let config = UploadConfig::default();
        let destination = config.destination();
        assert_eq!(
            destination.url,
            "http://localhost:8080/api/health/minio/csv"
        );
        assert_eq!(destination.bucket, "android");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_join_url_slashes() {
        assert_eq!(join_url("http://a/", "/b"), "http://a/b");
        assert_eq!(join_url("http://a", "b"), "http://a/b");
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = UploadConfig {
            base_url: "not a url".to_string(),
            ..UploadConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let config = UploadConfig {
            file_field: String::new(),
            ..UploadConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_session_urls() {
        let config = SessionConfig::default();
        assert_eq!(
            config.start_url("http://collector:9000/"),
            "http://collector:9000/api/walking/start"
        );
        assert_eq!(
            config.finish_url("http://collector:9000"),
            "http://collector:9000/api/walking/finish"
        );
    }
}
