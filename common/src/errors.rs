//! Module errors

use thiserror::Error;

/// Represents the different ways a transfer to the remote collector can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// No response reached us: connection refused, DNS failure, timeout.
    #[error("network failure: {0}")]
    Network(String),

    /// A response was received with a non-2xx status.
    #[error("server rejected request with status {status_code}")]
    ServerRejected { status_code: u16 },

    /// Error indicating that there was an issue building the client.
    #[error("could not build http client: {0}")]
    ClientBuild(String),

    /// The batch could not be encoded, so no request was made.
    #[error("could not encode batch: {0}")]
    Encoding(String),
}

impl UploadError {
    /// Returns true if the failure is transient, so sending the same request again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            UploadError::Network(_) | UploadError::ServerRejected { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(UploadError::Network("timeout".to_string()).is_retryable());
        assert!(UploadError::ServerRejected { status_code: 500 }.is_retryable());
        assert!(!UploadError::ClientBuild("tls".to_string()).is_retryable());
        assert!(!UploadError::Encoding("bad record".to_string()).is_retryable());
    }

    #[test]
    fn test_display() {
        let err = UploadError::ServerRejected { status_code: 503 };
        assert_eq!(err.to_string(), "server rejected request with status 503");
    }
}
