use async_trait::async_trait;

use common::errors::UploadError;
use common::traits::SessionPort;
use common::types::Ack;

use crate::adapters::noop::NoopSessionNotifier;
use crate::adapters::production::{HttpSessionNotifier, HttpUploader};
use crate::config::{SessionConfig, UploadConfig};

/// Session collaborator selected from configuration.
pub enum SessionNotifier {
    Http(HttpSessionNotifier),
    Disabled(NoopSessionNotifier),
}

#[async_trait]
impl SessionPort for SessionNotifier {
    async fn session_started(&self) -> Result<Ack, UploadError> {
        match self {
            SessionNotifier::Http(notifier) => notifier.session_started().await,
            SessionNotifier::Disabled(notifier) => notifier.session_started().await,
        }
    }

    async fn session_finished(&self) -> Result<Ack, UploadError> {
        match self {
            SessionNotifier::Http(notifier) => notifier.session_finished().await,
            SessionNotifier::Disabled(notifier) => notifier.session_finished().await,
        }
    }
}

/// Builds the production batch uploader.
///
/// An error ClientBuild is returned if the http client cannot be created.
pub fn build_uploader(config: &UploadConfig) -> Result<HttpUploader, UploadError> {
    HttpUploader::new(config)
}

/// Builds the walking-session notifier, or a no-op one when announcements are disabled.
pub fn build_session_notifier(
    upload: &UploadConfig,
    session: &SessionConfig,
) -> Result<SessionNotifier, UploadError> {
    if session.enabled {
        Ok(SessionNotifier::Http(HttpSessionNotifier::new(
            upload, session,
        )?))
    } else {
        log::info!("Walking-session announcements disabled");
        Ok(SessionNotifier::Disabled(NoopSessionNotifier))
    }
}
