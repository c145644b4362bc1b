use async_trait::async_trait;

use common::errors::UploadError;
use common::traits::SessionPort;
use common::types::Ack;

const NOOP_STATUS: u16 = 204;

/// Session collaborator used when announcements are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionNotifier;

#[async_trait]
impl SessionPort for NoopSessionNotifier {
    async fn session_started(&self) -> Result<Ack, UploadError> {
        Ok(Ack {
            status: NOOP_STATUS,
        })
    }

    async fn session_finished(&self) -> Result<Ack, UploadError> {
        Ok(Ack {
            status: NOOP_STATUS,
        })
    }
}
