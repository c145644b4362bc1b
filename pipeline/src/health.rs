use dashmap::DashMap;
use std::sync::Arc;

use common::errors::UploadError;
use common::types::{Ack, Channel, UploadReport};

/// Delivery record of one channel, for operators watching the uplink.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadHealth {
    pub last_outcome: Option<Result<Ack, UploadError>>,
    /// Failed attempts since the last success.
    pub consecutive_failures: u32,
    pub attempts: u64,
    pub delivered_rows: u64,
}

impl UploadHealth {
    pub fn is_healthy(&self) -> bool {
        self.consecutive_failures == 0
    }

    fn record(&mut self, report: &UploadReport) {
        self.attempts += 1;
        match &report.outcome {
            Ok(_) => {
                self.consecutive_failures = 0;
                self.delivered_rows += report.rows as u64;
            }
            Err(_) => self.consecutive_failures += 1,
        }
        self.last_outcome = Some(report.outcome.clone());
    }
}

#[derive(Clone, Default)]
pub(crate) struct HealthMonitor {
    board: Arc<DashMap<Channel, UploadHealth>>,
}

impl HealthMonitor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, report: &UploadReport) {
        self.board.entry(report.channel).or_default().record(report);
    }

    pub(crate) fn get(&self, channel: Channel) -> UploadHealth {
        self.board
            .get(&channel)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(channel: Channel, rows: usize, outcome: Result<Ack, UploadError>) -> UploadReport {
        UploadReport {
            channel,
            batch_name: channel.default_batch_name().to_string(),
            rows,
            outcome,
        }
    }

    #[test]
    fn test_unknown_channel_is_default() {
        let monitor = HealthMonitor::new();
        let health = monitor.get(Channel::Gyro);
        assert_eq!(health, UploadHealth::default());
        assert!(health.is_healthy());
    }

    #[test]
    fn test_failures_then_recovery() {
        let monitor = HealthMonitor::new();
        let rejected = Err(UploadError::ServerRejected { status_code: 500 });
        monitor.record(&report(Channel::Accel, 3, rejected.clone()));
        monitor.record(&report(Channel::Accel, 5, rejected.clone()));

        let health = monitor.get(Channel::Accel);
        assert_eq!(health.consecutive_failures, 2);
        assert_eq!(health.delivered_rows, 0);
        assert_eq!(health.last_outcome, Some(rejected));
        assert!(!health.is_healthy());

        monitor.record(&report(Channel::Accel, 7, Ok(Ack { status: 200 })));
        let health = monitor.get(Channel::Accel);
        assert_eq!(health.consecutive_failures, 0);
        assert_eq!(health.attempts, 3);
        assert_eq!(health.delivered_rows, 7);
        // the other channel is untouched
        assert_eq!(monitor.get(Channel::Gyro).attempts, 0);
    }
}
