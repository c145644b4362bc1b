// Snapshot → serialize → stage → upload → clear-on-success, one channel at a time.

use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use common::constants::N_CHANNELS;
use common::errors::UploadError;
use common::traits::UploadPort;
use common::types::{Ack, Batch, Channel, Destination, UploadReport};
use publisher::{Publishable, Publisher};

use crate::buffer::SampleBuffer;
use crate::config::{BatchNames, PipelineConfig};
use crate::health::HealthMonitor;
use crate::serializer::BatchSerializer;
use crate::staging::StagingArea;

pub(crate) struct Exporter<U> {
    pub(crate) buffer: Arc<SampleBuffer>,
    uploader: Arc<U>,
    serializer: BatchSerializer,
    pub(crate) staging: StagingArea,
    staging_ready: AtomicBool,
    in_flight: [Arc<AtomicBool>; N_CHANNELS],
    pub(crate) health: HealthMonitor,
    pub(crate) reports: Publisher<UploadReport>,
    batch_names: BatchNames,
    destination: Destination,
    upload_empty_batches: bool,
    runtime: Handle,
}

/// Marks a channel as having an upload in flight until dropped, so an aborted
/// or panicked upload task cannot wedge the channel.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self(Arc::clone(flag)))
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<U> Exporter<U>
where
    U: UploadPort + 'static,
{
    pub(crate) fn new(
        config: &PipelineConfig,
        buffer: Arc<SampleBuffer>,
        uploader: Arc<U>,
        runtime: Handle,
    ) -> Self {
        Self {
            buffer,
            uploader,
            serializer: BatchSerializer::new(),
            staging: StagingArea::from_config(config.staging_dir.as_deref()),
            staging_ready: AtomicBool::new(false),
            in_flight: std::array::from_fn(|_| Arc::new(AtomicBool::new(false))),
            health: HealthMonitor::new(),
            reports: Publisher::new(),
            batch_names: config.batch_names.clone(),
            destination: config.destination(),
            upload_empty_batches: config.upload_empty_batches,
            runtime,
        }
    }

    pub(crate) fn set_staging_ready(&self, ready: bool) {
        self.staging_ready.store(ready, Ordering::Release);
    }

    pub(crate) fn is_in_flight(&self, channel: Channel) -> bool {
        self.in_flight[channel.index()].load(Ordering::Acquire)
    }

    /// Starts one export per channel. Channels are handled independently: a
    /// busy or empty channel never holds back the other.
    pub(crate) fn export_all(self: &Arc<Self>) -> Vec<JoinHandle<UploadReport>> {
        Channel::ALL
            .iter()
            .filter_map(|channel| self.export(*channel))
            .collect()
    }

    /// Snapshots `channel` and spawns its upload.
    ///
    /// Only the snapshot happens on the calling thread; encoding and I/O run
    /// in the spawned task. Returns None when the previous upload of the
    /// channel is still in flight, or when there is nothing to send.
    pub(crate) fn export(self: &Arc<Self>, channel: Channel) -> Option<JoinHandle<UploadReport>> {
        let Some(guard) = InFlightGuard::acquire(&self.in_flight[channel.index()]) else {
            debug!("{} upload still in flight, skipping tick", channel);
            return None;
        };

        let batch = self.buffer.snapshot(channel);
        if batch.is_empty() && !self.upload_empty_batches {
            return None;
        }

        let batch_name = self.batch_names.for_channel(channel).to_string();
        let exporter = Arc::clone(self);

        Some(self.runtime.spawn(async move {
            let report = exporter.deliver(batch, batch_name).await;
            drop(guard);
            exporter.reports.notify_listeners(Arc::new(report.clone()));
            report
        }))
    }

    async fn deliver(&self, batch: Batch, batch_name: String) -> UploadReport {
        let channel = batch.channel();
        let rows = batch.len();
        let outcome = match self.serializer.serialize(&batch) {
            Ok(bytes) => {
                drop(batch);
                self.send(channel, &batch_name, rows, bytes).await
            }
            Err(e) => Err(UploadError::Encoding(e.to_string())),
        };

        if let Err(e) = &outcome {
            if e.is_retryable() {
                warn!(
                    "Upload of {} failed, keeping {} rows for the next tick: {}",
                    batch_name, rows, e
                );
            } else {
                error!(
                    "Upload of {} failed, keeping {} rows: {}",
                    batch_name, rows, e
                );
            }
        }

        let report = UploadReport {
            channel,
            batch_name,
            rows,
            outcome,
        };
        self.health.record(&report);
        report
    }

    async fn send(
        &self,
        channel: Channel,
        batch_name: &str,
        rows: usize,
        bytes: Vec<u8>,
    ) -> Result<Ack, UploadError> {
        let staged = if self.staging_ready.load(Ordering::Acquire) {
            match self.staging.write(batch_name, &bytes).await {
                Ok(path) => path.is_some(),
                Err(e) => {
                    warn!("{}; uploading from memory", e);
                    false
                }
            }
        } else {
            false
        };

        let ack = self
            .uploader
            .upload(bytes, batch_name, &self.destination)
            .await?;

        let removed = self.buffer.clear_exported(channel, rows);
        info!(
            "Uploaded {} ({} rows, status {})",
            batch_name, removed, ack.status
        );
        if staged {
            if let Err(e) = self.staging.remove(batch_name).await {
                warn!("Could not delete staging file: {}", e);
            }
        }
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::Sample;
    use tempfile::tempdir;
    use uploader_rs::MockUploader;

    fn build(config: &PipelineConfig) -> (Arc<Exporter<MockUploader>>, Arc<MockUploader>) {
        let uploader = Arc::new(MockUploader::new());
        let exporter = Exporter::new(
            config,
            Arc::new(SampleBuffer::new()),
            Arc::clone(&uploader),
            Handle::current(),
        );
        (Arc::new(exporter), uploader)
    }

    fn fill(buffer: &SampleBuffer, channel: Channel, n: u64) {
        for i in 0..n {
            buffer.append(Sample::new(channel, i * 10, [0.0, 0.0, 9.8]));
        }
    }

    #[tokio::test]
    async fn test_success_clears_exported_rows() {
        let (exporter, uploader) = build(&PipelineConfig::default());
        fill(&exporter.buffer, Channel::Accel, 3);

        let handle = exporter.export(Channel::Accel).unwrap();
        fill(&exporter.buffer, Channel::Accel, 2);
        let report = handle.await.unwrap();

        assert!(report.is_success());
        assert_eq!(report.rows, 3);
        assert_eq!(report.batch_name, "acc_sensor_data");
        assert_eq!(exporter.buffer.len(Channel::Accel), 2);
        assert_eq!(uploader.calls().len(), 1);
        assert!(uploader.calls()[0].body().starts_with("t,x,y,z\n0,0.0,0.0,9.8\n"));
    }

    #[tokio::test]
    async fn test_failure_keeps_rows() {
        let (exporter, uploader) = build(&PipelineConfig::default());
        uploader.fail_next(UploadError::Network("connection refused".to_string()));
        fill(&exporter.buffer, Channel::Gyro, 4);

        let report = exporter.export(Channel::Gyro).unwrap().await.unwrap();

        assert!(!report.is_success());
        assert_eq!(exporter.buffer.len(Channel::Gyro), 4);
        assert_eq!(exporter.health.get(Channel::Gyro).consecutive_failures, 1);
    }

    #[tokio::test]
    async fn test_non_retryable_failure_also_keeps_rows() {
        let (exporter, uploader) = build(&PipelineConfig::default());
        uploader.fail_next(UploadError::ClientBuild("tls backend".to_string()));
        fill(&exporter.buffer, Channel::Accel, 2);

        let report = exporter.export(Channel::Accel).unwrap().await.unwrap();

        assert!(matches!(report.outcome, Err(UploadError::ClientBuild(_))));
        assert_eq!(exporter.buffer.len(Channel::Accel), 2);
    }

    #[tokio::test]
    async fn test_empty_channel_skipped_unless_configured() {
        let (exporter, uploader) = build(&PipelineConfig::default());
        assert!(exporter.export(Channel::Accel).is_none());
        assert!(!exporter.is_in_flight(Channel::Accel));

        let config = PipelineConfig {
            upload_empty_batches: true,
            ..PipelineConfig::default()
        };
        let (exporter, uploader_empty) = build(&config);
        let report = exporter.export(Channel::Accel).unwrap().await.unwrap();
        assert_eq!(report.rows, 0);
        assert_eq!(uploader_empty.calls()[0].body(), "t,x,y,z\n");
        assert!(uploader.calls().is_empty());
    }

    #[tokio::test]
    async fn test_one_upload_in_flight_per_channel() {
        let (exporter, uploader) = build(&PipelineConfig::default());
        uploader.pause();
        fill(&exporter.buffer, Channel::Accel, 2);
        fill(&exporter.buffer, Channel::Gyro, 2);

        let first = exporter.export(Channel::Accel).unwrap();
        assert!(exporter.is_in_flight(Channel::Accel));
        assert!(exporter.export(Channel::Accel).is_none());
        // the other channel is not held back
        let gyro = exporter.export(Channel::Gyro).unwrap();

        uploader.resume();
        first.await.unwrap();
        gyro.await.unwrap();
        assert!(!exporter.is_in_flight(Channel::Accel));
        assert!(exporter.buffer.is_empty(Channel::Accel));
    }

    #[tokio::test]
    async fn test_staging_file_removed_after_success() {
        let dir = tempdir().unwrap();
        let config = PipelineConfig {
            staging_dir: Some(dir.path().to_path_buf()),
            ..PipelineConfig::default()
        };
        let (exporter, uploader) = build(&config);
        exporter.staging.prepare().unwrap();
        exporter.set_staging_ready(true);
        uploader.fail_next(UploadError::ServerRejected { status_code: 503 });
        fill(&exporter.buffer, Channel::Gyro, 1);

        exporter.export(Channel::Gyro).unwrap().await.unwrap();
        let staged = dir.path().join("sensor_data.csv");
        assert!(staged.exists());

        exporter.export(Channel::Gyro).unwrap().await.unwrap();
        assert!(!staged.exists());
    }

    #[tokio::test]
    async fn test_staging_fault_still_uploads() {
        let dir = tempdir().unwrap();
        let config = PipelineConfig {
            staging_dir: Some(dir.path().join("never-created")),
            ..PipelineConfig::default()
        };
        let (exporter, uploader) = build(&config);
        exporter.set_staging_ready(true);
        fill(&exporter.buffer, Channel::Accel, 1);

        let report = exporter.export(Channel::Accel).unwrap().await.unwrap();
        assert!(report.is_success());
        assert_eq!(uploader.calls().len(), 1);
    }
}
