use log::{debug, error, info, trace, warn};
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use uuid::Uuid;

use common::traits::{Notifiable, SessionPort, TimeSource, UploadPort};
use common::types::{Channel, RawEvent, Sample, Session, UploadReport};
use publisher::{LatestSamples, Publishable, PublisherError, PublisherManager};

use crate::buffer::SampleBuffer;
use crate::config::{PipelineConfig, StagingPolicy};
use crate::errors::PipelineError;
use crate::exporter::Exporter;
use crate::health::UploadHealth;
use crate::utils::lock;

#[derive(Debug, Clone, Copy)]
enum Announcement {
    Started,
    Finished,
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Announcement::Started => f.write_str("start"),
            Announcement::Finished => f.write_str("finish"),
        }
    }
}

/// Owns the sensing session and drives the periodic export of buffered samples.
///
/// Raw sensor events are stamped with the time elapsed since the first sample of
/// the session and appended to the per-channel buffers. Every tick each channel
/// is snapshotted, serialized and uploaded in its own task; only a confirmed
/// upload removes the exported samples, so failed batches are resent on the
/// next tick together with whatever arrived in between (at-least-once).
///
/// Lock order is tick gate, then session, then channel buffer. Raw events hold
/// the session lock across the append, so nothing is accepted once `stop()`
/// has returned. Ticks and `stop()` serialize on the tick gate and only take
/// the session lock to check that the session is still current, so a large
/// backlog being snapshotted never holds up the sensor thread.
pub struct PipelineScheduler<U, N>
where
    U: UploadPort + 'static,
    N: SessionPort + 'static,
{
    config: PipelineConfig,
    session: Arc<Mutex<Session>>,
    tick_gate: Arc<Mutex<()>>,
    exporter: Arc<Exporter<U>>,
    notifier: Arc<N>,
    clock: Arc<dyn TimeSource>,
    latest: LatestSamples,
    sample_publishers: PublisherManager<Sample, Channel>,
    tick_task: Mutex<Option<JoinHandle<()>>>,
    runtime: Handle,
}

impl<U, N> PipelineScheduler<U, N>
where
    U: UploadPort + 'static,
    N: SessionPort + 'static,
{
    /// Creates a stopped scheduler bound to the current tokio runtime.
    /// Returns a Config error if `config` is invalid and a Runtime error when
    /// called outside a runtime.
    pub fn new(
        config: PipelineConfig,
        uploader: Arc<U>,
        notifier: Arc<N>,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, PipelineError> {
        let runtime = Handle::try_current().map_err(|e| PipelineError::Runtime(e.to_string()))?;
        Self::with_runtime(config, uploader, notifier, clock, runtime)
    }

    /// Creates a stopped scheduler that spawns its ticks and uploads on `runtime`.
    pub fn with_runtime(
        config: PipelineConfig,
        uploader: Arc<U>,
        notifier: Arc<N>,
        clock: Arc<dyn TimeSource>,
        runtime: Handle,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        let exporter = Exporter::new(
            &config,
            Arc::new(SampleBuffer::new()),
            uploader,
            runtime.clone(),
        );

        Ok(Self {
            config,
            session: Arc::new(Mutex::new(Session::new())),
            tick_gate: Arc::new(Mutex::new(())),
            exporter: Arc::new(exporter),
            notifier,
            clock,
            latest: LatestSamples::new(),
            sample_publishers: PublisherManager::new(&Channel::ALL),
            tick_task: Mutex::new(None),
            runtime,
        })
    }

    /// Begins a sensing session. Does nothing if one is already running.
    ///
    /// Returns a Staging error if the staging directory is unusable and the
    /// staging policy is `Refuse`; the scheduler then stays stopped.
    pub fn start(&self) -> Result<(), PipelineError> {
        if self.is_sensing() {
            debug!("Start requested while sensing, ignoring");
            return Ok(());
        }

        // Disk probing happens before the session lock is taken.
        self.prepare_staging()?;

        let mut session = lock(&self.session);
        if session.is_active() {
            debug!("Start requested while sensing, ignoring");
            return Ok(());
        }
        *session = session.started();
        self.arm_tick(session.epoch());
        drop(session);

        self.announce(Announcement::Started);
        info!(
            "Sensing started, exporting every {} ms",
            self.config.tick_interval_ms
        );
        Ok(())
    }

    /// Ends the sensing session. Does nothing if already stopped.
    ///
    /// Uploads in flight keep running and still clear what they exported. With
    /// `flush_on_stop`, a final batch of every channel is exported and the
    /// handles of those uploads are returned.
    pub fn stop(&self) -> Vec<JoinHandle<UploadReport>> {
        let gate = lock(&self.tick_gate);
        {
            let mut session = lock(&self.session);
            if !session.is_active() {
                debug!("Stop requested while stopped, ignoring");
                return Vec::new();
            }
            *session = session.stopped();
        }

        if let Some(tick_task) = lock(&self.tick_task).take() {
            tick_task.abort();
        }
        let flushed = if self.config.flush_on_stop {
            self.exporter.export_all()
        } else {
            Vec::new()
        };
        drop(gate);

        self.announce(Announcement::Finished);
        info!("Sensing stopped");
        flushed
    }

    pub fn on_raw_event(&self, channel: Channel, x: f64, y: f64, z: f64) {
        self.on_event(RawEvent::new(channel, x, y, z));
    }

    /// Stamps `event` and buffers it. Events received while stopped are dropped.
    ///
    /// Never blocks on I/O, so it can be called from the sensor callback thread.
    pub fn on_event(&self, event: RawEvent) {
        let mut session = lock(&self.session);
        // Read under the lock so stamps follow append order.
        let now = self.clock.now_millis();
        let (next, elapsed_ms) = session.observe(now);
        let Some(elapsed_ms) = elapsed_ms else {
            trace!("Dropping {} event, not sensing", event.channel);
            return;
        };
        *session = next;
        let sample = event.into_sample(elapsed_ms);
        self.exporter.buffer.append(sample);
        drop(session);

        self.latest.update(sample);
        self.sample_publishers
            .notify_listeners(sample.channel(), Arc::new(sample));
    }

    /// Runs one export round right away. Ignored while stopped.
    pub fn on_tick(&self) -> Vec<JoinHandle<UploadReport>> {
        let _gate = lock(&self.tick_gate);
        if !self.is_sensing() {
            debug!("Tick while stopped, ignoring");
            return Vec::new();
        }
        self.exporter.export_all()
    }

    pub fn is_sensing(&self) -> bool {
        lock(&self.session).is_active()
    }

    pub fn session(&self) -> Session {
        *lock(&self.session)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Samples of `channel` waiting to be delivered.
    pub fn buffered(&self, channel: Channel) -> usize {
        self.exporter.buffer.len(channel)
    }

    pub fn latest_samples(&self) -> LatestSamples {
        self.latest.clone()
    }

    pub fn upload_health(&self, channel: Channel) -> UploadHealth {
        self.exporter.health.get(channel)
    }

    /// Subscribes `listener` to every sample buffered for `channel`.
    ///
    /// Listeners run on the sensor callback thread and must return quickly.
    pub fn register_sample_listener(
        &self,
        listener: &mut dyn Notifiable<Sample>,
        channel: Channel,
    ) -> Result<Uuid, PublisherError> {
        self.sample_publishers.add_listener(listener, &channel)
    }

    pub fn unregister_sample_listener(&self, id: Uuid) -> Result<(), PublisherError> {
        self.sample_publishers.remove_listener(id)
    }

    /// Subscribes `listener` to the outcome of every upload attempt.
    pub fn register_upload_listener(&self, listener: &mut dyn Notifiable<UploadReport>) -> Uuid {
        self.exporter.reports.register_listener(listener)
    }

    pub fn unregister_upload_listener(&self, id: Uuid) -> Result<(), PublisherError> {
        self.exporter.reports.unregister_listener(id)
    }

    fn prepare_staging(&self) -> Result<(), PipelineError> {
        match self.exporter.staging.prepare() {
            Ok(()) => {
                self.exporter
                    .set_staging_ready(self.exporter.staging.is_enabled());
                Ok(())
            }
            Err(e) => {
                self.exporter.set_staging_ready(false);
                match self.config.staging_policy {
                    StagingPolicy::Degrade => {
                        warn!("{}; continuing without staging files", e);
                        Ok(())
                    }
                    StagingPolicy::Refuse => {
                        error!("{}; refusing to start", e);
                        Err(e.into())
                    }
                }
            }
        }
    }

    fn arm_tick(&self, epoch: u64) {
        let period = self.config.tick_interval();
        let session = Arc::clone(&self.session);
        let tick_gate = Arc::clone(&self.tick_gate);
        let exporter = Arc::clone(&self.exporter);

        let tick_task = self.runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let is_current = {
                    let _gate = lock(&tick_gate);
                    let is_current = lock(&session).is_current(epoch);
                    if is_current {
                        // Upload tasks are detached; their outcome reaches listeners and health.
                        let _ = exporter.export_all();
                    }
                    is_current
                };
                if !is_current {
                    debug!("Tick loop of session {} finished", epoch);
                    break;
                }
            }
        });

        if let Some(stale) = lock(&self.tick_task).replace(tick_task) {
            stale.abort();
        }
    }

    fn announce(&self, announcement: Announcement) {
        let notifier = Arc::clone(&self.notifier);
        self.runtime.spawn(async move {
            let outcome = match announcement {
                Announcement::Started => notifier.session_started().await,
                Announcement::Finished => notifier.session_finished().await,
            };
            match outcome {
                Ok(ack) => debug!("Session {} acknowledged ({})", announcement, ack.status),
                Err(e) => error!("Session {} notification failed: {}", announcement, e),
            }
        });
    }
}

impl<U, N> Drop for PipelineScheduler<U, N>
where
    U: UploadPort + 'static,
    N: SessionPort + 'static,
{
    fn drop(&mut self) {
        if let Some(tick_task) = lock(&self.tick_task).take() {
            tick_task.abort();
        }
    }
}
