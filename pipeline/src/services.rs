use std::sync::Arc;

use common::types::MonotonicClock;
use uploader_rs::{build_session_notifier, build_uploader, HttpUploader, SessionNotifier};

use crate::config::PipelineConfig;
use crate::errors::PipelineError;
use crate::scheduler::PipelineScheduler;

/// Scheduler wired to the production HTTP adapters.
pub type HttpPipeline = PipelineScheduler<HttpUploader, SessionNotifier>;

/// Builds a stopped scheduler that uploads to the collector described in `config`.
///
/// Must be called from within a tokio runtime. Returns a Config error if the
/// configuration is invalid and an Upload error if the http client cannot be
/// created. Call `start()` on the result to begin sensing.
pub fn run_service(config: PipelineConfig) -> Result<Arc<HttpPipeline>, PipelineError> {
    config.validate()?;
    let uploader = build_uploader(&config.upload)?;
    let notifier = build_session_notifier(&config.upload, &config.session)?;
    log::info!(
        "Uploading batches to {} (bucket {})",
        config.upload.csv_url(),
        config.upload.bucket
    );

    let scheduler = PipelineScheduler::new(
        config,
        Arc::new(uploader),
        Arc::new(notifier),
        Arc::new(MonotonicClock::new()),
    )?;
    Ok(Arc::new(scheduler))
}
