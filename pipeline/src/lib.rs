//! # Crate pipeline-rs
//!
//! ## pipeline-rs
//!
//! The `pipeline-rs` crate accumulates motion-sensor readings in memory and
//! periodically ships them to a remote collector.
//!
//! Features include:
//! - Per-channel sample buffers safe to feed from sensor callback threads.
//! - Deterministic CSV serialization of each batch (`t,x,y,z` header).
//! - A fixed-interval scheduler that uploads each channel independently and
//!   removes samples only once their upload is confirmed (at-least-once delivery).
//! - Optional on-disk staging of the batch in flight, upload health tracking and
//!   listeners for live samples and upload outcomes.
//!
//! ### Example
//!
//! ```no_run
//! use pipeline_rs::{init_logging, run_service, PipelineConfig};
//! use common::types::Channel;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging();
//!     let pipeline = run_service(PipelineConfig::load("sensor-uplink.toml")?)?;
//!     pipeline.start()?;
//!
//!     // Called from the sensor callback.
//!     pipeline.on_raw_event(Channel::Accel, 0.1, 0.2, 9.8);
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(3)).await;
//!     for upload in pipeline.stop() {
//!         upload.await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod buffer;
pub mod config;
pub mod constants;
pub mod errors;
mod exporter;
pub mod health;
pub mod logging;
pub mod scheduler;
pub mod serializer;
pub mod services;
pub mod staging;
mod utils;

pub use buffer::SampleBuffer;
pub use config::{BatchNames, PipelineConfig, StagingPolicy};
pub use errors::{PipelineError, StagingError};
pub use health::UploadHealth;
pub use logging::init_logging;
pub use scheduler::PipelineScheduler;
pub use serializer::BatchSerializer;
pub use services::{run_service, HttpPipeline};
pub use staging::StagingArea;
