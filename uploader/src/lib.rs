//! # Crate uploader-rs
//!
//! ## uploader-rs
//!
//! The `uploader-rs` crate ships serialized sensor batches to the remote collector.
//!
//! Features include:
//! - Multipart CSV upload of one batch per request, tagged with a destination bucket.
//! - Walking-session start/finish announcements as JSON.
//! - Mock adapters with scripted outcomes, so retry policies can be exercised without a network.
//!
//! Nothing in this crate retries: every call is a single attempt and the outcome is
//! reported to the caller, which owns the retry policy.

pub mod adapters;
pub mod config;
pub mod constants;
mod http_client;
pub(crate) mod models;
pub mod services;

pub use adapters::mock::{MockSessionNotifier, MockUploader, UploadCall};
pub use adapters::noop::NoopSessionNotifier;
pub use adapters::production::{HttpSessionNotifier, HttpUploader};
pub use config::{SessionConfig, UploadConfig};
pub use services::{build_session_notifier, build_uploader, SessionNotifier};
