//! Module errors

use std::path::PathBuf;
use thiserror::Error;

use common::errors::UploadError;

/// Failures of the transient on-disk staging copy of a batch.
#[derive(Debug, Error)]
pub enum StagingError {
    /// The staging file could not be written (IOFault). The batch is still
    /// uploaded from memory.
    #[error("could not write staging file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The staging directory cannot be created or written to (PermissionFault).
    #[error("staging directory {path} unavailable: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Represents the different types of errors surfaced by the pipeline.
///
/// Only construction and `start()` return errors; the tick path reports
/// its failures through logs, `UploadHealth` and upload listeners.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Staging(#[from] StagingError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("could not encode batch: {0}")]
    Serialize(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// No tokio runtime was available to drive ticks and uploads.
    #[error("no async runtime available: {0}")]
    Runtime(String),
}
