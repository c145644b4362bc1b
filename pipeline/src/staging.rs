// Transient on-disk copy of the batch being uploaded. Not a durable log.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::constants::{STAGING_EXTENSION, STAGING_PROBE_FILE};
use crate::errors::StagingError;

#[derive(Debug, Clone, Default)]
pub struct StagingArea {
    dir: Option<PathBuf>,
}

impl StagingArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Staging that never touches the disk.
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    pub fn from_config(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => Self::new(dir),
            None => Self::disabled(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    /// Staging file of `batch_name`, if staging is enabled.
    pub fn path_for(&self, batch_name: &str) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(format!("{batch_name}.{STAGING_EXTENSION}")))
    }

    /// Creates the staging directory and checks it is writable.
    /// Returns Unavailable if either step fails.
    pub fn prepare(&self) -> Result<(), StagingError> {
        let Some(dir) = self.dir.as_ref() else {
            return Ok(());
        };
        let unavailable = |source| StagingError::Unavailable {
            path: dir.clone(),
            source,
        };

        std::fs::create_dir_all(dir).map_err(unavailable)?;
        let probe = dir.join(STAGING_PROBE_FILE);
        std::fs::write(&probe, b"").map_err(unavailable)?;
        std::fs::remove_file(&probe).map_err(unavailable)?;
        Ok(())
    }

    /// Overwrites the staging file of `batch_name` with `bytes`.
    /// Returns the written path, or None when staging is disabled.
    pub async fn write(
        &self,
        batch_name: &str,
        bytes: &[u8],
    ) -> Result<Option<PathBuf>, StagingError> {
        let Some(path) = self.path_for(batch_name) else {
            return Ok(None);
        };
        match tokio::fs::write(&path, bytes).await {
            Ok(()) => Ok(Some(path)),
            Err(source) => Err(StagingError::Write { path, source }),
        }
    }

    /// Deletes the staging file of `batch_name`. A missing file is not an error.
    pub async fn remove(&self, batch_name: &str) -> Result<(), StagingError> {
        let Some(path) = self.path_for(batch_name) else {
            return Ok(());
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StagingError::Write { path, source }),
        }
    }
}
