use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::{Camera, Photo};
use crate::error::PontoError;

/// Camera backed by a pre-staged image file, used by the CLI to exercise
/// the capture flow on hosts without camera hardware. The quality knob is
/// accepted for interface parity and ignored.
pub struct FileCamera {
    path: PathBuf,
}

impl FileCamera {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Camera for FileCamera {
    async fn take_picture(&self, quality: f32) -> Result<Photo, PontoError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| PontoError::Capture(format!("{}: {e}", self.path.display())))?;

        if !metadata.is_file() {
            return Err(PontoError::Capture(format!(
                "{} is not a file",
                self.path.display()
            )));
        }

        debug!(path = %self.path.display(), quality, "picture taken");
        Ok(Photo {
            uri: format!("file://{}", self.path.display()),
        })
    }
}
