//! Admission policy applied before a file enters the pipeline.
//!
//! Per-item checks only: the size limit and the extension allow-list. The
//! whole-call lockdown check lives in [`crate::pipeline::IntakePipeline::submit`],
//! which rejects the batch before any item is touched.

use std::path::Path;

use vault_core::models::FileSubmission;
use vault_core::{IntakeConfig, IntakeError};

pub struct AdmissionGate {
    max_file_size_bytes: usize,
    allowed_extensions: Vec<String>,
}

impl AdmissionGate {
    pub fn new(config: &IntakeConfig) -> Self {
        Self {
            max_file_size_bytes: config.max_file_size_bytes,
            allowed_extensions: config.allowed_extensions.clone(),
        }
    }

    /// Accept or reject one submission. A rejection is isolated to the
    /// offending item; siblings in the same batch still proceed.
    pub fn admit(&self, submission: &FileSubmission) -> Result<(), IntakeError> {
        let size = submission.size_bytes();
        if size > self.max_file_size_bytes {
            return Err(IntakeError::FileTooLarge {
                size,
                max: self.max_file_size_bytes,
            });
        }

        let extension = Path::new(&submission.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| IntakeError::InvalidFilename(submission.name.clone()))?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(IntakeError::UnsupportedExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(())
    }
}
