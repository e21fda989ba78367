//! Error types module
//!
//! Errors raised by the intake pipeline and its scan backends. Per-item
//! failures are converted into the item's terminal `error` state at the
//! processing boundary; only a whole-call lockdown rejection propagates
//! out of `submit`.

use uuid::Uuid;

use crate::models::ItemStatus;

/// Failure reported by a pluggable scan backend.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Scan backend unreachable: {0}")]
    Unavailable(String),

    #[error("Scan backend error: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("System kill switch engaged, intake halted")]
    Lockdown,

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Unsupported file extension: {extension} (allowed: {allowed:?})")]
    UnsupportedExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Fingerprint failed: {0}")]
    Fingerprint(String),

    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),

    #[error("Scan timed out after {0} seconds")]
    ScanTimeout(u64),

    #[error("Unknown item: {0}")]
    UnknownItem(Uuid),

    #[error("Illegal status transition for item {id}: {from} -> {to}")]
    IllegalTransition {
        id: Uuid,
        from: ItemStatus,
        to: ItemStatus,
    },
}

impl IntakeError {
    /// Admission rejections produce an audit entry; infrastructure faults
    /// (scan/fingerprint failures) stay out of the ledger.
    pub fn is_admission_rejection(&self) -> bool {
        matches!(
            self,
            IntakeError::FileTooLarge { .. }
                | IntakeError::UnsupportedExtension { .. }
                | IntakeError::InvalidFilename(_)
        )
    }
}
