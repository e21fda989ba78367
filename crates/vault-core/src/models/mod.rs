pub mod audit;
pub mod item;
pub mod verdict;

pub use audit::{AuditEvent, AuditLogEntry, AuditModule, Severity, HASH_NOT_APPLICABLE, HASH_ROOT_AUTH};
pub use item::{FileSubmission, ItemStatus, QueuedItem};
pub use verdict::{ScanOutcome, ScanTechnique, ScanVerdict};
