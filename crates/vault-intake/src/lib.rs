//! Vault Intake Library
//!
//! The intake core: accepts batches of untrusted file submissions, enforces
//! admission policy (size, extension allow-list, global kill switch),
//! sequences each accepted file through fingerprinting and a pluggable
//! content-safety scanner, tracks per-item lifecycle state, and records
//! every security-relevant action in an append-only audit ledger.
//!
//! Presentation concerns (dashboards, report downloads) consume this
//! crate's outputs; nothing here renders UI.

pub mod fingerprint;
pub mod gate;
pub mod ledger;
pub mod pipeline;
pub mod queue;
pub mod report;
pub mod scanner;
pub mod state;

pub use fingerprint::fingerprint;
pub use gate::AdmissionGate;
pub use ledger::AuditLedger;
pub use pipeline::IntakePipeline;
pub use queue::QueueManager;
pub use report::build_incident_report;
pub use scanner::{PassthroughScanner, Scanner};
#[cfg(feature = "clamav")]
pub use scanner::ClamAvScanner;
pub use state::SystemState;
