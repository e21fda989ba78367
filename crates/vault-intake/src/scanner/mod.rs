//! Pluggable content-safety scanner boundary.
//!
//! The pipeline treats a scanner as an opaque capability: one method, a
//! defined failure mode. Backend failures surface as the item's terminal
//! `error` state, never as a ledger event.

use async_trait::async_trait;

use vault_core::models::ScanVerdict;
use vault_core::ScanError;

#[cfg(feature = "clamav")]
mod clamav;
mod passthrough;

#[cfg(feature = "clamav")]
pub use clamav::ClamAvScanner;
pub use passthrough::PassthroughScanner;

/// Classifies file content for safety. Implementations may call external
/// services; the pipeline bounds each invocation with its configured
/// timeout.
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Classify the payload. `fingerprint` identifies the content for
    /// backends that cache or report per digest.
    async fn scan(&self, data: &[u8], fingerprint: &str) -> Result<ScanVerdict, ScanError>;
}
