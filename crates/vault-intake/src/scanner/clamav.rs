use std::str;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use clamav_client::{clean, Tcp};

use vault_core::models::{ScanTechnique, ScanVerdict};
use vault_core::ScanError;

use super::Scanner;

/// Scan backend talking to a ClamAV daemon over TCP.
///
/// An AV signature hit maps to a poisoned verdict tagged `macro` (the
/// executable-payload category); a miss maps to a clean verdict. Transport
/// and daemon failures surface as [`ScanError`] and become the item's
/// error state.
#[derive(Clone)]
pub struct ClamAvScanner {
    host: String,
    port: u16,
    /// Timeout in seconds for each daemon round-trip (default: 30).
    timeout_secs: u64,
}

impl ClamAvScanner {
    pub fn new(host: String, port: u16) -> Self {
        Self::with_timeout(host, port, 30)
    }

    /// Create with a custom daemon timeout (for large files or slow instances).
    pub fn with_timeout(host: String, port: u16, timeout_secs: u64) -> Self {
        Self {
            host,
            port,
            timeout_secs,
        }
    }
}

#[async_trait]
impl Scanner for ClamAvScanner {
    /// Scan in-memory data using the sync API inside `spawn_blocking` to
    /// avoid `!Send` tokio futures.
    async fn scan(&self, data: &[u8], fingerprint: &str) -> Result<ScanVerdict, ScanError> {
        let start = Instant::now();
        tracing::debug!(host = %self.host, port = %self.port, hash = %fingerprint, "Starting ClamAV scan");
        let data = data.to_vec();
        let host = self.host.clone();
        let port = self.port;
        let timeout_secs = self.timeout_secs;

        let result = tokio::time::timeout(
            Duration::from_secs(timeout_secs),
            tokio::task::spawn_blocking(move || {
                let address = format!("{}:{}", host, port);
                let connection = Tcp {
                    host_address: address.as_str(),
                };
                let response_bytes = clamav_client::scan_buffer(data.as_slice(), connection, None)
                    .map_err(|e| ScanError::Unavailable(format!("ClamAV scan error: {}", e)))?;
                let is_clean = clean(&response_bytes).map_err(|e| {
                    ScanError::Backend(format!("Failed to parse ClamAV response: {}", e))
                })?;
                if is_clean {
                    tracing::info!(
                        duration_ms = start.elapsed().as_millis(),
                        "ClamAV scan completed: clean"
                    );
                    return Ok(ScanVerdict::clean("ClamAV: no signature match"));
                }
                let response_str = str::from_utf8(&response_bytes).unwrap_or("unknown").trim();
                let signature = if response_str.contains("FOUND") {
                    response_str
                        .split(':')
                        .nth(1)
                        .unwrap_or("unknown")
                        .split_whitespace()
                        .next()
                        .unwrap_or("unknown")
                        .to_string()
                } else {
                    "unknown".to_string()
                };
                tracing::warn!(
                    duration_ms = start.elapsed().as_millis(),
                    signature = %signature,
                    "ClamAV scan detected malicious content"
                );
                Ok(ScanVerdict {
                    poisoned: true,
                    confidence: 1.0,
                    technique: ScanTechnique::Macro,
                    reason: format!("ClamAV signature match: {}", signature),
                    sanitized_excerpt: String::new(),
                })
            }),
        )
        .await;

        match result {
            Ok(Ok(verdict)) => verdict,
            Ok(Err(e)) => Err(ScanError::Backend(format!(
                "ClamAV scan task join error: {}",
                e
            ))),
            Err(_) => Err(ScanError::Unavailable(format!(
                "ClamAV scan timeout (exceeded {} seconds)",
                timeout_secs
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        let _scanner = ClamAvScanner::new("localhost".to_string(), 3310);
        let _scanner_custom = ClamAvScanner::with_timeout("localhost".to_string(), 3310, 60);
    }
}
