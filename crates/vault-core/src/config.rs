//! Configuration module
//!
//! Admission thresholds and scanner settings for the intake pipeline,
//! with environment-variable overrides for deployments.

use std::env;

/// Maximum admissible file size (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;
/// Ceiling on a single scan backend invocation.
pub const DEFAULT_SCAN_TIMEOUT_SECS: u64 = 30;
/// File-name suffixes admitted by default.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "docx", "xlsx", "csv", "json", "py", "ipynb", "txt", "md",
];

#[derive(Clone, Debug)]
pub struct IntakeConfig {
    pub max_file_size_bytes: usize,
    /// Lowercase extensions without the leading dot.
    pub allowed_extensions: Vec<String>,
    pub scan_timeout_secs: u64,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            scan_timeout_secs: DEFAULT_SCAN_TIMEOUT_SECS,
        }
    }
}

impl IntakeConfig {
    /// Build from environment variables, falling back to the defaults:
    /// `VAULT_MAX_FILE_SIZE_BYTES`, `VAULT_ALLOWED_EXTENSIONS`
    /// (comma-separated, leading dots tolerated), `VAULT_SCAN_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_file_size_bytes: env::var("VAULT_MAX_FILE_SIZE_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_file_size_bytes),
            allowed_extensions: env::var("VAULT_ALLOWED_EXTENSIONS")
                .ok()
                .map(|s| parse_extension_list(&s))
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.allowed_extensions),
            scan_timeout_secs: env::var("VAULT_SCAN_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.scan_timeout_secs),
        }
    }
}

/// Normalize a comma-separated extension list: trim, lowercase, strip a
/// leading dot, drop empties.
fn parse_extension_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
