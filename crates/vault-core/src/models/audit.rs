use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// Hash sentinel for events that are not derived from file content.
pub const HASH_NOT_APPLICABLE: &str = "N/A";
/// Hash sentinel for privileged manual actions (kill-switch toggles).
pub const HASH_ROOT_AUTH: &str = "ROOT_AUTH";

/// Subsystem that originated an audit event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AuditModule {
    Input,
    Output,
    File,
    System,
    Network,
    Model,
}

impl Display for AuditModule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AuditModule::Input => write!(f, "Input"),
            AuditModule::Output => write!(f, "Output"),
            AuditModule::File => write!(f, "File"),
            AuditModule::System => write!(f, "System"),
            AuditModule::Network => write!(f, "Network"),
            AuditModule::Model => write!(f, "Model"),
        }
    }
}

/// Event severity as it appears in compliance reporting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Safe,
    Warning,
    Danger,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Severity::Safe => write!(f, "safe"),
            Severity::Warning => write!(f, "warning"),
            Severity::Danger => write!(f, "danger"),
        }
    }
}

/// Fields a component supplies when requesting an append; the ledger
/// assigns the id and timestamp.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub module: AuditModule,
    pub action: String,
    pub status: Severity,
    pub details: String,
    pub hash: String,
}

impl AuditEvent {
    pub fn new(
        module: AuditModule,
        action: impl Into<String>,
        status: Severity,
        details: impl Into<String>,
        hash: impl Into<String>,
    ) -> Self {
        Self {
            module,
            action: action.into(),
            status,
            details: details.into(),
            hash: hash.into(),
        }
    }
}

/// One immutable entry of the append-only audit ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub module: AuditModule,
    pub action: String,
    pub status: Severity,
    pub details: String,
    pub hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_module_display() {
        assert_eq!(AuditModule::File.to_string(), "File");
        assert_eq!(AuditModule::System.to_string(), "System");
        assert_eq!(AuditModule::Network.to_string(), "Network");
    }

    #[test]
    fn severity_display() {
        assert_eq!(Severity::Safe.to_string(), "safe");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Danger.to_string(), "danger");
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Danger).unwrap(), "\"danger\"");
    }

    #[test]
    fn event_constructor() {
        let event = AuditEvent::new(
            AuditModule::File,
            "Upload Rejected",
            Severity::Warning,
            "Size limit exceeded: big.bin",
            HASH_NOT_APPLICABLE,
        );
        assert_eq!(event.action, "Upload Rejected");
        assert_eq!(event.hash, "N/A");
    }
}
