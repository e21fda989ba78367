//! Incident report rendering.
//!
//! A pure function over a ledger snapshot; callers (CLI, dashboard)
//! decide where the document goes.

use chrono::Utc;

use vault_core::models::{AuditLogEntry, Severity};

/// Render a markdown incident report: system status, ledger volume, and
/// one line per `danger`-severity entry in ledger order.
pub fn build_incident_report(entries: &[AuditLogEntry], active: bool) -> String {
    let incidents: String = entries
        .iter()
        .filter(|e| e.status == Severity::Danger)
        .map(|e| {
            format!(
                "- [{}] **{}**: {}\n",
                e.timestamp.format("%H:%M:%S"),
                e.module,
                e.details
            )
        })
        .collect();

    format!(
        "# LLM-Vault Incident Report\n\n\
         **Date:** {date}\n\
         **System Status:** {status}\n\
         **Total Events:** {total}\n\n\
         ## Recent Incidents\n\
         {incidents}\n\
         ## Compliance\n\
         - Supply Chain: SHA-256 Verification Active\n\
         - Data Intake: Admission Gate Active\n\
         - Provenance: Append-Only Audit Ledger Active\n",
        date = Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        status = if active { "ACTIVE" } else { "KILL-SWITCH ENGAGED" },
        total = entries.len(),
        incidents = incidents,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;
    use vault_core::models::AuditModule;

    fn entry(status: Severity, details: &str) -> AuditLogEntry {
        AuditLogEntry {
            id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 7, 12, 30, 45).unwrap(),
            module: AuditModule::File,
            action: "Scan Complete".to_string(),
            status,
            details: details.to_string(),
            hash: "deadbeef".to_string(),
        }
    }

    #[test]
    fn lists_only_danger_entries() {
        let entries = vec![
            entry(Severity::Safe, "clean file"),
            entry(Severity::Danger, "prompt injection in dataset.csv"),
            entry(Severity::Warning, "oversize upload"),
        ];
        let report = build_incident_report(&entries, true);
        assert!(report.contains("prompt injection in dataset.csv"));
        assert!(!report.contains("clean file"));
        assert!(!report.contains("oversize upload"));
        assert!(report.contains("**Total Events:** 3"));
    }

    #[test]
    fn reflects_system_status() {
        assert!(build_incident_report(&[], true).contains("**System Status:** ACTIVE"));
        assert!(build_incident_report(&[], false).contains("**System Status:** KILL-SWITCH ENGAGED"));
    }

    #[test]
    fn incident_line_format() {
        let entries = vec![entry(Severity::Danger, "macro payload in sheet.xlsx")];
        let report = build_incident_report(&entries, true);
        assert!(report.contains("- [12:30:45] **File**: macro payload in sheet.xlsx"));
    }
}
