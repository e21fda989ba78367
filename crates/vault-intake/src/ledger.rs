//! Append-only audit ledger.
//!
//! The sole source of truth for compliance reporting. Entries are assigned
//! their id and timestamp at append time and are never mutated or removed;
//! insertion order is causal order. Appends from concurrent callers are
//! serialized by the interior lock.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use vault_core::models::{AuditEvent, AuditLogEntry};

use crate::state::SystemState;

pub struct AuditLedger {
    entries: RwLock<Vec<AuditLogEntry>>,
    state: Arc<SystemState>,
}

impl AuditLedger {
    pub fn new(state: Arc<SystemState>) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            state,
        }
    }

    /// Append one entry. Silently dropped while the kill switch is off;
    /// the toggle entries themselves go through [`Self::append_override`].
    pub async fn append(&self, event: AuditEvent) {
        if !self.state.is_active() {
            tracing::debug!(action = %event.action, "Ledger inactive, dropping entry");
            return;
        }
        self.push(event).await;
    }

    /// Append regardless of the kill switch. Reserved for the kill-switch
    /// toggle entries, which must be recorded in both directions.
    pub(crate) async fn append_override(&self, event: AuditEvent) {
        self.push(event).await;
    }

    async fn push(&self, event: AuditEvent) {
        let mut entries = self.entries.write().await;
        // Timestamps are clamped so insertion order is never contradicted.
        let now = Utc::now();
        let timestamp = entries.last().map_or(now, |prev| prev.timestamp.max(now));
        entries.push(AuditLogEntry {
            id: Uuid::new_v4(),
            timestamp,
            module: event.module,
            action: event.action,
            status: event.status,
            details: event.details,
            hash: event.hash,
        });
    }

    /// Full ordered history, oldest first.
    pub async fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_core::models::{AuditModule, Severity, HASH_NOT_APPLICABLE};

    fn event(action: &str) -> AuditEvent {
        AuditEvent::new(
            AuditModule::File,
            action,
            Severity::Safe,
            "details",
            HASH_NOT_APPLICABLE,
        )
    }

    #[tokio::test]
    async fn appends_in_insertion_order() {
        let ledger = AuditLedger::new(Arc::new(SystemState::new()));
        ledger.append(event("first")).await;
        ledger.append(event("second")).await;
        ledger.append(event("third")).await;

        let entries = ledger.entries().await;
        let actions: Vec<&str> = entries.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn timestamps_are_monotonic_and_ids_unique() {
        let ledger = AuditLedger::new(Arc::new(SystemState::new()));
        for i in 0..50 {
            ledger.append(event(&format!("event {i}"))).await;
        }
        let entries = ledger.entries().await;
        for pair in entries.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
        let mut ids: Vec<Uuid> = entries.iter().map(|e| e.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), entries.len());
    }

    #[tokio::test]
    async fn drops_entries_while_inactive() {
        let state = Arc::new(SystemState::new());
        let ledger = AuditLedger::new(state.clone());
        state.set_active(false);

        ledger.append(event("dropped")).await;
        assert!(ledger.is_empty().await);

        ledger.append_override(event("toggle")).await;
        assert_eq!(ledger.len().await, 1);
    }

    #[tokio::test]
    async fn concurrent_appends_all_land() {
        let ledger = Arc::new(AuditLedger::new(Arc::new(SystemState::new())));
        let mut handles = Vec::new();
        for i in 0..16 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move {
                ledger.append(event(&format!("task {i}"))).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(ledger.len().await, 16);
    }
}
