//! Intake pipeline: admission → fingerprint → scan → ledger.
//!
//! Items in a batch are processed strictly sequentially, in submission
//! order; each item's fingerprint→scan→ledger sequence completes before
//! the next item begins. This trades throughput for a deterministic audit
//! trail: ledger entries for a batch appear in the same order as the files
//! were submitted, which incident reconstruction depends on. Failures are
//! isolated per item; one bad file never aborts the batch.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use uuid::Uuid;

use vault_core::models::{
    AuditEvent, AuditLogEntry, AuditModule, FileSubmission, QueuedItem, ScanOutcome, Severity,
    HASH_NOT_APPLICABLE, HASH_ROOT_AUTH,
};
use vault_core::{IntakeConfig, IntakeError};

use crate::fingerprint::fingerprint;
use crate::gate::AdmissionGate;
use crate::ledger::AuditLedger;
use crate::queue::QueueManager;
use crate::scanner::Scanner;
use crate::state::SystemState;

pub struct IntakePipeline {
    config: IntakeConfig,
    gate: AdmissionGate,
    state: Arc<SystemState>,
    queue: QueueManager,
    ledger: Arc<AuditLedger>,
    scanner: Arc<dyn Scanner>,
}

impl IntakePipeline {
    pub fn new(config: IntakeConfig, scanner: Arc<dyn Scanner>) -> Self {
        let state = Arc::new(SystemState::new());
        let ledger = Arc::new(AuditLedger::new(state.clone()));
        Self {
            gate: AdmissionGate::new(&config),
            config,
            state,
            queue: QueueManager::new(),
            ledger,
            scanner,
        }
    }

    /// Submit a batch of files for intake.
    ///
    /// While the kill switch is engaged the whole call aborts with
    /// [`IntakeError::Lockdown`] before any item is touched. Otherwise the
    /// batch is enqueued as `pending` (visible to readers immediately) and
    /// processed sequentially; per-item failures land in the item's error
    /// state and never propagate out of this call. Returns the assigned
    /// item ids in submission order.
    #[tracing::instrument(skip(self, batch), fields(batch_len = batch.len()))]
    pub async fn submit(&self, batch: Vec<FileSubmission>) -> Result<Vec<Uuid>, IntakeError> {
        if !self.state.is_active() {
            tracing::warn!("Kill switch engaged, rejecting batch");
            return Err(IntakeError::Lockdown);
        }

        let items: Vec<QueuedItem> = batch.iter().map(QueuedItem::pending).collect();
        let ids: Vec<Uuid> = items.iter().map(|i| i.id).collect();
        self.queue.push_batch(items).await;

        for (id, submission) in ids.iter().zip(batch) {
            self.process_item(*id, submission).await;
        }

        Ok(ids)
    }

    async fn process_item(&self, id: Uuid, submission: FileSubmission) {
        if let Err(rejection) = self.gate.admit(&submission) {
            tracing::info!(item_id = %id, file = %submission.name, reason = %rejection, "Upload rejected");
            self.set_item_error(id, rejection.to_string()).await;
            let details = match rejection {
                IntakeError::FileTooLarge { .. } => {
                    format!("Size limit exceeded: {}", submission.name)
                }
                _ => format!("Unsupported file type: {}", submission.name),
            };
            self.ledger
                .append(AuditEvent::new(
                    AuditModule::File,
                    "Upload Rejected",
                    Severity::Warning,
                    details,
                    HASH_NOT_APPLICABLE,
                ))
                .await;
            return;
        }

        if let Err(err) = self.scan_item(id, &submission).await {
            // Infrastructure faults are recorded on the item, not in the
            // ledger: they are not security events.
            tracing::warn!(item_id = %id, file = %submission.name, error = %err, "Scan pipeline failed for item");
            self.set_item_error(id, err.to_string()).await;
        }
    }

    async fn scan_item(&self, id: Uuid, submission: &FileSubmission) -> Result<(), IntakeError> {
        self.queue.mark_scanning(id).await?;

        let hash = fingerprint(&submission.data);
        self.ledger
            .append(AuditEvent::new(
                AuditModule::File,
                "Hash Calculation",
                Severity::Safe,
                format!("Calculated SHA-256 for {}", submission.name),
                hash.clone(),
            ))
            .await;

        let scan = timeout(
            Duration::from_secs(self.config.scan_timeout_secs),
            self.scanner.scan(&submission.data, &hash),
        )
        .await;
        let verdict = match scan {
            Ok(result) => result?,
            Err(_) => return Err(IntakeError::ScanTimeout(self.config.scan_timeout_secs)),
        };

        let status = if verdict.poisoned {
            Severity::Danger
        } else {
            Severity::Safe
        };
        let details = verdict.reason.clone();
        self.queue
            .mark_complete(id, ScanOutcome::from_verdict(hash.clone(), verdict))
            .await?;
        self.ledger
            .append(AuditEvent::new(
                AuditModule::File,
                "Scan Complete",
                status,
                details,
                hash,
            ))
            .await;
        Ok(())
    }

    async fn set_item_error(&self, id: Uuid, message: String) {
        if let Err(e) = self.queue.mark_error(id, message).await {
            tracing::error!(item_id = %id, error = %e, "Failed to record item error");
        }
    }

    /// Toggle the kill switch. The audit entry is recorded unconditionally,
    /// in both directions, with the privileged-action hash sentinel.
    #[tracing::instrument(skip(self))]
    pub async fn set_active(&self, active: bool) {
        self.state.set_active(active);
        let action = if active {
            "System Reactivated"
        } else {
            "KILL SWITCH ENGAGED"
        };
        tracing::warn!(active, "{}", action);
        self.ledger
            .append_override(AuditEvent::new(
                AuditModule::System,
                action,
                Severity::Warning,
                "Manual override by admin",
                HASH_ROOT_AUTH,
            ))
            .await;
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Snapshot of the item queue in submission order.
    pub async fn queue(&self) -> Vec<QueuedItem> {
        self.queue.snapshot().await
    }

    pub async fn item(&self, id: Uuid) -> Option<QueuedItem> {
        self.queue.get(id).await
    }

    /// Snapshot of the audit ledger, oldest first.
    pub async fn ledger(&self) -> Vec<AuditLogEntry> {
        self.ledger.entries().await
    }
}
