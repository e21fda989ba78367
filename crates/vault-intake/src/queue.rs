//! Queue manager: owns the collection of submitted items and is the only
//! writer of their lifecycle state.
//!
//! Legal transitions are `pending -> scanning -> {complete | error}` plus
//! `pending -> error` for admission rejections. Terminal states are never
//! overwritten; an attempt is an [`IntakeError::IllegalTransition`].

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use vault_core::models::{ItemStatus, QueuedItem, ScanOutcome};
use vault_core::IntakeError;

#[derive(Clone, Default)]
pub struct QueueManager {
    items: Arc<RwLock<Vec<QueuedItem>>>,
}

impl QueueManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch of `Pending` items, making the whole batch visible to
    /// readers before any scanning starts.
    pub async fn push_batch(&self, batch: Vec<QueuedItem>) {
        let mut items = self.items.write().await;
        items.extend(batch);
    }

    pub async fn mark_scanning(&self, id: Uuid) -> Result<(), IntakeError> {
        self.transition(id, ItemStatus::Scanning, |item| {
            item.status = ItemStatus::Scanning;
        })
        .await
    }

    pub async fn mark_complete(&self, id: Uuid, outcome: ScanOutcome) -> Result<(), IntakeError> {
        self.transition(id, ItemStatus::Complete, |item| {
            item.status = ItemStatus::Complete;
            item.result = Some(outcome);
        })
        .await
    }

    pub async fn mark_error(&self, id: Uuid, message: String) -> Result<(), IntakeError> {
        self.transition(id, ItemStatus::Error, |item| {
            item.status = ItemStatus::Error;
            item.error_message = Some(message);
        })
        .await
    }

    /// Point-in-time copy of the queue in submission order.
    pub async fn snapshot(&self) -> Vec<QueuedItem> {
        self.items.read().await.clone()
    }

    pub async fn get(&self, id: Uuid) -> Option<QueuedItem> {
        self.items.read().await.iter().find(|i| i.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    async fn transition(
        &self,
        id: Uuid,
        to: ItemStatus,
        apply: impl FnOnce(&mut QueuedItem),
    ) -> Result<(), IntakeError> {
        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(IntakeError::UnknownItem(id))?;

        let from = item.status;
        let legal = match to {
            ItemStatus::Scanning => from == ItemStatus::Pending,
            ItemStatus::Complete => from == ItemStatus::Scanning,
            ItemStatus::Error => !from.is_terminal(),
            ItemStatus::Pending => false,
        };
        if !legal {
            return Err(IntakeError::IllegalTransition { id, from, to });
        }

        apply(item);
        debug_assert!(item.state_consistent());
        tracing::debug!(item_id = %id, from = %from, to = %to, "Item transition");
        Ok(())
    }
}
