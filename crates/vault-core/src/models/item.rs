use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

use crate::models::verdict::ScanOutcome;

/// A file handed to the intake pipeline by a caller. The payload bytes are
/// owned exclusively by the submission; the pipeline consumes them during
/// processing and only metadata survives in the queue.
#[derive(Debug, Clone)]
pub struct FileSubmission {
    pub name: String,
    /// Declared content type (e.g. "application/pdf"). Informational only;
    /// admission policy keys off size and file-name extension.
    pub declared_type: String,
    pub data: Vec<u8>,
}

impl FileSubmission {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            data,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Pending,
    Scanning,
    Complete,
    Error,
}

impl ItemStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ItemStatus::Complete | ItemStatus::Error)
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ItemStatus::Pending => write!(f, "pending"),
            ItemStatus::Scanning => write!(f, "scanning"),
            ItemStatus::Complete => write!(f, "complete"),
            ItemStatus::Error => write!(f, "error"),
        }
    }
}

impl FromStr for ItemStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ItemStatus::Pending),
            "scanning" => Ok(ItemStatus::Scanning),
            "complete" => Ok(ItemStatus::Complete),
            "error" => Ok(ItemStatus::Error),
            _ => Err(anyhow::anyhow!("Invalid item status: {}", s)),
        }
    }
}

/// One file's journey through the pipeline.
///
/// Exactly one of `result` / `error_message` is set in a terminal state
/// (`result` iff `Complete`, `error_message` iff `Error`); neither is set
/// while the item is `Pending` or `Scanning`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedItem {
    pub id: Uuid,
    pub file_name: String,
    pub declared_type: String,
    pub size_bytes: usize,
    pub status: ItemStatus,
    pub result: Option<ScanOutcome>,
    pub error_message: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl QueuedItem {
    /// Create a fresh `Pending` item for a submission, assigning its id.
    pub fn pending(submission: &FileSubmission) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: submission.name.clone(),
            declared_type: submission.declared_type.clone(),
            size_bytes: submission.size_bytes(),
            status: ItemStatus::Pending,
            result: None,
            error_message: None,
            submitted_at: Utc::now(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether status and the result/error fields agree.
    pub fn state_consistent(&self) -> bool {
        match self.status {
            ItemStatus::Pending | ItemStatus::Scanning => {
                self.result.is_none() && self.error_message.is_none()
            }
            ItemStatus::Complete => self.result.is_some() && self.error_message.is_none(),
            ItemStatus::Error => self.result.is_none() && self.error_message.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(len: usize) -> FileSubmission {
        FileSubmission::new("report.pdf", "application/pdf", vec![0u8; len])
    }

    #[test]
    fn item_status_display() {
        assert_eq!(ItemStatus::Pending.to_string(), "pending");
        assert_eq!(ItemStatus::Scanning.to_string(), "scanning");
        assert_eq!(ItemStatus::Complete.to_string(), "complete");
        assert_eq!(ItemStatus::Error.to_string(), "error");
    }

    #[test]
    fn item_status_from_str() {
        assert_eq!("pending".parse::<ItemStatus>().unwrap(), ItemStatus::Pending);
        assert_eq!("error".parse::<ItemStatus>().unwrap(), ItemStatus::Error);
        assert!("done".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn terminal_states() {
        assert!(!ItemStatus::Pending.is_terminal());
        assert!(!ItemStatus::Scanning.is_terminal());
        assert!(ItemStatus::Complete.is_terminal());
        assert!(ItemStatus::Error.is_terminal());
    }

    #[test]
    fn pending_item_carries_submission_metadata() {
        let item = QueuedItem::pending(&submission(42));
        assert_eq!(item.file_name, "report.pdf");
        assert_eq!(item.declared_type, "application/pdf");
        assert_eq!(item.size_bytes, 42);
        assert_eq!(item.status, ItemStatus::Pending);
        assert!(item.state_consistent());
    }

    #[test]
    fn pending_items_get_distinct_ids() {
        let a = QueuedItem::pending(&submission(1));
        let b = QueuedItem::pending(&submission(1));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn state_consistency_detects_mismatches() {
        let mut item = QueuedItem::pending(&submission(1));
        item.status = ItemStatus::Error;
        assert!(!item.state_consistent());
        item.error_message = Some("scanner unreachable".to_string());
        assert!(item.state_consistent());
        item.status = ItemStatus::Complete;
        assert!(!item.state_consistent());
    }
}
