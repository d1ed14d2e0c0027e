use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub snoozed_until: Option<DateTime<Utc>>,
    pub is_overdue: bool,
}

impl Todo {
    pub fn new(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
            created_at,
            completed_at: None,
            snoozed_until: None,
            is_overdue: false,
        }
    }

    /// Incomplete and currently flagged overdue.
    pub fn is_blocking(&self) -> bool {
        !self.completed && self.is_overdue
    }
}

/// Result of an add request. Rejections are policy outcomes, not failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "id", rename_all = "snake_case")]
pub enum AddOutcome {
    Added(String),
    EmptyText,
    CapacityReached,
    OverdueTasksPending,
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }
}
