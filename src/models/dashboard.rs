use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BudgetRecord, PieSlice, Todo};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub todos: Vec<Todo>,
    pub active_count: usize,
    pub max_active: usize,
    pub has_overdue: bool,
    pub can_add: bool,
    pub overdue_banner: Option<String>,
    pub warning: Option<String>,
    pub snooze_options: Vec<i64>,
    pub default_snooze_hours: i64,
    pub budget: BudgetRecord,
    pub slices: [PieSlice; 3],
    pub clock: String,
    pub updated_at: i64,
}
