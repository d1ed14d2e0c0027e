use serde::{Deserialize, Serialize};

use super::BudgetRecord;

pub const DEFAULT_MAX_ACTIVE: usize = 6;
pub const DEFAULT_OVERDUE_THRESHOLD_HOURS: i64 = 48;
pub const DEFAULT_OVERDUE_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_CLOCK_INTERVAL_SECS: u64 = 1;
pub const DEFAULT_WARNING_CLEAR_SECS: i64 = 3;
pub const DEFAULT_SNOOZE_HOURS: i64 = 1;
pub const DEFAULT_SNOOZE_OPTIONS: [i64; 5] = [1, 2, 4, 8, 24];

/// Upper bound for any hour-valued setting (ten years).
pub const MAX_HOURS: i64 = 24 * 365 * 10;
pub const MAX_WARNING_CLEAR_SECS: i64 = 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub todo: TodoSettings,
    #[serde(default)]
    pub scheduler: SchedulerSettings,
    #[serde(default)]
    pub budget: BudgetRecord,
    #[serde(default)]
    pub suggestion: SuggestionSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            todo: TodoSettings::default(),
            scheduler: SchedulerSettings::default(),
            budget: BudgetRecord::default(),
            suggestion: SuggestionSettings::default(),
            notifications: NotificationSettings::default(),
        }
    }
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl Settings {
    /// Clamps values that would otherwise overflow timestamp arithmetic and
    /// drops snooze options outside `1..=MAX_HOURS`.
    pub fn normalized(mut self) -> Self {
        let todo = &mut self.todo;
        todo.max_active = todo.max_active.max(1);
        todo.overdue_threshold_hours = todo.overdue_threshold_hours.clamp(1, MAX_HOURS);
        todo.snooze_options.retain(|h| (1..=MAX_HOURS).contains(h));
        todo.snooze_options.sort_unstable();
        todo.snooze_options.dedup();
        todo.default_snooze_hours = todo.default_snooze_hours.clamp(1, MAX_HOURS);
        if let Some(&first) = todo.snooze_options.first() {
            if !todo.snooze_options.contains(&todo.default_snooze_hours) {
                todo.default_snooze_hours = first;
            }
        }
        self.scheduler.overdue_interval_secs = self.scheduler.overdue_interval_secs.max(1);
        self.scheduler.clock_interval_secs = self.scheduler.clock_interval_secs.max(1);
        self.notifications.warning_clear_secs =
            self.notifications.warning_clear_secs.clamp(0, MAX_WARNING_CLEAR_SECS);
        self.budget = self.budget.sanitized();
        self
    }
}

/// How the periodic evaluator treats a task whose snooze window is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SnoozePolicy {
    /// Not overdue while `now < snoozed_until`.
    #[default]
    Suppress,
    /// Recompute from `created_at` alone; the snooze only clears the flag
    /// until the next pass.
    Ignore,
}

impl SnoozePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "suppress" => Some(SnoozePolicy::Suppress),
            "ignore" => Some(SnoozePolicy::Ignore),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoSettings {
    pub max_active: usize,
    pub overdue_threshold_hours: i64,
    #[serde(default)]
    pub snooze_policy: SnoozePolicy,
    #[serde(default = "default_snooze_hours")]
    pub default_snooze_hours: i64,
    pub snooze_options: Vec<i64>,
}

impl Default for TodoSettings {
    fn default() -> Self {
        Self {
            max_active: DEFAULT_MAX_ACTIVE,
            overdue_threshold_hours: DEFAULT_OVERDUE_THRESHOLD_HOURS,
            snooze_policy: SnoozePolicy::Suppress,
            default_snooze_hours: DEFAULT_SNOOZE_HOURS,
            snooze_options: DEFAULT_SNOOZE_OPTIONS.to_vec(),
        }
    }
}

fn default_snooze_hours() -> i64 {
    DEFAULT_SNOOZE_HOURS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerSettings {
    pub overdue_interval_secs: u64,
    pub clock_interval_secs: u64,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            overdue_interval_secs: DEFAULT_OVERDUE_INTERVAL_SECS,
            clock_interval_secs: DEFAULT_CLOCK_INTERVAL_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionSettings {
    pub delay_ms: u64,
    pub reduction_rate: f64,
    pub category: String,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            reduction_rate: 0.2,
            category: "Dining & Entertainment".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub warning_clear_secs: i64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            warning_clear_secs: DEFAULT_WARNING_CLEAR_SECS,
        }
    }
}
