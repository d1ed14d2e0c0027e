use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Local, Utc};

use crate::models::{AddOutcome, DashboardOverview, Notice, Settings, SnoozePolicy, Todo};
use crate::services::budget_store::BudgetStore;
use crate::services::clock::format_clock;
use crate::services::geometry::compute_slices;
use crate::services::overdue::threshold_from_hours;
use crate::services::todo_store::TodoStore;

pub const CAPACITY_WARNING: &str = "Keep it real! Complete some tasks first.";
pub const OVERDUE_BANNER: &str = "High priority tasks must be finished to continue adding new ones";

/// Everything the dashboard renders from. One instance per running dashboard.
#[derive(Debug, Clone)]
pub struct AppState {
    pub todos: TodoStore,
    pub budget: BudgetStore,
    pub warning: Option<Notice>,
    pub clock: DateTime<Utc>,
    overdue_threshold: Duration,
    snooze_policy: SnoozePolicy,
    default_snooze_hours: i64,
    snooze_options: Vec<i64>,
    warning_ttl: Duration,
}

impl AppState {
    pub fn new(settings: &Settings, now: DateTime<Utc>) -> Self {
        let settings = settings.clone().normalized();
        Self {
            todos: TodoStore::new(settings.todo.max_active),
            budget: BudgetStore::new(settings.budget),
            warning: None,
            clock: now,
            overdue_threshold: threshold_from_hours(settings.todo.overdue_threshold_hours),
            snooze_policy: settings.todo.snooze_policy,
            default_snooze_hours: settings.todo.default_snooze_hours,
            snooze_options: settings.todo.snooze_options,
            warning_ttl: Duration::try_seconds(settings.notifications.warning_clear_secs)
                .unwrap_or_else(Duration::zero),
        }
    }

    /// Start-up data shown on first launch: one stale task and the sample budget.
    pub fn seeded(settings: &Settings, now: DateTime<Utc>) -> Self {
        let mut state = Self::new(settings, now);
        let created_at = now - Duration::hours(49);
        let mut stale = Todo::new("Complete React project documentation", created_at);
        stale.is_overdue = true;
        state.todos = TodoStore::with_todos(state.todos.max_active(), vec![stale]);
        state
    }

    /// Snoozes `id` for `hours`, or for the configured default when `None`.
    /// Windows outside the offered options are an error; an unknown id is
    /// `Ok(false)`.
    pub fn snooze_todo(
        &mut self,
        id: &str,
        hours: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<bool, String> {
        let hours = hours.unwrap_or(self.default_snooze_hours);
        let offered = if self.snooze_options.is_empty() {
            hours > 0
        } else {
            self.snooze_options.contains(&hours)
        };
        let representable = Duration::try_hours(hours)
            .and_then(|d| now.checked_add_signed(d))
            .is_some();
        if !offered || !representable {
            return Err(format!(
                "snooze window of {}h is not one of {:?}",
                hours, self.snooze_options
            ));
        }
        Ok(self.todos.snooze(id, hours, now))
    }

    pub fn add_todo(&mut self, text: &str, now: DateTime<Utc>) -> AddOutcome {
        let outcome = self.todos.add(text, now);
        if outcome == AddOutcome::CapacityReached {
            self.warning = Some(Notice {
                message: CAPACITY_WARNING.to_string(),
                expires_at: now
                    .checked_add_signed(self.warning_ttl)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            });
        }
        outcome
    }

    pub fn reevaluate(&mut self, now: DateTime<Utc>) -> usize {
        self.todos.reevaluate(now, self.overdue_threshold, self.snooze_policy)
    }

    pub fn active_warning(&self, now: DateTime<Utc>) -> Option<&Notice> {
        self.warning.as_ref().filter(|notice| notice.is_active(now))
    }

    pub fn overview(&self, now: DateTime<Utc>) -> DashboardOverview {
        let budget = self.budget.get();
        let has_overdue = self.todos.has_overdue();
        DashboardOverview {
            todos: self.todos.snapshot(),
            active_count: self.todos.active_count(),
            max_active: self.todos.max_active(),
            has_overdue,
            can_add: self.todos.can_add(),
            overdue_banner: has_overdue.then(|| OVERDUE_BANNER.to_string()),
            warning: self.active_warning(now).map(|n| n.message.clone()),
            snooze_options: self.snooze_options.clone(),
            default_snooze_hours: self.default_snooze_hours,
            budget,
            slices: compute_slices(&budget),
            clock: format_clock(&self.clock.with_timezone(&Local)),
            updated_at: now.timestamp(),
        }
    }
}

/// Shared handle to the single [`AppState`]; user intents and the scheduler
/// both go through it.
#[derive(Debug, Clone)]
pub struct DashboardHandle {
    inner: Arc<Mutex<AppState>>,
}

impl DashboardHandle {
    pub fn new(state: AppState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, AppState>, String> {
        self.inner
            .lock()
            .map_err(|e| format!("dashboard state poisoned: {}", e))
    }

    pub fn with<T>(&self, f: impl FnOnce(&mut AppState) -> T) -> Result<T, String> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }
}
