use chrono::{DateTime, Duration, Utc};

use crate::models::{AddOutcome, SnoozePolicy, Todo, DEFAULT_MAX_ACTIVE};
use crate::services::overdue;

/// Owns the task collection. Every mutation swaps in a freshly built list so
/// a snapshot taken before the call never observes a partial update.
#[derive(Debug, Clone)]
pub struct TodoStore {
    todos: Vec<Todo>,
    max_active: usize,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ACTIVE)
    }
}

impl TodoStore {
    pub fn new(max_active: usize) -> Self {
        Self {
            todos: Vec::new(),
            max_active,
        }
    }

    pub fn with_todos(max_active: usize, todos: Vec<Todo>) -> Self {
        Self { todos, max_active }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn snapshot(&self) -> Vec<Todo> {
        self.todos.clone()
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn max_active(&self) -> usize {
        self.max_active
    }

    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    pub fn has_overdue(&self) -> bool {
        self.todos.iter().any(Todo::is_blocking)
    }

    pub fn is_full(&self) -> bool {
        self.active_count() >= self.max_active
    }

    pub fn can_add(&self) -> bool {
        !self.is_full() && !self.has_overdue()
    }

    pub fn add(&mut self, text: &str, now: DateTime<Utc>) -> AddOutcome {
        let text = text.trim();
        if text.is_empty() {
            return AddOutcome::EmptyText;
        }
        if self.is_full() {
            return AddOutcome::CapacityReached;
        }
        if self.has_overdue() {
            return AddOutcome::OverdueTasksPending;
        }

        let todo = Todo::new(text, now);
        let id = todo.id.clone();
        let mut next = self.todos.clone();
        next.push(todo);
        self.todos = next;
        AddOutcome::Added(id)
    }

    /// Flips completion. Reopening clears `completed_at` and leaves
    /// `is_overdue` for the next evaluator pass.
    pub fn toggle(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        self.replace_matching(id, |todo| {
            let completed = !todo.completed;
            Todo {
                completed,
                completed_at: if completed { Some(now) } else { None },
                is_overdue: false,
                ..todo.clone()
            }
        })
    }

    /// A window that cannot be represented as a timestamp leaves the task
    /// untouched and reports `false`.
    pub fn snooze(&mut self, id: &str, hours: i64, now: DateTime<Utc>) -> bool {
        let until = Duration::try_hours(hours).and_then(|d| now.checked_add_signed(d));
        let Some(until) = until else {
            return false;
        };
        self.replace_matching(id, |todo| Todo {
            snoozed_until: Some(until),
            is_overdue: false,
            ..todo.clone()
        })
    }

    /// Re-derives every `is_overdue` flag. Returns how many flags changed.
    pub fn reevaluate(
        &mut self,
        now: DateTime<Utc>,
        threshold: Duration,
        policy: SnoozePolicy,
    ) -> usize {
        let mut changed = 0;
        let next = self
            .todos
            .iter()
            .map(|todo| {
                let is_overdue = overdue::evaluate_with(now, todo, threshold, policy);
                if is_overdue != todo.is_overdue {
                    changed += 1;
                }
                Todo {
                    is_overdue,
                    ..todo.clone()
                }
            })
            .collect();
        self.todos = next;
        changed
    }

    fn replace_matching<F>(&mut self, id: &str, update: F) -> bool
    where
        F: Fn(&Todo) -> Todo,
    {
        if self.get(id).is_none() {
            return false;
        }
        self.todos = self
            .todos
            .iter()
            .map(|todo| if todo.id == id { update(todo) } else { todo.clone() })
            .collect();
        true
    }
}
