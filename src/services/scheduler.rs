//! Periodic background work for a running dashboard.
//!
//! [`Scheduler`] owns the two recurring activities (display clock and overdue
//! re-evaluation) plus the [`CancellationToken`] that stops them. After
//! [`Scheduler::shutdown`] returns neither activity touches the state again.
//!
//! ```rust,ignore
//! let scheduler = Scheduler::start(handle.clone(), Arc::new(SystemTime), &settings.scheduler);
//! // ...
//! scheduler.shutdown().await;
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::models::SchedulerSettings;
use crate::services::clock::run_clock;
use crate::services::time_source::TimeSource;
use crate::state::DashboardHandle;

pub struct Scheduler {
    cancel: CancellationToken,
    clock_rx: watch::Receiver<DateTime<Utc>>,
    tasks: Vec<JoinHandle<()>>,
}

impl Scheduler {
    pub fn start(
        handle: DashboardHandle,
        time: Arc<dyn TimeSource>,
        settings: &SchedulerSettings,
    ) -> Self {
        let cancel = CancellationToken::new();
        let (clock_tx, clock_rx) = watch::channel(time.now());

        let overdue = tokio::spawn(run_overdue_engine(
            handle.clone(),
            Arc::clone(&time),
            Duration::from_secs(settings.overdue_interval_secs.max(1)),
            cancel.child_token(),
        ));
        let clock = tokio::spawn(run_clock(
            handle,
            time,
            clock_tx,
            Duration::from_secs(settings.clock_interval_secs.max(1)),
            cancel.child_token(),
        ));

        log::info!(
            "[Scheduler] started (overdue every {}s, clock every {}s)",
            settings.overdue_interval_secs,
            settings.clock_interval_secs
        );

        Self {
            cancel,
            clock_rx,
            tasks: vec![overdue, clock],
        }
    }

    /// Latest published display-clock value.
    pub fn clock(&self) -> watch::Receiver<DateTime<Utc>> {
        self.clock_rx.clone()
    }

    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        for task in std::mem::take(&mut self.tasks) {
            if let Err(e) = task.await {
                log::error!("[Scheduler] task ended abnormally: {}", e);
            }
        }
        log::info!("[Scheduler] stopped");
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Runs one pass immediately, then every `interval`.
pub async fn run_overdue_engine(
    handle: DashboardHandle,
    time: Arc<dyn TimeSource>,
    interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::debug!("[OverdueEngine] stopped");
                break;
            }
            _ = ticker.tick() => {
                let now = time.now();
                match handle.with(|state| (state.reevaluate(now), state.todos.has_overdue())) {
                    Ok((0, _)) => {}
                    Ok((changed, has_overdue)) => {
                        log::info!(
                            "[OverdueEngine] {} task(s) changed overdue state; blocking = {}",
                            changed,
                            has_overdue
                        );
                    }
                    Err(e) => log::error!("[OverdueEngine] pass failed: {}", e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Settings, SnoozePolicy, Todo};
    use crate::services::time_source::ManualTime;
    use crate::services::todo_store::TodoStore;
    use crate::state::AppState;

    fn handle_with(todos: Vec<Todo>, now: DateTime<Utc>) -> DashboardHandle {
        let settings = Settings::default();
        let mut state = AppState::new(&settings, now);
        state.todos = TodoStore::with_todos(settings.todo.max_active, todos);
        DashboardHandle::new(state)
    }

    fn overdue_flags(handle: &DashboardHandle) -> Vec<bool> {
        handle
            .lock()
            .unwrap()
            .todos
            .todos()
            .iter()
            .map(|t| t.is_overdue)
            .collect()
    }

    fn start(handle: &DashboardHandle, time: &ManualTime) -> Scheduler {
        let settings = SchedulerSettings::default();
        Scheduler::start(handle.clone(), Arc::new(time.clone()), &settings)
    }

    fn overdue_interval() -> Duration {
        Duration::from_secs(SchedulerSettings::default().overdue_interval_secs)
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_pass_runs_at_startup() {
        let now = Utc::now();
        let stale = Todo::new("stale", now - chrono::Duration::hours(49));
        let handle = handle_with(vec![stale], now);
        let time = ManualTime::new(now);

        let scheduler = start(&handle, &time);
        settle().await;

        assert_eq!(overdue_flags(&handle), vec![true]);
        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn task_becomes_overdue_on_a_later_tick() {
        let now = Utc::now();
        let young = Todo::new("young", now - chrono::Duration::hours(47));
        let handle = handle_with(vec![young], now);
        let time = ManualTime::new(now);

        let scheduler = start(&handle, &time);
        settle().await;
        assert_eq!(overdue_flags(&handle), vec![false]);

        time.advance(chrono::Duration::hours(2));
        tokio::time::sleep(overdue_interval()).await;
        settle().await;
        assert_eq!(overdue_flags(&handle), vec![true]);

        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn snoozed_task_stays_clear_under_default_policy() {
        let now = Utc::now();
        let stale = Todo::new("stale", now - chrono::Duration::hours(50));
        let id = stale.id.clone();
        let handle = handle_with(vec![stale], now);
        assert_eq!(Settings::default().todo.snooze_policy, SnoozePolicy::Suppress);
        let time = ManualTime::new(now);

        let scheduler = start(&handle, &time);
        settle().await;
        assert_eq!(overdue_flags(&handle), vec![true]);

        handle.with(|s| s.todos.snooze(&id, 1, now)).unwrap();
        time.advance(chrono::Duration::minutes(1));
        tokio::time::sleep(overdue_interval()).await;
        settle().await;
        assert_eq!(overdue_flags(&handle), vec![false]);

        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn no_updates_after_shutdown() {
        let now = Utc::now();
        let young = Todo::new("young", now - chrono::Duration::hours(1));
        let handle = handle_with(vec![young], now);
        let time = ManualTime::new(now);

        let scheduler = start(&handle, &time);
        settle().await;
        let clock_rx = scheduler.clock();
        scheduler.shutdown().await;

        let clock_before = handle.lock().unwrap().clock;
        time.advance(chrono::Duration::days(5));
        tokio::time::sleep(overdue_interval() * 3).await;
        settle().await;

        assert_eq!(overdue_flags(&handle), vec![false]);
        assert_eq!(handle.lock().unwrap().clock, clock_before);
        assert_eq!(*clock_rx.borrow(), clock_before);
    }

    #[tokio::test(start_paused = true)]
    async fn clock_publishes_every_second() {
        let now = Utc::now();
        let handle = handle_with(Vec::new(), now);
        let time = ManualTime::new(now);

        let scheduler = start(&handle, &time);
        let mut clock_rx = scheduler.clock();
        settle().await;

        let later = now + chrono::Duration::seconds(1);
        time.set(later);
        let clock_interval = SchedulerSettings::default().clock_interval_secs;
        tokio::time::sleep(Duration::from_secs(clock_interval)).await;
        settle().await;

        assert!(clock_rx.has_changed().unwrap());
        assert_eq!(*clock_rx.borrow_and_update(), later);
        assert_eq!(handle.lock().unwrap().clock, later);

        scheduler.shutdown().await;
    }
}
