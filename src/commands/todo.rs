use crate::models::AddOutcome;
use crate::state::DashboardHandle;

pub fn add_todo(handle: &DashboardHandle, text: String) -> Result<AddOutcome, String> {
    let now = chrono::Utc::now();
    let outcome = handle.with(|state| state.add_todo(&text, now))?;
    match &outcome {
        AddOutcome::Added(id) => log::info!("[Todo] added {}", id),
        rejected => log::debug!("[Todo] add rejected: {:?}", rejected),
    }
    Ok(outcome)
}

pub fn toggle_todo(handle: &DashboardHandle, id: String) -> Result<bool, String> {
    let now = chrono::Utc::now();
    handle.with(|state| state.todos.toggle(&id, now))
}

/// `hours` of `None` falls back to the configured default window; any other
/// value must be one of the configured snooze options.
pub fn snooze_todo(
    handle: &DashboardHandle,
    id: String,
    hours: Option<i64>,
) -> Result<bool, String> {
    let now = chrono::Utc::now();
    let snoozed = handle
        .with(|state| state.snooze_todo(&id, hours, now))?
        .map_err(|e| {
            log::warn!("[Todo] snooze of {} refused: {}", id, e);
            e
        })?;
    if snoozed {
        log::info!("[Todo] snoozed {}", id);
    }
    Ok(snoozed)
}
