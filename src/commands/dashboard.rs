use crate::models::DashboardOverview;
use crate::state::DashboardHandle;

pub fn get_dashboard_overview(handle: &DashboardHandle) -> Result<DashboardOverview, String> {
    let now = chrono::Utc::now();
    handle.with(|state| state.overview(now))
}

/// Runs an overdue pass right away instead of waiting for the next tick.
pub fn refresh_dashboard_overview(handle: &DashboardHandle) -> Result<DashboardOverview, String> {
    let now = chrono::Utc::now();
    handle.with(|state| {
        state.reevaluate(now);
        state.overview(now)
    })
}
