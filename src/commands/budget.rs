use std::path::Path;

use crate::models::{BudgetRecord, PieSlice, Suggestion};
use crate::services::geometry::compute_slices;
use crate::services::pie_chart;
use crate::services::suggestion::SuggestionService;
use crate::state::DashboardHandle;

pub fn get_budget(handle: &DashboardHandle) -> Result<BudgetRecord, String> {
    handle.with(|state| state.budget.get())
}

pub fn update_budget(
    handle: &DashboardHandle,
    budget: BudgetRecord,
) -> Result<BudgetRecord, String> {
    let saved = handle.with(|state| {
        state.budget.replace(budget);
        state.budget.get()
    })?;
    log::info!(
        "[Budget] updated: earning {} / saving {} / spending {} per day",
        saved.daily_earning,
        saved.daily_saving,
        saved.daily_spending
    );
    Ok(saved)
}

pub fn get_budget_slices(handle: &DashboardHandle) -> Result<[PieSlice; 3], String> {
    let budget = get_budget(handle)?;
    Ok(compute_slices(&budget))
}

pub fn export_budget_chart(handle: &DashboardHandle, file: &Path) -> Result<(), String> {
    let slices = get_budget_slices(handle)?;
    pie_chart::save_pie(file, &slices).map_err(|e| e.to_string())
}

/// Asks the suggestion service about the current daily spending. The state
/// lock is released before awaiting.
pub async fn request_spending_analysis(
    handle: &DashboardHandle,
    service: &dyn SuggestionService,
) -> Result<Suggestion, String> {
    let spending = get_budget(handle)?.daily_spending;
    service.suggest(spending).await.map_err(|e| e.to_string())
}
