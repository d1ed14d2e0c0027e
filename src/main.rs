use std::sync::Arc;

use lifeplanner::commands;
use lifeplanner::services::scheduler::Scheduler;
use lifeplanner::services::suggestion::TemplateSuggestionService;
use lifeplanner::services::time_source::SystemTime;
use lifeplanner::state::{AppState, DashboardHandle};
use lifeplanner::utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::config::load_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = utils::config::load_settings()?;
    log::info!(
        "[Startup] snooze policy {:?}, overdue after {}h, max {} active tasks",
        settings.todo.snooze_policy,
        settings.todo.overdue_threshold_hours,
        settings.todo.max_active
    );

    let handle = DashboardHandle::new(AppState::seeded(&settings, chrono::Utc::now()));
    let scheduler = Scheduler::start(handle.clone(), Arc::new(SystemTime), &settings.scheduler);

    let overview =
        commands::dashboard::get_dashboard_overview(&handle).map_err(anyhow::Error::msg)?;
    println!("{}", serde_json::to_string_pretty(&overview)?);

    let analysis_handle = handle.clone();
    let service = TemplateSuggestionService::from_settings(&settings.suggestion);
    tokio::spawn(async move {
        match commands::budget::request_spending_analysis(&analysis_handle, &service).await {
            Ok(s) => log::info!("[Suggestion] {} (category: {})", s.suggestion, s.category),
            Err(e) => log::error!("[Suggestion] analysis failed: {}", e),
        }
    });

    tokio::signal::ctrl_c().await?;
    log::info!("[Shutdown] stopping background tasks");
    scheduler.shutdown().await;
    Ok(())
}
