use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone, Utc};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::services::time_source::TimeSource;
use crate::state::DashboardHandle;

pub fn format_clock<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%H:%M:%S").to_string()
}

/// Publishes the wall clock every `interval` until `cancel` fires. Only the
/// `clock` field of the state is touched.
pub async fn run_clock(
    handle: DashboardHandle,
    time: Arc<dyn TimeSource>,
    tx: watch::Sender<DateTime<Utc>>,
    interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    log::debug!("[Clock] started ({:?} interval)", interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                log::debug!("[Clock] stopped");
                break;
            }
            _ = ticker.tick() => {
                let now = time.now();
                if let Err(e) = handle.with(|state| state.clock = now) {
                    log::error!("[Clock] failed to update state: {}", e);
                }
                // No receivers just means nobody is displaying the clock.
                let _ = tx.send(now);
                log::trace!("[Clock] {}", format_clock(&now.with_timezone(&Local)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn formats_as_two_digit_fields() {
        let time = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 3)
            .unwrap()
            .and_utc();
        assert_eq!(format_clock(&time), "07:05:03");
    }
}
