//! Waiting for the platform to open next week's slots.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::info;

/// Days between today and the date that opens at the release hour.
pub fn target_day_offset(now: NaiveDateTime, release_hour: u32) -> usize {
    if now.hour() >= release_hour {
        7
    } else {
        6
    }
}

pub fn target_date(now: NaiveDateTime, release_hour: u32) -> NaiveDate {
    let offset = target_day_offset(now, release_hour) as u64;
    now.date()
        .checked_add_days(Days::new(offset))
        .unwrap_or(now.date())
}

/// Time left until the next start of `release_hour`, or `None` while the
/// clock is already inside that hour.
pub fn until_release(now: NaiveDateTime, release_hour: u32) -> Option<chrono::Duration> {
    if now.hour() == release_hour {
        return None;
    }

    let opening = NaiveTime::from_hms_opt(release_hour, 0, 0)?;
    let today = now.date().and_time(opening);
    let next = if now < today {
        today
    } else {
        now.date().checked_add_days(Days::new(1))?.and_time(opening)
    };
    Some(next - now)
}

pub async fn wait_for_release(release_hour: u32) {
    let step = std::time::Duration::from_secs(3600);

    loop {
        let now = chrono::Local::now().naive_local();
        let remaining = match until_release(now, release_hour) {
            Some(r) => r,
            None => break,
        };

        let remaining = remaining.to_std().unwrap_or_default();
        info!(
            "Release hour {}:00 not reached, {} minutes left",
            release_hour,
            remaining.as_secs() / 60
        );
        tokio::time::sleep(remaining.min(step)).await;
    }

    info!("Release hour {}:00 reached", release_hour);
}
