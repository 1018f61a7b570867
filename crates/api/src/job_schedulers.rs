use crate::progress::SendWeeklyProgressUseCase;
use crate::reminder::SendAssignmentRemindersUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep};
use campus_scheduler_infra::Context;
use chrono::{DateTime, Duration as ChronoDuration, NaiveTime, Utc};
use chrono_tz::Tz;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const DAY_SECS: u64 = 24 * 60 * 60;

/// Seconds until the next occurrence of `scan_hour:00` wall-clock time
/// in `tz`. Cadence stays configuration, not control flow: tests drive
/// the use cases directly instead of waiting on real time.
pub fn secs_until_scan_hour(now: DateTime<Utc>, tz: &Tz, scan_hour: u32) -> u64 {
    let scan_time = NaiveTime::from_hms_opt(scan_hour, 0, 0).unwrap_or(NaiveTime::MIN);
    let local_now = now.with_timezone(tz).naive_local();
    let today_scan = local_now.date().and_time(scan_time);
    let next_scan = if local_now < today_scan {
        today_scan
    } else {
        today_scan + ChronoDuration::days(1)
    };
    (next_scan - local_now).num_seconds().max(0) as u64
}

/// Daily reminder scan, aligned to the configured wall-clock hour. The
/// scan itself runs on a separate task; the atomic flag skips a tick if
/// the previous scan is somehow still running (possible when operators
/// configure a cadence finer than the scan duration).
pub fn start_send_reminders_job(ctx: Context) {
    actix_web::rt::spawn(async move {
        let start_delay = secs_until_scan_hour(
            ctx.sys.now(),
            &ctx.config.scheduler_timezone,
            ctx.config.reminder_scan_hour,
        );
        sleep(Duration::from_secs(start_delay)).await;

        let scan_in_progress = Arc::new(AtomicBool::new(false));
        let mut daily_interval = interval(Duration::from_secs(DAY_SECS));
        loop {
            daily_interval.tick().await;
            let context = ctx.clone();
            let guard = scan_in_progress.clone();
            actix_web::rt::spawn(async move {
                if guard.swap(true, Ordering::SeqCst) {
                    warn!("A reminder scan is already in progress. Skipping this tick.");
                    return;
                }
                let _ = execute(SendAssignmentRemindersUseCase, &context).await;
                guard.store(false, Ordering::SeqCst);
            });
        }
    });
}

/// Weekly aggregate-progress report on its own, longer timer. Runs
/// independently of the reminder scan; both are read-mostly so overlap
/// is allowed.
pub fn start_weekly_progress_job(ctx: Context) {
    actix_web::rt::spawn(async move {
        let start_delay = secs_until_scan_hour(
            ctx.sys.now(),
            &ctx.config.scheduler_timezone,
            ctx.config.reminder_scan_hour,
        );
        sleep(Duration::from_secs(start_delay)).await;

        let mut weekly_interval = interval(Duration::from_secs(7 * DAY_SECS));
        loop {
            weekly_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(async move {
                let _ = execute(SendWeeklyProgressUseCase, &context).await;
            });
        }
    });
}
