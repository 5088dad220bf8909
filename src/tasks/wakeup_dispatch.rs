//! Wake-up dispatch background task

use std::{sync::Arc, time::Duration};
use chrono::Utc;
use tokio::time::interval;
use tracing::{debug, info, warn};

use super::app_launch::run_launch;
use crate::{app::LaunchReason, services::WakeupScheduler, state::Device};

/// A wake-up firing later than this counts as missed
const MISSED_AFTER_SECS: i64 = 60;

/// Background task that fires due wake-ups, relaunching the app for each
pub async fn wakeup_dispatch_task(device: Arc<Device>, poll: Duration) {
    info!("Starting wake-up dispatch task");

    let mut interval = interval(poll);

    loop {
        interval.tick().await;
        dispatch_due_wakeups(&device).await;
    }
}

/// Fire every wake-up that is due now, one launch after the other.
/// Returns how many fired.
pub async fn dispatch_due_wakeups(device: &Device) -> usize {
    let now = device.clock.now().with_timezone(&Utc);

    let due = match device.wakeups.take_due(now) {
        Ok(due) => due,
        Err(e) => {
            warn!("Failed to read due wake-ups: {}", e);
            return 0;
        }
    };

    for wakeup in &due {
        let late_by = (now - wakeup.at).num_seconds();
        if late_by > MISSED_AFTER_SECS {
            if wakeup.notify_if_missed {
                info!("Wake-up {} was missed by {}s", wakeup.id, late_by);
            } else {
                debug!("Wake-up {} fired {}s late", wakeup.id, late_by);
            }
        }
        run_launch(device, LaunchReason::Wakeup(wakeup.event())).await;
    }

    due.len()
}
