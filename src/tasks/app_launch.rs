//! Running one app instance from launch to exit

use serde::Serialize;
use tokio::time::sleep;
use tracing::info;

use crate::{
    app::{AppHandlers, LaunchReason, TimerApp},
    state::{Device, StatusText, TimerPhase},
};

/// What a launch request did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum LaunchOutcome {
    /// A new instance is in the foreground
    Started { phase: TimerPhase, status: StatusText },
    /// An instance was already open; icon taps are ignored until it exits
    AlreadyRunning { phase: TimerPhase },
    /// The wake-up went to the instance already in the foreground
    WakeupDelivered { phase: TimerPhase, status: StatusText },
}

impl LaunchOutcome {
    pub fn phase(&self) -> TimerPhase {
        match self {
            LaunchOutcome::Started { phase, .. }
            | LaunchOutcome::AlreadyRunning { phase }
            | LaunchOutcome::WakeupDelivered { phase, .. } => *phase,
        }
    }

    pub fn started(&self) -> bool {
        matches!(self, LaunchOutcome::Started { .. })
    }
}

/// Start an instance for `reason`, or hand the event to the one already in
/// the foreground.
pub async fn open_app(device: &Device, reason: LaunchReason) -> LaunchOutcome {
    let mut foreground = device.foreground.lock().await;

    if let Some(app) = foreground.as_mut() {
        return match reason {
            LaunchReason::User => {
                info!("App already in foreground, ignoring launch");
                LaunchOutcome::AlreadyRunning { phase: app.phase() }
            }
            LaunchReason::Wakeup(event) => {
                app.wakeup(event);
                LaunchOutcome::WakeupDelivered {
                    phase: app.phase(),
                    status: app.status().clone(),
                }
            }
        };
    }

    info!("Launching app: {:?}", reason);
    let mut app = TimerApp::init(device.host(), device.app_config.clone(), reason);
    app.window_load();
    device.record_launch(reason);

    let outcome = LaunchOutcome::Started {
        phase: app.phase(),
        status: app.status().clone(),
    };
    *foreground = Some(app);
    outcome
}

/// Auto-close countdown: once the display time is over, close the window and
/// tear the foreground instance down.
pub async fn close_after_display(device: &Device) {
    sleep(device.app_config.display_duration).await;

    let mut foreground = device.foreground.lock().await;
    if let Some(mut app) = foreground.take() {
        app.countdown_expired();
        app.deinit();
        info!("App exited in phase {:?}", app.phase());
    }
}

/// Launch and wait for the instance to exit
pub async fn run_launch(device: &Device, reason: LaunchReason) -> LaunchOutcome {
    let outcome = open_app(device, reason).await;
    if outcome.started() {
        close_after_display(device).await;
    }
    outcome
}
