//! API response structures

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    app::{LaunchReason, WakeupPayload},
    services::{ExitReason, GlanceSlice, ScheduledWakeup},
    state::TimerPhase,
    tasks::LaunchOutcome,
};

/// Response to an icon tap
#[derive(Debug, Clone, Serialize)]
pub struct LaunchResponse {
    #[serde(flatten)]
    pub outcome: LaunchOutcome,
    pub timestamp: DateTime<Utc>,
}

impl LaunchResponse {
    pub fn new(outcome: LaunchOutcome) -> Self {
        Self {
            outcome,
            timestamp: Utc::now(),
        }
    }
}

/// What the launcher currently shows for the app
#[derive(Debug, Clone, Serialize)]
pub struct GlanceResponse {
    pub slices: Vec<GlanceSlice>,
    pub timestamp: DateTime<Utc>,
}

/// Device status with timer and wake-up information
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub phase: TimerPhase,
    pub foreground: bool,
    pub screen_text: Option<String>,
    pub pending_wakeups: Vec<ScheduledWakeup>,
    pub wakeup_payload: WakeupPayload,
    pub last_exit_reason: ExitReason,
    pub last_launch: Option<LaunchReason>,
    pub last_launch_time: Option<DateTime<Utc>>,
    pub uptime: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
