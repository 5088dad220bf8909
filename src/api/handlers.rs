//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{extract::State, response::Json};
use chrono::Utc;
use tracing::info;

use super::responses::{GlanceResponse, HealthResponse, LaunchResponse, StatusResponse};
use crate::{
    app::LaunchReason,
    services::WakeupScheduler,
    state::Device,
    tasks::{close_after_display, open_app},
};

/// Handle POST /launch - Icon tap in the launcher
pub async fn launch_handler(State(device): State<Arc<Device>>) -> Json<LaunchResponse> {
    let outcome = open_app(&device, LaunchReason::User).await;
    info!("Launch endpoint called - {:?}", outcome);

    if outcome.started() {
        let device = Arc::clone(&device);
        tokio::spawn(async move {
            close_after_display(&device).await;
        });
    }

    Json(LaunchResponse::new(outcome))
}

/// Handle GET /glance - Slices the launcher shows for the app
pub async fn glance_handler(State(device): State<Arc<Device>>) -> Json<GlanceResponse> {
    Json(GlanceResponse {
        slices: device.launcher.slices(),
        timestamp: Utc::now(),
    })
}

/// Handle GET /status - Return current device status
pub async fn status_handler(State(device): State<Arc<Device>>) -> Json<StatusResponse> {
    let foreground = device.foreground.lock().await.is_some();
    let (last_launch, last_launch_time) = device
        .get_last_launch()
        .map_or((None, None), |(reason, at)| (Some(reason), Some(at)));

    Json(StatusResponse {
        phase: device.stored_phase(),
        foreground,
        screen_text: device.display.last_frame().map(|frame| frame.text),
        pending_wakeups: device.wakeups.pending(),
        wakeup_payload: device.app_config.payload,
        last_exit_reason: device.launcher.exit_reason(),
        last_launch,
        last_launch_time,
        uptime: device.get_uptime(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
