//! Eye Timer - screen/rest interval timer for a wrist wearable
//!
//! Runs the app on an emulated watch: a JSON-backed store and wake-up queue,
//! a logging display, and a small HTTP launcher.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use eye_timer::{
    api::create_router,
    config::Config,
    services::SystemClock,
    state::Device,
    tasks::wakeup_dispatch_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("eye_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting eye-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, clock={:?}, display={}s, payload={:?}",
        config.host, config.port, config.clock, config.display_secs, config.wakeup_payload
    );

    // Create the emulated device
    let clock = Arc::new(SystemClock::new(config.clock));
    let device = Device::open(&config.data_dir, clock, config.glance_limit, config.app_config())
        .with_context(|| format!("Failed to open device data in {}", config.data_dir.display()))?;
    let device = Arc::new(device);

    // Start the wake-up dispatcher; wake-ups missed while stopped fire on the first tick
    let dispatch_device = Arc::clone(&device);
    let poll = config.poll_interval();
    tokio::spawn(async move {
        wakeup_dispatch_task(dispatch_device, poll).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(device);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Launcher running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /launch - Tap the app icon");
    info!("  GET  /glance - Launcher glance of the app");
    info!("  GET  /status - Phase, wake-ups and screen");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Emulator shutdown complete");
    Ok(())
}
