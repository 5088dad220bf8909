//! Emulated device state shared by the launcher API and background tasks

use std::{
    fs,
    path::Path,
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::info;

use super::TimerPhase;
use crate::{
    app::{AppConfig, LaunchReason, TimerApp, KEY_STATE},
    error::HostError,
    services::{
        Clock, EmulatedLauncher, HostServices, JsonStore, LoopbackMessaging, PersistentStore,
        TraceDisplay, TraceVibes, WakeupQueue,
    },
};

pub const STORE_FILE: &str = "persist.json";
pub const WAKEUP_FILE: &str = "wakeups.json";

/// The emulated watch: its host services, the app settings, and the slot of
/// the instance currently in the foreground.
pub struct Device {
    pub store: Arc<JsonStore>,
    pub wakeups: Arc<WakeupQueue>,
    pub display: Arc<TraceDisplay>,
    pub vibes: Arc<TraceVibes>,
    pub launcher: Arc<EmulatedLauncher>,
    pub messaging: Arc<LoopbackMessaging>,
    pub clock: Arc<dyn Clock>,
    pub app_config: AppConfig,
    /// At most one app instance runs at a time
    pub foreground: tokio::sync::Mutex<Option<TimerApp>>,
    pub start_time: Instant,
    /// Last launch tracking
    pub last_launch: Mutex<Option<(LaunchReason, DateTime<Utc>)>>,
}

impl Device {
    /// Open a device whose store and wake-ups live under `data_dir`
    pub fn open(
        data_dir: &Path,
        clock: Arc<dyn Clock>,
        glance_limit: usize,
        app_config: AppConfig,
    ) -> Result<Self, HostError> {
        fs::create_dir_all(data_dir)?;
        let store = JsonStore::open(data_dir.join(STORE_FILE))?;
        let wakeups = WakeupQueue::open(data_dir.join(WAKEUP_FILE))?;

        info!("Device data directory: {}", data_dir.display());
        Ok(Self::assemble(store, wakeups, clock, glance_limit, app_config))
    }

    /// A device that forgets everything when dropped
    pub fn in_memory(clock: Arc<dyn Clock>, glance_limit: usize, app_config: AppConfig) -> Self {
        Self::assemble(
            JsonStore::in_memory(),
            WakeupQueue::in_memory(),
            clock,
            glance_limit,
            app_config,
        )
    }

    fn assemble(
        store: JsonStore,
        wakeups: WakeupQueue,
        clock: Arc<dyn Clock>,
        glance_limit: usize,
        app_config: AppConfig,
    ) -> Self {
        Self {
            store: Arc::new(store),
            wakeups: Arc::new(wakeups),
            display: Arc::new(TraceDisplay::default()),
            vibes: Arc::new(TraceVibes::default()),
            launcher: Arc::new(EmulatedLauncher::new(glance_limit)),
            messaging: Arc::new(LoopbackMessaging::default()),
            clock,
            app_config,
            foreground: tokio::sync::Mutex::new(None),
            start_time: Instant::now(),
            last_launch: Mutex::new(None),
        }
    }

    /// Service handles for a new app instance
    pub fn host(&self) -> HostServices {
        HostServices {
            store: self.store.clone(),
            wakeups: self.wakeups.clone(),
            display: self.display.clone(),
            vibes: self.vibes.clone(),
            launcher: self.launcher.clone(),
            messaging: self.messaging.clone(),
            clock: Arc::clone(&self.clock),
        }
    }

    /// Phase as persisted, independent of any running instance
    pub fn stored_phase(&self) -> TimerPhase {
        self.store
            .read_int(KEY_STATE)
            .map(TimerPhase::from_ordinal)
            .unwrap_or_default()
    }

    pub fn record_launch(&self, reason: LaunchReason) {
        if let Ok(mut last) = self.last_launch.lock() {
            *last = Some((reason, Utc::now()));
        }
    }

    pub fn get_last_launch(&self) -> Option<(LaunchReason, DateTime<Utc>)> {
        self.last_launch.lock().ok().and_then(|last| *last)
    }

    /// Calculate emulator uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
