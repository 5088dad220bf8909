//! App lifecycle: launch handling, wake-up arming and teardown

use std::time::Duration;

use chrono::Utc;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{
    glance::update_app_glance,
    presentation::{vibe_for, MainWindow},
};
use crate::{
    services::{
        messaging::{INBOX_SIZE, OUTBOX_SIZE},
        ExitReason, HostServices, PersistKey, PersistentStore, WakeupEvent,
    },
    state::{format_status, StatusText, TimerPhase},
};

/// Store key of the current phase
pub const KEY_STATE: PersistKey = 0;
/// Store key of the phase a pending wake-up will switch to
pub const KEY_PENDING: PersistKey = 1;
/// Cookie of wake-ups whose next phase is kept under `KEY_PENDING`
pub const PENDING_COOKIE: i32 = -1;

/// Where a scheduled wake-up keeps the phase it switches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WakeupPayload {
    /// The phase ordinal is the wake-up cookie
    #[default]
    Cookie,
    /// The phase is written to the store before scheduling
    PendingKey,
}

/// Per-launch settings of the app
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// How long the window stays up before the app exits
    pub display_duration: Duration,
    pub payload: WakeupPayload,
    pub action_bar: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            display_duration: Duration::from_secs(3),
            payload: WakeupPayload::Cookie,
            action_bar: false,
        }
    }
}

/// Why the host started this instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LaunchReason {
    /// Icon tap in the launcher
    User,
    Wakeup(WakeupEvent),
}

/// Callbacks the host delivers to a running instance, in the order
/// load, (wakeup)*, countdown expired, unload, deinit.
pub trait AppHandlers {
    fn window_load(&mut self);
    fn wakeup(&mut self, event: WakeupEvent);
    fn countdown_expired(&mut self);
    fn window_unload(&mut self);
    fn deinit(&mut self);
}

/// Read the stored phase, writing OFF first if nothing was stored yet
pub fn load_phase(store: &dyn PersistentStore) -> TimerPhase {
    if !store.exists(KEY_STATE) {
        if let Err(e) = store.write_int(KEY_STATE, TimerPhase::Off.ordinal()) {
            warn!("Failed to initialize stored phase: {}", e);
        }
    }

    let phase = store
        .read_int(KEY_STATE)
        .map(TimerPhase::from_ordinal)
        .unwrap_or_default();
    info!("Stored phase: {:?}", phase);
    phase
}

/// One running instance of the interval timer
pub struct TimerApp {
    host: HostServices,
    config: AppConfig,
    phase: TimerPhase,
    status: StatusText,
    window: Option<MainWindow>,
}

impl TimerApp {
    /// Start an instance: load the phase, react to the launch reason, arm the
    /// next wake-up and open messaging.
    pub fn init(host: HostServices, config: AppConfig, reason: LaunchReason) -> Self {
        let phase = load_phase(&*host.store);
        let mut app = Self {
            host,
            config,
            phase,
            status: StatusText::off(),
            window: None,
        };

        match reason {
            LaunchReason::User => app.toggle(),
            LaunchReason::Wakeup(event) => app.adopt_wakeup(event),
        }

        if let Err(e) = app.host.messaging.open(INBOX_SIZE, OUTBOX_SIZE) {
            warn!("Failed to open messaging: {}", e);
        }
        app
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// Status text as last rendered
    pub fn status(&self) -> &StatusText {
        &self.status
    }

    fn toggle(&mut self) {
        let previous = self.phase;
        self.phase = previous.toggle();
        info!("Toggled {:?} -> {:?}", previous, self.phase);

        self.persist_phase();
        self.arm_next_wakeup();
    }

    fn adopt_wakeup(&mut self, event: WakeupEvent) {
        info!("Wake-up {} fired (cookie {})", event.id, event.cookie);
        let pending = self.take_pending();

        if self.phase == TimerPhase::Off {
            warn!("Wake-up {} fired while OFF, ignoring", event.id);
            return;
        }

        let next = if event.cookie == PENDING_COOKIE {
            let expected = self.phase.advance().map_or(TimerPhase::Off, |t| t.next);
            pending.unwrap_or_else(|| {
                warn!("No pending phase stored, assuming {:?}", expected);
                expected
            })
        } else {
            TimerPhase::from_ordinal(event.cookie)
        };

        info!("Woke up {:?} -> {:?}", self.phase, next);
        self.phase = next;
        self.persist_phase();
        self.arm_next_wakeup();
    }

    /// Read and delete the pending phase
    fn take_pending(&self) -> Option<TimerPhase> {
        let value = self.host.store.read_int(KEY_PENDING)?;
        if let Err(e) = self.host.store.delete(KEY_PENDING) {
            warn!("Failed to clear pending phase: {}", e);
        }
        Some(TimerPhase::from_ordinal(value))
    }

    fn arm_next_wakeup(&self) {
        let Some(transition) = self.phase.advance() else {
            self.cancel_wakeups();
            return;
        };

        let at = self.host.clock.now().with_timezone(&Utc)
            + chrono::Duration::seconds(transition.delay.as_secs() as i64);
        let cookie = match self.config.payload {
            WakeupPayload::Cookie => transition.next.ordinal(),
            WakeupPayload::PendingKey => {
                if let Err(e) = self.host.store.write_int(KEY_PENDING, transition.next.ordinal()) {
                    warn!("Failed to store pending phase: {}", e);
                }
                PENDING_COOKIE
            }
        };

        match self.host.wakeups.schedule(at, cookie, false) {
            Ok(id) => info!("Wake-up {} armed: {:?} at {}", id, transition.next, at),
            Err(e) => warn!("Failed to schedule wake-up: {}", e),
        }
    }

    fn cancel_wakeups(&self) {
        debug!("No transition from {:?}, cancelling wake-ups", self.phase);
        if let Err(e) = self.host.wakeups.cancel_all() {
            warn!("Failed to cancel wake-ups: {}", e);
        }
        if let Err(e) = self.host.store.delete(KEY_PENDING) {
            warn!("Failed to clear pending phase: {}", e);
        }
    }

    fn persist_phase(&self) {
        if let Err(e) = self.host.store.write_int(KEY_STATE, self.phase.ordinal()) {
            warn!("Failed to persist phase {:?}: {}", self.phase, e);
        }
    }

    fn refresh_status(&mut self) -> StatusText {
        let now = self.host.clock.now();
        self.status = format_status(self.phase, &now, self.host.clock.style());
        self.status.clone()
    }

    fn reload_glance(&mut self) {
        let status = self.refresh_status();
        self.host
            .launcher
            .reload_glance(&mut |session, limit| update_app_glance(session, limit, &status));
    }
}

impl AppHandlers for TimerApp {
    fn window_load(&mut self) {
        let status = self.refresh_status();
        self.window = Some(MainWindow::load(&*self.host.display, self.config.action_bar, status));

        if let Some(pattern) = vibe_for(self.phase) {
            self.host.vibes.enqueue(pattern);
        }
    }

    fn wakeup(&mut self, event: WakeupEvent) {
        self.adopt_wakeup(event);

        let status = self.refresh_status();
        if let Some(window) = self.window.as_mut() {
            window.set_text(&*self.host.display, status);
        }
        self.reload_glance();
    }

    fn countdown_expired(&mut self) {
        debug!("Display time over, exiting");
        self.host
            .launcher
            .set_exit_reason(ExitReason::ActionPerformedSuccessfully);
        self.window_unload();
    }

    fn window_unload(&mut self) {
        if let Some(window) = self.window.take() {
            window.unload(&*self.host.display);
        }
    }

    fn deinit(&mut self) {
        self.window_unload();
        self.persist_phase();
        self.reload_glance();
    }
}
