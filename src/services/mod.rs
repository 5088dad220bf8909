//! Host services module
//!
//! The watch host provides storage, wake-ups, a window surface, a vibration
//! motor, launcher glances and a clock. Each is a trait here, with the
//! implementation used by the desktop device emulator next to it.

pub mod clock;
pub mod display;
pub mod launcher;
pub mod messaging;
pub mod store;
pub mod wakeup;

use std::sync::Arc;

// Re-export main types
pub use clock::{Clock, ClockStyle, ManualClock, SystemClock};
pub use display::{Display, Frame, Rect, Size, TraceDisplay, TraceVibes, VibePattern, Vibes};
pub use launcher::{EmulatedLauncher, ExitReason, GlanceSession, GlanceSlice, Launcher};
pub use messaging::{AppMessage, LoopbackMessaging};
pub use store::{JsonStore, PersistKey, PersistentStore};
pub use wakeup::{ScheduledWakeup, WakeupEvent, WakeupId, WakeupQueue, WakeupScheduler};

/// Handles to every host service an app instance may call
#[derive(Clone)]
pub struct HostServices {
    pub store: Arc<dyn PersistentStore>,
    pub wakeups: Arc<dyn WakeupScheduler>,
    pub display: Arc<dyn Display>,
    pub vibes: Arc<dyn Vibes>,
    pub launcher: Arc<dyn Launcher>,
    pub messaging: Arc<dyn AppMessage>,
    pub clock: Arc<dyn Clock>,
}
