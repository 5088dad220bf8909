//! Eye Timer - screen/rest interval timer for a wrist wearable
//!
//! Toggling the app starts a 20 minute screen phase; a wake-up then switches
//! to a 30 second rest and back, until the app is toggled off again. Each
//! launch shows when the current phase ends, vibrates, exits on its own and
//! leaves the same text as its launcher glance.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use app::{AppConfig, LaunchReason, TimerApp};
pub use config::Config;
pub use error::{GlanceError, HostError};
pub use state::{Device, TimerPhase};
pub use utils::signals::shutdown_signal;
