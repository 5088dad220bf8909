//! State management module
//!
//! Timer phase and status text, plus the emulated device that hosts the app.

pub mod device_state;
pub mod phase;
pub mod status;

// Re-export main types
pub use device_state::Device;
pub use phase::{TimerPhase, Transition, ACTIVE_INTERVAL, REST_INTERVAL};
pub use status::{format_status, StatusText, STATUS_BUFFER_LEN};
