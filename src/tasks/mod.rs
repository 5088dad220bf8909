//! Background tasks module
//!
//! App instances and the wake-up dispatcher, both driven by the tokio runtime.

pub mod app_launch;
pub mod wakeup_dispatch;

// Re-export main functions
pub use app_launch::{close_after_display, open_app, run_launch, LaunchOutcome};
pub use wakeup_dispatch::{dispatch_due_wakeups, wakeup_dispatch_task};
