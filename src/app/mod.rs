//! The interval timer app
//!
//! Everything here runs synchronously inside host callbacks. State that must
//! outlive one instance goes through the persistent store.

pub mod glance;
pub mod lifecycle;
pub mod presentation;

// Re-export main types
pub use lifecycle::{
    load_phase, AppConfig, AppHandlers, LaunchReason, TimerApp, WakeupPayload, KEY_PENDING,
    KEY_STATE, PENDING_COOKIE,
};
