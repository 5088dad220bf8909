//! Launcher glances and app exit reasons

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::GlanceError;

/// Longest subtitle the launcher accepts
pub const GLANCE_SUBTITLE_MAX: usize = 150;

/// One line of summary shown in the launcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlanceSlice {
    pub subtitle: String,
    pub icon: Option<String>,
    /// `None` never expires
    pub expires_at: Option<DateTime<Utc>>,
}

/// Open reload session handed to the app's glance callback
pub trait GlanceSession {
    fn add_slice(&mut self, slice: GlanceSlice) -> Result<(), GlanceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    #[default]
    NotSpecified,
    /// The app did what it was opened for; return to the watchface
    ActionPerformedSuccessfully,
}

pub trait Launcher: Send + Sync {
    /// Replace the app's glance with the slices added by `update`, which is
    /// called once with a fresh session and the slice limit.
    fn reload_glance(&self, update: &mut dyn FnMut(&mut dyn GlanceSession, usize));

    fn set_exit_reason(&self, reason: ExitReason);
}

struct ReloadSession {
    limit: usize,
    now: DateTime<Utc>,
    slices: Vec<GlanceSlice>,
}

impl GlanceSession for ReloadSession {
    fn add_slice(&mut self, slice: GlanceSlice) -> Result<(), GlanceError> {
        if slice.subtitle.len() > GLANCE_SUBTITLE_MAX {
            return Err(GlanceError::LengthExceeded(GLANCE_SUBTITLE_MAX));
        }
        if self.slices.len() >= self.limit {
            return Err(GlanceError::SliceCapacityExceeded(self.limit));
        }
        if slice.expires_at.is_some_and(|at| at <= self.now) {
            return Err(GlanceError::ExpiresInPast);
        }

        self.slices.push(slice);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct LauncherState {
    slices: Vec<GlanceSlice>,
    exit_reason: ExitReason,
}

/// In-memory launcher of the emulated device
#[derive(Debug)]
pub struct EmulatedLauncher {
    limit: usize,
    state: Mutex<LauncherState>,
}

impl EmulatedLauncher {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            state: Mutex::new(LauncherState::default()),
        }
    }

    /// Slices currently shown for the app
    pub fn slices(&self) -> Vec<GlanceSlice> {
        self.state.lock().map(|s| s.slices.clone()).unwrap_or_default()
    }

    pub fn exit_reason(&self) -> ExitReason {
        self.state.lock().map(|s| s.exit_reason).unwrap_or_default()
    }
}

impl Launcher for EmulatedLauncher {
    fn reload_glance(&self, update: &mut dyn FnMut(&mut dyn GlanceSession, usize)) {
        let mut session = ReloadSession {
            limit: self.limit,
            now: Utc::now(),
            slices: Vec::new(),
        };
        update(&mut session, self.limit);

        debug!("Glance reloaded with {} slice(s)", session.slices.len());
        if let Ok(mut state) = self.state.lock() {
            state.slices = session.slices;
        }
    }

    fn set_exit_reason(&self, reason: ExitReason) {
        if let Ok(mut state) = self.state.lock() {
            state.exit_reason = reason;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(subtitle: &str) -> GlanceSlice {
        GlanceSlice {
            subtitle: subtitle.to_string(),
            icon: None,
            expires_at: None,
        }
    }

    #[test]
    fn reload_replaces_previous_slices() {
        let launcher = EmulatedLauncher::new(2);
        launcher.reload_glance(&mut |session, _| {
            session.add_slice(slice("first")).unwrap();
        });
        launcher.reload_glance(&mut |session, _| {
            session.add_slice(slice("second")).unwrap();
        });

        assert_eq!(launcher.slices(), vec![slice("second")]);
    }

    #[test]
    fn session_enforces_limits() {
        let launcher = EmulatedLauncher::new(1);
        let mut results = Vec::new();
        launcher.reload_glance(&mut |session, limit| {
            assert_eq!(limit, 1);
            results.push(session.add_slice(slice("a")));
            results.push(session.add_slice(slice("b")));
            results.push(session.add_slice(slice(&"x".repeat(GLANCE_SUBTITLE_MAX + 1))));
        });

        assert_eq!(
            results,
            vec![
                Ok(()),
                Err(GlanceError::SliceCapacityExceeded(1)),
                Err(GlanceError::LengthExceeded(GLANCE_SUBTITLE_MAX)),
            ]
        );
        assert_eq!(launcher.slices().len(), 1);
    }

    #[test]
    fn expired_slices_are_rejected() {
        let launcher = EmulatedLauncher::new(4);
        let mut result = Ok(());
        launcher.reload_glance(&mut |session, _| {
            result = session.add_slice(GlanceSlice {
                expires_at: Some(Utc::now() - chrono::Duration::seconds(5)),
                ..slice("stale")
            });
        });

        assert_eq!(result, Err(GlanceError::ExpiresInPast));
        assert!(launcher.slices().is_empty());
    }

    #[test]
    fn exit_reason_is_recorded() {
        let launcher = EmulatedLauncher::new(1);
        assert_eq!(launcher.exit_reason(), ExitReason::NotSpecified);
        launcher.set_exit_reason(ExitReason::ActionPerformedSuccessfully);
        assert_eq!(launcher.exit_reason(), ExitReason::ActionPerformedSuccessfully);
    }
}
