//! Launcher summary publisher

use tracing::{error, info};

use crate::{
    services::{GlanceSession, GlanceSlice},
    state::StatusText,
};

/// Publish `status` as the app's single launcher slice (no icon, no
/// expiration). Does nothing when the launcher allows no slices.
pub fn update_app_glance(session: &mut dyn GlanceSession, limit: usize, status: &StatusText) {
    if limit < 1 {
        return;
    }

    info!("Glance: \"{}\"", status);
    let slice = GlanceSlice {
        subtitle: status.to_string(),
        icon: None,
        expires_at: None,
    };

    if let Err(e) = session.add_slice(slice) {
        error!("AppGlance error: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GlanceError;

    #[derive(Default)]
    struct RecordingSession {
        slices: Vec<GlanceSlice>,
        fail: bool,
    }

    impl GlanceSession for RecordingSession {
        fn add_slice(&mut self, slice: GlanceSlice) -> Result<(), GlanceError> {
            if self.fail {
                return Err(GlanceError::SliceCapacityExceeded(0));
            }
            self.slices.push(slice);
            Ok(())
        }
    }

    #[test]
    fn zero_limit_adds_nothing() {
        let mut session = RecordingSession::default();
        update_app_glance(&mut session, 0, &StatusText::off());
        assert!(session.slices.is_empty());
    }

    #[test]
    fn adds_exactly_one_permanent_slice() {
        let mut session = RecordingSession::default();
        update_app_glance(&mut session, 8, &StatusText::new("SCREEN 17:30"));

        assert_eq!(
            session.slices,
            vec![GlanceSlice {
                subtitle: "SCREEN 17:30".to_string(),
                icon: None,
                expires_at: None,
            }]
        );
    }

    #[test]
    fn rejected_slice_is_not_fatal() {
        let mut session = RecordingSession {
            fail: true,
            ..Default::default()
        };
        update_app_glance(&mut session, 1, &StatusText::off());
        assert!(session.slices.is_empty());
    }
}
