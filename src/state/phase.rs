//! Timer phase and its transitions

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Length of the screen (active) phase
pub const ACTIVE_INTERVAL: Duration = Duration::from_secs(20 * 60);
/// Length of the rest phase
pub const REST_INTERVAL: Duration = Duration::from_secs(30);

/// Current mode of the interval timer.
///
/// Stored as its ordinal; the ordinals are part of the persisted format and
/// of the wake-up cookie, so they must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    #[default]
    Off,
    Rest,
    Screen,
}

/// A scheduled move to the next phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: TimerPhase,
    pub delay: Duration,
}

impl TimerPhase {
    /// Integer form used by the persistent store and wake-up cookies
    pub fn ordinal(self) -> i32 {
        match self {
            TimerPhase::Off => 0,
            TimerPhase::Rest => 1,
            TimerPhase::Screen => 2,
        }
    }

    /// Decode a stored ordinal. Anything unrecognized is treated as OFF.
    pub fn from_ordinal(value: i32) -> Self {
        match value {
            1 => TimerPhase::Rest,
            2 => TimerPhase::Screen,
            _ => TimerPhase::Off,
        }
    }

    /// User-initiated state change: OFF starts a screen phase, anything
    /// running is switched off.
    pub fn toggle(self) -> Self {
        match self {
            TimerPhase::Screen | TimerPhase::Rest => TimerPhase::Off,
            TimerPhase::Off => TimerPhase::Screen,
        }
    }

    /// The transition armed when this phase begins, if any
    pub fn advance(self) -> Option<Transition> {
        match self {
            TimerPhase::Screen => Some(Transition {
                next: TimerPhase::Rest,
                delay: ACTIVE_INTERVAL,
            }),
            TimerPhase::Rest => Some(Transition {
                next: TimerPhase::Screen,
                delay: REST_INTERVAL,
            }),
            TimerPhase::Off => None,
        }
    }

    /// How long this phase lasts once entered
    pub fn interval(self) -> Option<Duration> {
        self.advance().map(|transition| transition.delay)
    }

    pub fn label(self) -> &'static str {
        match self {
            TimerPhase::Off => "OFF",
            TimerPhase::Rest => "REST",
            TimerPhase::Screen => "SCREEN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_oscillates_between_off_and_screen() {
        assert_eq!(TimerPhase::Off.toggle(), TimerPhase::Screen);
        assert_eq!(TimerPhase::Off.toggle().toggle(), TimerPhase::Off);
    }

    #[test]
    fn toggle_absorbs_rest_into_off() {
        assert_eq!(TimerPhase::Rest.toggle(), TimerPhase::Off);
        // REST is never reached again by toggling
        assert_eq!(TimerPhase::Rest.toggle().toggle(), TimerPhase::Screen);
    }

    #[test]
    fn advance_alternates_screen_and_rest() {
        let screen = TimerPhase::Screen.advance().unwrap();
        assert_eq!(screen.next, TimerPhase::Rest);
        assert_eq!(screen.delay, Duration::from_secs(1200));

        let rest = TimerPhase::Rest.advance().unwrap();
        assert_eq!(rest.next, TimerPhase::Screen);
        assert_eq!(rest.delay, Duration::from_secs(30));

        assert_eq!(TimerPhase::Off.advance(), None);
        assert_eq!(TimerPhase::Off.interval(), None);
    }

    #[test]
    fn ordinals_decode_and_default_to_off() {
        for phase in [TimerPhase::Off, TimerPhase::Rest, TimerPhase::Screen] {
            assert_eq!(TimerPhase::from_ordinal(phase.ordinal()), phase);
        }
        assert_eq!(TimerPhase::from_ordinal(7), TimerPhase::Off);
        assert_eq!(TimerPhase::from_ordinal(-1), TimerPhase::Off);
    }
}
