//! Status text shown on screen and in the launcher glance

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use super::TimerPhase;
use crate::services::ClockStyle;

/// Size of the status buffer, terminator included
pub const STATUS_BUFFER_LEN: usize = 32;

/// Short status line, at most `STATUS_BUFFER_LEN - 1` bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusText(String);

impl StatusText {
    /// Build a status line, truncating at a character boundary if the text
    /// does not fit the buffer.
    pub fn new(text: &str) -> Self {
        let max = STATUS_BUFFER_LEN - 1;
        if text.len() <= max {
            return Self(text.to_string());
        }

        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        Self(text[..end].to_string())
    }

    pub fn off() -> Self {
        Self::new(TimerPhase::Off.label())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StatusText {
    fn default() -> Self {
        Self::off()
    }
}

impl fmt::Display for StatusText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Describe `phase` as seen at `now`.
///
/// Running phases show the wall-clock time at which they end, not the time
/// they started: "SCREEN 17:30" means the screen phase is over at 17:30.
pub fn format_status<Tz>(phase: TimerPhase, now: &DateTime<Tz>, style: ClockStyle) -> StatusText
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let Some(interval) = phase.interval() else {
        return StatusText::off();
    };

    let ends_at = now.clone() + chrono::Duration::seconds(interval.as_secs() as i64);
    let text = format!("{} {}", phase.label(), ends_at.format(style.time_pattern()));
    StatusText::new(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, h, m, s).unwrap()
    }

    #[test]
    fn off_ignores_the_clock() {
        for now in [at(0, 0, 0), at(12, 30, 0), at(23, 59, 59)] {
            assert_eq!(format_status(TimerPhase::Off, &now, ClockStyle::TwentyFourHour).as_str(), "OFF");
            assert_eq!(format_status(TimerPhase::Off, &now, ClockStyle::TwelveHour).as_str(), "OFF");
        }
    }

    #[test]
    fn screen_shows_end_of_active_interval() {
        let now = at(17, 10, 0);
        assert_eq!(
            format_status(TimerPhase::Screen, &now, ClockStyle::TwentyFourHour).as_str(),
            "SCREEN 17:30"
        );
        assert_eq!(
            format_status(TimerPhase::Screen, &now, ClockStyle::TwelveHour).as_str(),
            "SCREEN 05:30 PM"
        );
    }

    #[test]
    fn rest_shows_end_of_rest_interval() {
        // 30 seconds later crosses into the next minute
        let now = at(9, 14, 45);
        assert_eq!(
            format_status(TimerPhase::Rest, &now, ClockStyle::TwentyFourHour).as_str(),
            "REST 09:15"
        );
        assert_eq!(
            format_status(TimerPhase::Rest, &now, ClockStyle::TwelveHour).as_str(),
            "REST 09:15 AM"
        );
    }

    #[test]
    fn screen_wraps_past_midnight() {
        let now = at(23, 50, 0);
        assert_eq!(
            format_status(TimerPhase::Screen, &now, ClockStyle::TwentyFourHour).as_str(),
            "SCREEN 00:10"
        );
    }

    #[test]
    fn long_text_is_truncated_to_the_buffer() {
        let text = StatusText::new(&"x".repeat(40));
        assert_eq!(text.as_str().len(), STATUS_BUFFER_LEN - 1);

        // 'é' is two bytes; the cut must not split it
        let text = StatusText::new(&"é".repeat(20));
        assert_eq!(text.as_str().len(), 30);
        assert!(text.as_str().chars().all(|c| c == 'é'));
    }
}
