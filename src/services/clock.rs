//! Wall clock and the device's clock-style preference

use std::sync::Mutex;

use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 12h/24h display preference of the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum ClockStyle {
    #[default]
    #[value(name = "24h")]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[value(name = "12h")]
    #[serde(rename = "12h")]
    TwelveHour,
}

impl ClockStyle {
    /// strftime pattern for an hour:minute time in this style
    pub fn time_pattern(self) -> &'static str {
        match self {
            ClockStyle::TwentyFourHour => "%H:%M",
            ClockStyle::TwelveHour => "%I:%M %p",
        }
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
    fn style(&self) -> ClockStyle;
}

/// The host's real clock
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    style: ClockStyle,
}

impl SystemClock {
    pub fn new(style: ClockStyle) -> Self {
        Self { style }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn style(&self) -> ClockStyle {
        self.style
    }
}

/// A clock that only moves when told to.
///
/// The binary always runs on [`SystemClock`]; this one exists so tests and
/// embedders of the emulator can step through phase changes without waiting.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Local>>,
    style: ClockStyle,
}

impl ManualClock {
    pub fn new(now: DateTime<Local>, style: ClockStyle) -> Self {
        Self {
            now: Mutex::new(now),
            style,
        }
    }

    pub fn advance(&self, by: std::time::Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now = *now + chrono::Duration::seconds(by.as_secs() as i64);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        self.now.lock().map(|now| *now).unwrap_or_else(|_| Local::now())
    }

    fn style(&self) -> ClockStyle {
        self.style
    }
}
