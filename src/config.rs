//! Configuration and CLI argument handling for the device emulator

use std::{path::PathBuf, time::Duration};
use clap::Parser;

use crate::{
    app::{AppConfig, WakeupPayload},
    services::ClockStyle,
};

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "eye-timer")]
#[command(about = "Screen/rest interval timer running on an emulated watch")]
#[command(version)]
pub struct Config {
    /// Port of the emulated launcher
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Directory holding the persistent store and scheduled wake-ups
    #[arg(short, long, default_value = "eye-timer-data")]
    pub data_dir: PathBuf,

    /// Clock style preference of the device
    #[arg(long, value_enum, default_value = "24h")]
    pub clock: ClockStyle,

    /// Seconds the app window stays up before the app exits
    #[arg(long, default_value = "3")]
    pub display_secs: u64,

    /// How a wake-up carries the phase it switches to
    #[arg(long, value_enum, default_value = "cookie")]
    pub wakeup_payload: WakeupPayload,

    /// Narrow the status label to make room for an action bar
    #[arg(long)]
    pub action_bar: bool,

    /// Number of glance slices the launcher accepts per app
    #[arg(long, default_value = "8")]
    pub glance_limit: usize,

    /// Wake-up dispatch polling interval in milliseconds
    #[arg(long, default_value = "1000")]
    pub poll_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Settings handed to every app instance
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            display_duration: Duration::from_secs(self.display_secs),
            payload: self.wakeup_payload,
            action_bar: self.action_bar,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        // tokio's interval panics on a zero period
        Duration::from_millis(self.poll_ms.max(1))
    }
}
