//! Screen and vibration motor

use std::sync::Mutex;

use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Size {
    pub w: i16,
    pub h: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub w: i16,
    pub h: i16,
}

/// Everything the app's single window puts on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub label: Rect,
    pub text: String,
    pub action_bar: bool,
}

/// Window surface of the host
pub trait Display: Send + Sync {
    fn bounds(&self) -> Size;

    /// Show `frame`, replacing whatever the app had on screen
    fn render(&self, frame: &Frame);

    /// Take the app's window off the screen
    fn remove_window(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VibePattern {
    DoublePulse,
    LongPulse,
}

pub trait Vibes: Send + Sync {
    fn enqueue(&self, pattern: VibePattern);
}

/// Rectangular 144x168 screen
pub const DEFAULT_BOUNDS: Size = Size { w: 144, h: 168 };

#[derive(Debug, Default)]
struct Screen {
    last: Option<Frame>,
    visible: bool,
}

/// Display that logs what it draws and remembers the last frame
#[derive(Debug)]
pub struct TraceDisplay {
    bounds: Size,
    screen: Mutex<Screen>,
}

impl TraceDisplay {
    pub fn new(bounds: Size) -> Self {
        Self {
            bounds,
            screen: Mutex::new(Screen::default()),
        }
    }

    /// Last frame rendered, whether or not it is still visible
    pub fn last_frame(&self) -> Option<Frame> {
        self.screen.lock().ok().and_then(|screen| screen.last.clone())
    }

    pub fn is_visible(&self) -> bool {
        self.screen.lock().map(|screen| screen.visible).unwrap_or(false)
    }
}

impl Default for TraceDisplay {
    fn default() -> Self {
        Self::new(DEFAULT_BOUNDS)
    }
}

impl Display for TraceDisplay {
    fn bounds(&self) -> Size {
        self.bounds
    }

    fn render(&self, frame: &Frame) {
        info!("Screen: \"{}\"", frame.text);
        debug!("Label at {:?}, action bar: {}", frame.label, frame.action_bar);
        if let Ok(mut screen) = self.screen.lock() {
            screen.last = Some(frame.clone());
            screen.visible = true;
        }
    }

    fn remove_window(&self) {
        debug!("Window removed");
        if let Ok(mut screen) = self.screen.lock() {
            screen.visible = false;
        }
    }
}

/// Vibration motor that logs and records each pattern
#[derive(Debug, Default)]
pub struct TraceVibes {
    history: Mutex<Vec<VibePattern>>,
}

impl TraceVibes {
    pub fn history(&self) -> Vec<VibePattern> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }
}

impl Vibes for TraceVibes {
    fn enqueue(&self, pattern: VibePattern) {
        info!("Vibe: {:?}", pattern);
        if let Ok(mut history) = self.history.lock() {
            history.push(pattern);
        }
    }
}
