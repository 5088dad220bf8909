//! The app's single window and its haptic feedback

use crate::{
    services::{Display, Frame, Rect, Size, VibePattern},
    state::{StatusText, TimerPhase},
};

pub const LABEL_HEIGHT: i16 = 60;
pub const ACTION_BAR_WIDTH: i16 = 30;

/// Vertically centered, full-width label; narrowed when an action bar takes
/// the right edge.
pub fn label_rect(bounds: Size, action_bar: bool) -> Rect {
    let width = if action_bar {
        bounds.w - ACTION_BAR_WIDTH
    } else {
        bounds.w
    };

    Rect {
        x: 0,
        y: bounds.h / 2 - LABEL_HEIGHT / 2,
        w: width,
        h: LABEL_HEIGHT,
    }
}

/// Pulse played when a phase is shown
pub fn vibe_for(phase: TimerPhase) -> Option<VibePattern> {
    match phase {
        TimerPhase::Screen => Some(VibePattern::DoublePulse),
        TimerPhase::Rest => Some(VibePattern::LongPulse),
        TimerPhase::Off => None,
    }
}

/// Window holding one centered status label
#[derive(Debug)]
pub struct MainWindow {
    label: Rect,
    action_bar: bool,
    text: StatusText,
}

impl MainWindow {
    /// Lay out the window for the display and put it on screen
    pub fn load(display: &dyn Display, action_bar: bool, text: StatusText) -> Self {
        let window = Self {
            label: label_rect(display.bounds(), action_bar),
            action_bar,
            text,
        };
        display.render(&window.frame());
        window
    }

    pub fn set_text(&mut self, display: &dyn Display, text: StatusText) {
        self.text = text;
        display.render(&self.frame());
    }

    pub fn frame(&self) -> Frame {
        Frame {
            label: self.label,
            text: self.text.to_string(),
            action_bar: self.action_bar,
        }
    }

    pub fn unload(self, display: &dyn Display) {
        display.remove_window();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::TraceDisplay;

    #[test]
    fn label_is_centered() {
        let rect = label_rect(Size { w: 144, h: 168 }, false);
        assert_eq!(rect, Rect { x: 0, y: 54, w: 144, h: 60 });

        let rect = label_rect(Size { w: 144, h: 168 }, true);
        assert_eq!(rect.w, 114);
    }

    #[test]
    fn haptics_follow_phase() {
        assert_eq!(vibe_for(TimerPhase::Screen), Some(VibePattern::DoublePulse));
        assert_eq!(vibe_for(TimerPhase::Rest), Some(VibePattern::LongPulse));
        assert_eq!(vibe_for(TimerPhase::Off), None);
    }

    #[test]
    fn window_renders_and_unloads() {
        let display = TraceDisplay::default();
        let mut window = MainWindow::load(&display, false, StatusText::off());
        assert!(display.is_visible());
        assert_eq!(display.last_frame().unwrap().text, "OFF");

        window.set_text(&display, StatusText::new("REST 10:00"));
        assert_eq!(display.last_frame().unwrap().text, "REST 10:00");

        window.unload(&display);
        assert!(!display.is_visible());
    }
}
