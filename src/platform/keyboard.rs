//! Keyboard input
//!
//! Terminals report key presses, not key state. Where the terminal supports
//! the keyboard enhancement protocol we also get release events and track
//! held keys exactly. Otherwise a press counts as held for a short window,
//! which auto-repeat keeps refreshing while the key is down.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::driver::{InputSnapshot, InputSource};
use crate::sim::TickInput;

/// How long a press counts as held without a release event
pub const DEFAULT_HOLD_WINDOW: Duration = Duration::from_millis(150);

/// The four paddle controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl Control {
    const ALL: [Control; 4] = [
        Control::LeftUp,
        Control::LeftDown,
        Control::RightUp,
        Control::RightDown,
    ];

    /// W/S for the left paddle, arrow keys for the right
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') => Some(Control::LeftUp),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Control::LeftDown),
            KeyCode::Up => Some(Control::RightUp),
            KeyCode::Down => Some(Control::RightDown),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Held-key state built from terminal events
#[derive(Debug, Clone)]
pub struct KeyTracker {
    /// Last press (or repeat) per control; cleared on release
    pressed: [Option<Instant>; 4],
    /// Terminal delivers release events
    release_events: bool,
    hold_window: Duration,
    quit: bool,
}

impl KeyTracker {
    pub fn new(release_events: bool, hold_window: Duration) -> Self {
        Self {
            pressed: [None; 4],
            release_events,
            hold_window,
            quit: false,
        }
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        let Event::Key(key) = event else {
            return;
        };

        if key.kind != KeyEventKind::Release && is_quit_key(key) {
            self.quit = true;
            return;
        }

        if let Some(control) = Control::from_key(key.code) {
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    self.pressed[control.index()] = Some(now);
                }
                KeyEventKind::Release => self.pressed[control.index()] = None,
            }
        }
    }

    pub fn is_held(&self, control: Control, now: Instant) -> bool {
        match self.pressed[control.index()] {
            None => false,
            Some(_) if self.release_events => true,
            Some(at) => now.saturating_duration_since(at) <= self.hold_window,
        }
    }

    pub fn snapshot(&self, now: Instant) -> InputSnapshot {
        let held: [bool; 4] = Control::ALL.map(|c| self.is_held(c, now));
        InputSnapshot {
            controls: TickInput {
                left_up: held[Control::LeftUp.index()],
                left_down: held[Control::LeftDown.index()],
                right_up: held[Control::RightUp.index()],
                right_down: held[Control::RightDown.index()],
            },
            quit: self.quit,
        }
    }
}

/// Input source reading crossterm's event queue
#[derive(Debug)]
pub struct KeyboardInput {
    tracker: KeyTracker,
}

impl KeyboardInput {
    pub fn new(release_events: bool) -> Self {
        if !release_events {
            log::info!(
                "Terminal has no key release events, holding presses for {:?}",
                DEFAULT_HOLD_WINDOW
            );
        }
        Self {
            tracker: KeyTracker::new(release_events, DEFAULT_HOLD_WINDOW),
        }
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> io::Result<InputSnapshot> {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.tracker.handle_event(&event, Instant::now());
        }
        Ok(self.tracker.snapshot(Instant::now()))
    }
}
