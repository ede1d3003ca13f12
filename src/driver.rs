//! Fixed-rate game loop
//!
//! The driver owns the game state and is its only mutator. Rendering, input
//! and timing are supplied at construction, so the loop runs the same against
//! a terminal or against scripted test doubles.

use std::io;
use std::time::Duration;

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, TickInput, resume, tick};

/// Snapshot handed to the frame sink
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub state: &'a GameState,
    /// Winner announcement, present only on the match-won frame
    pub announcement: Option<&'a str>,
}

/// Input sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub controls: TickInput,
    /// Quit key pressed
    pub quit: bool,
}

/// Draws frames
pub trait FrameSink {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()>;
}

/// Reports the current control state
pub trait InputSource {
    fn poll(&mut self) -> io::Result<InputSnapshot>;
}

/// Real-time pacing
pub trait Pacer {
    /// Block until the next tick is due
    fn wait_for_tick(&mut self);

    /// Block for `duration`
    fn delay(&mut self, duration: Duration);
}

/// How a call to `Driver::step` ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Continue,
    Quit,
}

/// Game loop over injected collaborators
pub struct Driver<S, I, P> {
    settings: Settings,
    state: GameState,
    sink: S,
    input: I,
    pacer: P,
}

impl<S: FrameSink, I: InputSource, P: Pacer> Driver<S, I, P> {
    pub fn new(settings: Settings, sink: S, input: I, pacer: P) -> Self {
        let state = GameState::new(&settings);
        Self {
            settings,
            state,
            sink,
            input,
            pacer,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run until a quit signal arrives
    pub fn run(&mut self) -> io::Result<()> {
        log::info!(
            "Match start: first to {} at {} fps",
            self.settings.winning_score,
            self.settings.fps
        );
        while self.step()? == StepResult::Continue {}
        log::info!(
            "Quit at {} - {}",
            self.state.score.left_score,
            self.state.score.right_score
        );
        Ok(())
    }

    /// Run one tick: render, sample input, simulate, then any holds
    pub fn step(&mut self) -> io::Result<StepResult> {
        self.pacer.wait_for_tick();
        self.sink.render(&Frame {
            state: &self.state,
            announcement: None,
        })?;

        let snapshot = self.input.poll()?;
        if snapshot.quit {
            return Ok(StepResult::Quit);
        }

        let outcome = tick(&mut self.state, &snapshot.controls);

        if outcome.point_scored().is_some() && self.hold(self.settings.point_pause())? {
            return Ok(StepResult::Quit);
        }

        if let GamePhase::MatchWon(winner) = self.state.phase {
            self.sink.render(&Frame {
                state: &self.state,
                announcement: Some(self.settings.win_text(winner)),
            })?;
            if self.hold(self.settings.win_pause())? {
                return Ok(StepResult::Quit);
            }
        }

        resume(&mut self.state);
        Ok(StepResult::Continue)
    }

    /// Keep the current frame up for `duration`.
    ///
    /// Waits in tick-sized slices, polling input between them. Returns true
    /// if a quit arrived.
    fn hold(&mut self, duration: Duration) -> io::Result<bool> {
        let slice = self.settings.tick_interval();
        let mut remaining = duration;
        while !remaining.is_zero() {
            let wait = remaining.min(slice);
            self.pacer.delay(wait);
            remaining -= wait;
            if self.input.poll()?.quit {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
