//! Pong - classic two-player paddle game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, scoring)
//! - `driver`: Fixed-rate game loop over injected collaborators
//! - `renderer`: Scene composition over a drawing canvas
//! - `platform`: Terminal canvas, keyboard input and frame pacing
//! - `settings`: Runtime configuration

pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{Driver, FrameSink, InputSource, Pacer};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const WIDTH: f32 = 700.0;
    pub const HEIGHT: f32 = 500.0;

    /// Ticks per second
    pub const FPS: u32 = 60;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Gap between a paddle and its side wall
    pub const PADDLE_MARGIN: f32 = 10.0;
    /// Paddle speed (pixels per tick)
    pub const PADDLE_VEL: f32 = 4.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 7.0;
    /// Horizontal ball speed, also the bound on its vertical component
    pub const BALL_MAX_VEL: f32 = 5.0;

    /// First player to reach this many points wins the match
    pub const WINNING_SCORE: u32 = 3;

    /// Hold after a point (milliseconds)
    pub const POINT_PAUSE_MS: u64 = 1000;
    /// Hold after a match win (milliseconds)
    pub const WIN_PAUSE_MS: u64 = 5000;
}
