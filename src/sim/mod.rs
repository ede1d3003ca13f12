//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed step per tick
//! - No rendering, timing or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, calculate_y_vel, handle_collision};
pub use state::{Ball, Direction, GamePhase, GameState, MatchState, Paddle, Playfield, Side};
pub use tick::{GameEvent, TickInput, TickOutcome, apply_movement_gate, resume, tick};
