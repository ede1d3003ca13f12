//! Platform layer
//!
//! Concrete collaborators for the driver:
//! - Terminal canvas and session setup
//! - Keyboard input with held-key tracking
//! - Fixed-rate frame pacing

pub mod clock;
pub mod keyboard;
pub mod terminal;

pub use clock::FixedRatePacer;
pub use keyboard::{Control, KeyTracker, KeyboardInput};
pub use terminal::{TerminalCanvas, TerminalSession};
