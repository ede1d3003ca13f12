//! Game settings
//!
//! Defaults mirror `crate::consts`. A JSON file may override any subset of
//! fields; everything else falls back to the defaults. Playfield geometry
//! and speeds are fixed in `crate::consts` and cannot be overridden.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Side;

/// Errors raised while loading or validating settings
#[derive(Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    Io(std::io::Error),
    /// Settings file is not valid JSON for `Settings`
    Parse(serde_json::Error),
    /// A value is out of range
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "failed to parse settings: {e}"),
            SettingsError::Invalid(msg) => write!(f, "invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    // === Match ===
    pub winning_score: u32,
    pub left_win_text: String,
    pub right_win_text: String,

    // === Timing ===
    /// Ticks per second
    pub fps: u32,
    pub point_pause_ms: u64,
    pub win_pause_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            winning_score: WINNING_SCORE,
            left_win_text: "Left Player Won!".to_string(),
            right_win_text: "Right Player Won!".to_string(),

            fps: FPS,
            point_pause_ms: POINT_PAUSE_MS,
            win_pause_ms: WIN_PAUSE_MS,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check every value is usable by the driver
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.winning_score == 0 {
            return Err(SettingsError::Invalid("winning_score must be at least 1".into()));
        }
        if self.fps == 0 {
            return Err(SettingsError::Invalid("fps must be at least 1".into()));
        }
        Ok(())
    }

    /// Time between ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }

    pub fn point_pause(&self) -> Duration {
        Duration::from_millis(self.point_pause_ms)
    }

    pub fn win_pause(&self) -> Duration {
        Duration::from_millis(self.win_pause_ms)
    }

    /// Announcement shown when `side` wins the match
    pub fn win_text(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_win_text,
            Side::Right => &self.right_win_text,
        }
    }
}
