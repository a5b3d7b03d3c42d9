//! Game settings
//!
//! Every field has a default matching the classic arcade rules, so a settings file
//! only needs the values it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::PhaseRules;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Tunables for one breakout variant (distances in pixels, speeds in pixels per tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutConfig {
    pub tick_hz: u32,
    pub arena_width: i32,
    pub arena_height: i32,
    pub ball_size: i32,
    pub ball_speed: i32,
    pub paddle_width: i32,
    pub paddle_height: i32,
    /// Gap between the paddle top and the arena bottom
    pub paddle_margin: i32,
    pub paddle_speed: i32,
    pub brick_rows: i32,
    pub brick_cols: i32,
    pub brick_height: i32,
    /// Empty pixels right and below each brick
    pub brick_gap: i32,
    pub points_per_brick: u32,
    /// `None` means a lost ball only re-serves
    pub lives: Option<u8>,
    /// Frozen ticks after a lost ball
    pub serve_delay_ticks: u32,
    /// Recentre the paddle and reset the horizontal direction on a lost ball.
    /// When off, only the ball returns to the centre, heading up.
    pub recenter_on_loss: bool,
    /// Open on the title screen and return there after a round
    pub show_menu: bool,
}

impl BreakoutConfig {
    /// Menu, three lives, scoring
    pub fn classic() -> Self {
        Self {
            tick_hz: BREAKOUT_TICK_HZ,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            ball_size: 10,
            ball_speed: 4,
            paddle_width: 120,
            paddle_height: 10,
            paddle_margin: 40,
            paddle_speed: 6,
            brick_rows: 5,
            brick_cols: 8,
            brick_height: 30,
            brick_gap: 2,
            points_per_brick: 10,
            lives: Some(3),
            serve_delay_ticks: BREAKOUT_TICK_HZ,
            recenter_on_loss: true,
            show_menu: true,
        }
    }

    /// No menu, no life count
    pub fn endless() -> Self {
        Self {
            lives: None,
            serve_delay_ticks: 0,
            recenter_on_loss: false,
            show_menu: false,
            ..Self::classic()
        }
    }

    pub fn phase_rules(&self) -> PhaseRules {
        if self.show_menu {
            PhaseRules::WITH_MENU
        } else {
            PhaseRules::ARCADE
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason| Err(SettingsError::Invalid { field, reason });
        if self.tick_hz == 0 {
            return invalid("tick_hz", "must be positive");
        }
        if self.arena_width <= 0 || self.arena_height <= 0 {
            return invalid("arena", "must have a positive size");
        }
        if self.ball_size <= 0 || self.ball_speed <= 0 {
            return invalid("ball", "size and speed must be positive");
        }
        if self.paddle_width <= 0 || self.paddle_width > self.arena_width {
            return invalid("paddle_width", "must fit inside the arena");
        }
        if self.brick_rows <= 0 || self.brick_cols <= 0 || self.brick_height <= 0 {
            return invalid("bricks", "grid must be non-empty");
        }
        if self.brick_gap < 0 || self.brick_gap >= self.arena_width / self.brick_cols {
            return invalid("brick_gap", "must be smaller than a brick");
        }
        if self.lives == Some(0) {
            return invalid("lives", "must be at least one");
        }
        Ok(())
    }
}

impl Default for BreakoutConfig {
    fn default() -> Self {
        Self::classic()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    pub tick_hz: u32,
    pub arena_width: i32,
    pub arena_height: i32,
    /// Pixels per grid cell
    pub cell_size: i32,
    pub initial_length: usize,
    pub points_per_food: u32,
}

impl SnakeConfig {
    pub fn cols(&self) -> i32 {
        self.arena_width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.arena_height / self.cell_size
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason| Err(SettingsError::Invalid { field, reason });
        if self.tick_hz == 0 {
            return invalid("tick_hz", "must be positive");
        }
        if self.cell_size <= 0 {
            return invalid("cell_size", "must be positive");
        }
        if self.initial_length == 0 {
            return invalid("initial_length", "must be at least one");
        }
        // Body starts left of centre, tail end must stay on the board
        if self.cols() < 2 * self.initial_length as i32 + 2 || self.rows() < 1 {
            return invalid("arena", "too small for the starting snake");
        }
        Ok(())
    }
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            tick_hz: SNAKE_TICK_HZ,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            cell_size: 20,
            initial_length: 3,
            points_per_food: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
        }
    }
}

/// All settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub classic: BreakoutConfig,
    pub endless: BreakoutConfig,
    pub snake: SnakeConfig,
    pub audio: AudioSettings,
    /// Fixed RNG seed, random per run when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            classic: BreakoutConfig::classic(),
            endless: BreakoutConfig::endless(),
            snake: SnakeConfig::default(),
            audio: AudioSettings::default(),
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.classic.validate()?;
        self.endless.validate()?;
        self.snake.validate()?;
        if !(0.0..=1.0).contains(&self.audio.master_volume) {
            return Err(SettingsError::Invalid {
                field: "master_volume",
                reason: "must be between 0 and 1",
            });
        }
        Ok(())
    }
}
