//! Retro Arcade - terminal Breakout and Snake
//!
//! Core modules:
//! - `sim`: Deterministic fixed-step simulation (entities, collisions, phases)
//! - `app`: The `Game` trait the run loop drives
//! - `scheduler`: Frame pacing and the run loop
//! - `render`: Drawing surface trait and scene drawing
//! - `audio`: Event-driven tone feedback
//! - `frontend`: Terminal input and output
//! - `settings`: Data-driven configuration

pub mod app;
pub mod audio;
pub mod frontend;
pub mod render;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use app::Game;
pub use audio::AudioManager;
pub use settings::Settings;

/// Default game constants
pub mod consts {
    /// Arena dimensions in pixels
    pub const ARENA_WIDTH: i32 = 800;
    pub const ARENA_HEIGHT: i32 = 600;

    /// Breakout runs one tick per frame at 60 Hz
    pub const BREAKOUT_TICK_HZ: u32 = 60;
    /// Snake moves one cell per tick
    pub const SNAKE_TICK_HZ: u32 = 15;
}
