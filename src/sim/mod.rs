//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete steps only, speeds are distances per tick
//! - Seeded RNG only
//! - Stable iteration order (row-major bricks, tail-to-head body)
//! - No rendering, audio or platform dependencies

pub mod breakout;
pub mod event;
pub mod geom;
pub mod input;
pub mod phase;
pub mod score;
pub mod snake;

pub use breakout::BreakoutState;
pub use event::GameEvent;
pub use geom::{Direction, GridSize, Rect};
pub use input::{InputFrame, Keys, PaddleInput, SteerInput};
pub use phase::{GamePhase, Outcome, PhaseMachine, PhaseRules};
pub use score::{LifeLoss, ScoreBoard};
pub use snake::SnakeState;
