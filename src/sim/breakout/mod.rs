//! Breakout: paddle, ball and a row-major brick grid

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Contacts, resolve_ball};
pub use state::{Ball, BreakoutState, Brick, Paddle, layout_bricks};
pub use tick::tick;
