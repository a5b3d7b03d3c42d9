//! Snake on a cell grid

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Step, advance_body};
pub use state::{SnakeBody, SnakeState};
pub use tick::tick;
