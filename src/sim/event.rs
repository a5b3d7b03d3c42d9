//! Discrete events a tick reports to the outside (audio, logging)

use super::phase::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball touched the left, right or top wall
    WallBounce,
    /// Ball bounced off the paddle
    PaddleBounce,
    /// Brick at this index of the row-major grid was removed
    BrickBroken { index: usize },
    /// Ball crossed the bottom edge
    BallLost,
    /// Snake head landed on the food
    FoodEaten,
    /// Snake hit a wall or itself
    Crashed,
    /// Round reached a terminal condition
    RoundOver(Outcome),
}
