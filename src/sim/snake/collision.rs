//! Snake head movement and collision
//!
//! The self-collision test runs against the body *before* the tail moves, so
//! stepping into the cell the tail is about to vacate is fatal. Games built on
//! this rule rely on it; do not "fix" it by popping the tail first.
//!
//! Eating keeps the tail and also owes one more tail-keep, so each food grows
//! the body by two cells.

use glam::IVec2;

use super::state::SnakeBody;
use crate::sim::geom::{Direction, GridSize};

/// Result of one body step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved,
    /// Head landed on the food; the tail is kept this tick
    Ate,
    OutOfBounds,
    SelfHit,
}

impl Step {
    pub fn is_fatal(self) -> bool {
        matches!(self, Step::OutOfBounds | Step::SelfHit)
    }
}

/// Move the body one cell in `direction`. A fatal step leaves the body untouched.
pub fn advance_body(body: &mut SnakeBody, direction: Direction, grid: GridSize, food: IVec2) -> Step {
    let candidate = body.head() + direction.delta();

    if !grid.contains(candidate) {
        return Step::OutOfBounds;
    }
    if body.contains(candidate) {
        return Step::SelfHit;
    }

    body.push_head(candidate);

    if candidate == food {
        body.growth_pending += 1;
        return Step::Ate;
    }

    if body.growth_pending > 0 {
        body.growth_pending -= 1;
    } else {
        body.pop_tail();
    }
    Step::Moved
}
