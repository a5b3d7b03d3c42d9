//! Ball collision resolution
//!
//! Checks run in a fixed order every tick: walls, paddle, bricks. Only signs
//! of the velocity change, never its magnitude. The bottom edge is not a wall;
//! the tick reports it as a lost ball.

use glam::IVec2;

use super::state::{Ball, Brick};
use crate::sim::geom::Rect;

/// What the ball touched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub wall: bool,
    pub paddle: bool,
    /// Index of the removed brick
    pub brick: Option<usize>,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.wall || self.paddle || self.brick.is_some()
    }
}

/// Left, right and top walls. Contact is inclusive at the edges and flips
/// the sign of the matching component, whatever its current direction.
pub fn wall_bounce(ball: &mut Ball, arena: IVec2) -> bool {
    let mut hit = false;
    if ball.rect.left() <= 0 || ball.rect.right() >= arena.x {
        ball.vel.x = -ball.vel.x;
        hit = true;
    }
    if ball.rect.top() <= 0 {
        ball.vel.y = -ball.vel.y;
        hit = true;
    }
    hit
}

/// Paddle bounce, only while the ball is falling
pub fn paddle_bounce(ball: &mut Ball, paddle: &Rect, speed: i32) -> bool {
    if ball.vel.y > 0 && ball.rect.intersects(paddle) {
        ball.vel.y = -speed;
        return true;
    }
    false
}

/// Remove the first alive brick in row-major order that overlaps the ball.
///
/// At most one brick is removed per tick even when the ball overlaps several.
pub fn brick_hit(ball: &mut Ball, bricks: &mut [Brick]) -> Option<usize> {
    let (index, brick) = bricks
        .iter_mut()
        .enumerate()
        .find(|(_, brick)| brick.alive && ball.rect.intersects(&brick.rect))?;
    brick.alive = false;
    ball.vel.y = -ball.vel.y;
    Some(index)
}

/// Run all checks in order
pub fn resolve_ball(
    ball: &mut Ball,
    paddle: &Rect,
    bricks: &mut [Brick],
    arena: IVec2,
    speed: i32,
) -> Contacts {
    let wall = wall_bounce(ball, arena);
    let paddle = paddle_bounce(ball, paddle, speed);
    let brick = brick_hit(ball, bricks);
    Contacts { wall, paddle, brick }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARENA: IVec2 = IVec2::new(800, 600);

    fn ball_at(x: i32, y: i32, dx: i32, dy: i32) -> Ball {
        Ball {
            rect: Rect::new(x, y, 10, 10),
            vel: IVec2::new(dx, dy),
        }
    }

    #[test]
    fn test_left_and_top_walls() {
        let mut ball = ball_at(0, 0, -4, -4);
        assert!(wall_bounce(&mut ball, ARENA));
        assert_eq!(ball.vel, IVec2::new(4, 4));
    }

    #[test]
    fn test_right_wall_inclusive() {
        let mut ball = ball_at(790, 300, 4, 4);
        assert!(wall_bounce(&mut ball, ARENA));
        assert_eq!(ball.vel, IVec2::new(-4, 4));

        let mut ball = ball_at(789, 300, 4, 4);
        assert!(!wall_bounce(&mut ball, ARENA));
    }

    #[test]
    fn test_wall_contact_flips_even_when_moving_away() {
        let mut ball = ball_at(0, 300, 4, 4);
        assert!(wall_bounce(&mut ball, ARENA));
        assert_eq!(ball.vel, IVec2::new(-4, 4));

        let mut ball = ball_at(300, 0, 4, 4);
        assert!(wall_bounce(&mut ball, ARENA));
        assert_eq!(ball.vel, IVec2::new(4, -4));
    }

    #[test]
    fn test_paddle_only_when_falling() {
        let paddle = Rect::new(340, 560, 120, 10);
        let mut ball = ball_at(384, 552, 4, 4);
        assert!(paddle_bounce(&mut ball, &paddle, 4));
        assert_eq!(ball.vel, IVec2::new(4, -4));

        // Same contact next tick: already rising, no second bounce
        assert!(!paddle_bounce(&mut ball, &paddle, 4));
        assert_eq!(ball.vel, IVec2::new(4, -4));
    }

    #[test]
    fn test_first_brick_in_scan_order_wins() {
        let mut bricks = vec![
            Brick { rect: Rect::new(0, 0, 98, 28), alive: true },
            Brick { rect: Rect::new(100, 0, 98, 28), alive: true },
        ];
        // Straddles the gap between both bricks
        let mut ball = ball_at(95, 20, 4, -4);
        assert_eq!(brick_hit(&mut ball, &mut bricks), Some(0));
        assert!(!bricks[0].alive);
        assert!(bricks[1].alive);
        assert_eq!(ball.vel, IVec2::new(4, 4));

        // Dead bricks are skipped, next overlap goes to brick 1
        assert_eq!(brick_hit(&mut ball, &mut bricks), Some(1));
        assert_eq!(brick_hit(&mut ball, &mut bricks), None);
    }

    #[test]
    fn test_resolve_reports_contacts() {
        let paddle = Rect::new(340, 560, 120, 10);
        let mut bricks = Vec::new();
        let mut ball = ball_at(400, 300, 4, -4);
        let contacts = resolve_ball(&mut ball, &paddle, &mut bricks, ARENA, 4);
        assert!(!contacts.any());
    }
}
