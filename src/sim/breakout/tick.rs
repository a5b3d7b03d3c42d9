//! Fixed-step breakout tick
//!
//! Order inside a Playing tick: paddle intent, ball move, collisions, score,
//! bottom edge, terminal conditions.

use glam::IVec2;

use super::collision::resolve_ball;
use super::state::BreakoutState;
use crate::sim::event::GameEvent;
use crate::sim::input::PaddleInput;
use crate::sim::phase::{GamePhase, Outcome};
use crate::sim::score::{LifeLoss, ScoreBoard};

/// Advance the breakout state by one tick
pub fn tick(state: &mut BreakoutState, input: &PaddleInput) {
    state.events.clear();

    match state.phase.phase() {
        GamePhase::Menu => {
            if input.confirm {
                state.phase.start();
            }
            return;
        }
        GamePhase::GameOver => {
            if input.confirm && state.phase.restart() {
                state.reset_round();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Round frozen after a lost ball
    if state.serve_ticks > 0 {
        state.serve_ticks -= 1;
        return;
    }

    let config = &state.config;
    let arena = IVec2::new(config.arena_width, config.arena_height);

    state
        .paddle
        .slide(input.axis() * config.paddle_speed, config.arena_width);

    state.ball.advance();

    let contacts = resolve_ball(
        &mut state.ball,
        &state.paddle.rect,
        &mut state.bricks,
        arena,
        config.ball_speed,
    );
    if contacts.wall {
        state.events.push(GameEvent::WallBounce);
    }
    if contacts.paddle {
        state.events.push(GameEvent::PaddleBounce);
    }
    if let Some(index) = contacts.brick {
        state.board.award(config.points_per_brick);
        state.events.push(GameEvent::BrickBroken { index });
    }

    if state.ball.rect.bottom() >= arena.y {
        state.events.push(GameEvent::BallLost);
        match state.board.lose_life() {
            LifeLoss::Continue => {
                log::debug!("Ball lost, lives left: {:?}", state.board.lives);
                state.reserve();
            }
            LifeLoss::Exhausted => {}
        }
    }

    // A cleared board wins even if the last ball dropped on the same tick
    let outcome = if ScoreBoard::is_cleared(state.bricks_remaining()) {
        Some(Outcome::Won)
    } else if state.board.is_lost() {
        Some(Outcome::Lost)
    } else {
        None
    };
    if let Some(outcome) = outcome {
        state.phase.finish(outcome);
        state.events.push(GameEvent::RoundOver(outcome));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::BreakoutConfig;
    use crate::sim::geom::Rect;
    use proptest::prelude::*;

    fn playing(config: BreakoutConfig) -> BreakoutState {
        let mut state = BreakoutState::new(config);
        tick(&mut state, &PaddleInput { confirm: true, ..Default::default() });
        assert_eq!(state.phase.phase(), GamePhase::Playing);
        state
    }

    fn idle() -> PaddleInput {
        PaddleInput::default()
    }

    #[test]
    fn test_menu_waits_for_confirm() {
        let mut state = BreakoutState::new(BreakoutConfig::classic());
        for _ in 0..10 {
            tick(&mut state, &PaddleInput { left: true, ..Default::default() });
        }
        assert_eq!(state.phase.phase(), GamePhase::Menu);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.ball.rect, Rect::new(400, 300, 10, 10));
        assert_eq!(state.paddle.rect.x, 340);

        tick(&mut state, &PaddleInput { confirm: true, ..Default::default() });
        assert_eq!(state.phase.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_endless_starts_playing() {
        let mut state = BreakoutState::new(BreakoutConfig::endless());
        assert_eq!(state.phase.phase(), GamePhase::Playing);
        tick(&mut state, &idle());
        assert_eq!(state.ball.rect.pos(), IVec2::new(404, 296));
    }

    #[test]
    fn test_paddle_bounce_scenario() {
        let mut state = playing(BreakoutConfig::classic());
        state.ball.rect.set_pos(IVec2::new(380, 548));
        state.ball.vel = IVec2::new(4, 4);

        tick(&mut state, &idle());

        assert_eq!(state.ball.vel, IVec2::new(4, -4));
        assert_eq!(state.events, vec![GameEvent::PaddleBounce]);
    }

    #[test]
    fn test_paddle_moves_with_input() {
        let mut state = playing(BreakoutConfig::classic());
        tick(&mut state, &PaddleInput { left: true, ..Default::default() });
        assert_eq!(state.paddle.rect.x, 334);
        tick(&mut state, &PaddleInput { right: true, ..Default::default() });
        tick(&mut state, &PaddleInput { right: true, ..Default::default() });
        assert_eq!(state.paddle.rect.x, 346);
    }

    #[test]
    fn test_brick_scores_once() {
        let mut state = playing(BreakoutConfig::classic());
        // Just below brick 0 in row 4 (y 120..148), rising into it
        state.ball.rect.set_pos(IVec2::new(40, 150));
        state.ball.vel = IVec2::new(4, -4);

        tick(&mut state, &idle());

        assert_eq!(state.events, vec![GameEvent::BrickBroken { index: 32 }]);
        assert_eq!(state.board.score, 10);
        assert!(!state.bricks[32].alive);
        assert_eq!(state.ball.vel, IVec2::new(4, 4));

        // Ball still overlaps the dead brick's area: no second score
        tick(&mut state, &idle());
        assert_eq!(state.board.score, 10);
    }

    #[test]
    fn test_last_brick_wins() {
        let mut state = playing(BreakoutConfig::classic());
        for brick in state.bricks.iter_mut().skip(1) {
            brick.alive = false;
        }
        state.ball.rect.set_pos(IVec2::new(40, 30));
        state.ball.vel = IVec2::new(4, -4);

        tick(&mut state, &idle());

        assert_eq!(state.phase.phase(), GamePhase::GameOver);
        assert!(state.phase.won());
        assert!(state.events.contains(&GameEvent::RoundOver(Outcome::Won)));

        // Nothing moves after the round ended
        let ball = state.ball.clone();
        tick(&mut state, &PaddleInput { left: true, ..Default::default() });
        assert_eq!(state.ball, ball);
    }

    #[test]
    fn test_last_life_loses() {
        let mut state = playing(BreakoutConfig::classic());
        state.board.lives = Some(1);
        state.ball.rect.set_pos(IVec2::new(100, 586));
        state.ball.vel = IVec2::new(4, 4);

        tick(&mut state, &idle());

        assert_eq!(state.board.lives, Some(0));
        assert_eq!(state.phase.phase(), GamePhase::GameOver);
        assert!(!state.phase.won());
        assert_eq!(
            state.events,
            vec![GameEvent::BallLost, GameEvent::RoundOver(Outcome::Lost)]
        );
    }

    #[test]
    fn test_lost_ball_reserves_after_delay() {
        let mut state = playing(BreakoutConfig::classic());
        state.paddle.rect.x = 0;
        state.ball.rect.set_pos(IVec2::new(100, 586));
        state.ball.vel = IVec2::new(-4, 4);

        tick(&mut state, &idle());
        assert_eq!(state.board.lives, Some(2));
        assert!(state.phase.is_playing());
        assert_eq!(state.ball.rect.pos(), IVec2::new(400, 300));
        assert_eq!(state.ball.vel, IVec2::new(4, -4));
        assert_eq!(state.paddle.rect.x, 340);

        for _ in 0..state.config.serve_delay_ticks {
            tick(&mut state, &PaddleInput { left: true, ..Default::default() });
        }
        assert_eq!(state.ball.rect.pos(), IVec2::new(400, 300));
        assert_eq!(state.paddle.rect.x, 340);

        tick(&mut state, &idle());
        assert_eq!(state.ball.rect.pos(), IVec2::new(404, 296));
    }

    #[test]
    fn test_endless_never_runs_out() {
        let mut state = BreakoutState::new(BreakoutConfig::endless());
        for _ in 0..10 {
            state.ball.rect.set_pos(IVec2::new(100, 586));
            state.ball.vel = IVec2::new(4, 4);
            tick(&mut state, &idle());
            assert!(state.phase.is_playing());
        }
        assert_eq!(state.board.lives, None);
    }

    #[test]
    fn test_endless_keeps_paddle_and_heading_on_lost_ball() {
        let mut state = BreakoutState::new(BreakoutConfig::endless());
        state.paddle.rect.x = 0;
        state.ball.rect.set_pos(IVec2::new(100, 586));
        state.ball.vel = IVec2::new(-4, 4);

        tick(&mut state, &idle());

        assert_eq!(state.events, vec![GameEvent::BallLost]);
        assert_eq!(state.ball.rect.pos(), IVec2::new(400, 300));
        assert_eq!(state.ball.vel, IVec2::new(-4, -4));
        assert_eq!(state.paddle.rect.x, 0);

        // No serve delay, the ball moves on the next tick
        tick(&mut state, &idle());
        assert_eq!(state.ball.rect.pos(), IVec2::new(396, 296));
    }

    #[test]
    fn test_restart_returns_to_menu_with_fresh_round() {
        let mut state = playing(BreakoutConfig::classic());
        state.board.award(50);
        state.bricks[3].alive = false;
        state.phase.finish(Outcome::Lost);

        tick(&mut state, &idle());
        assert_eq!(state.phase.phase(), GamePhase::GameOver);

        tick(&mut state, &PaddleInput { confirm: true, ..Default::default() });
        assert_eq!(state.phase.phase(), GamePhase::Menu);
        assert_eq!(state.board.score, 0);
        assert_eq!(state.board.lives, Some(3));
        assert_eq!(state.bricks_remaining(), 40);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            PaddleInput { left: true, ..Default::default() },
            PaddleInput::default(),
            PaddleInput { right: true, ..Default::default() },
        ];
        let mut a = BreakoutState::new(BreakoutConfig::endless());
        let mut b = BreakoutState::new(BreakoutConfig::endless());
        for i in 0..2_000 {
            let input = &inputs[i % inputs.len()];
            tick(&mut a, input);
            tick(&mut b, input);
        }
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.paddle, b.paddle);
        assert_eq!(a.bricks, b.bricks);
        assert_eq!(a.board, b.board);
    }

    proptest! {
        #[test]
        fn prop_speed_and_scoring_invariants(
            classic in any::<bool>(),
            axes in prop::collection::vec(-1i32..=1, 1..1500),
        ) {
            let mut state = if classic {
                playing(BreakoutConfig::classic())
            } else {
                BreakoutState::new(BreakoutConfig::endless())
            };
            let speed = state.config.ball_speed;
            let mut broken = vec![false; state.bricks.len()];
            for axis in axes {
                let input = PaddleInput { left: axis < 0, right: axis > 0, confirm: false };
                tick(&mut state, &input);
                prop_assert_eq!(state.ball.vel.x.abs(), speed);
                prop_assert_eq!(state.ball.vel.y.abs(), speed);
                for event in &state.events {
                    if let GameEvent::BrickBroken { index } = event {
                        prop_assert!(!broken[*index], "brick {} scored twice", index);
                        broken[*index] = true;
                    }
                }
                let broken_count = broken.iter().filter(|b| **b).count() as u32;
                prop_assert_eq!(state.board.score, broken_count * state.config.points_per_brick);
                prop_assert!(state.paddle.rect.left() >= 0);
                prop_assert!(state.paddle.rect.right() <= state.config.arena_width);
                prop_assert!(state.serve_ticks <= state.config.serve_delay_ticks);
                if classic {
                    let lives = state.board.lives.unwrap_or(0);
                    prop_assert!(lives <= 3);
                    prop_assert_eq!(state.phase.is_playing(), lives > 0 && state.bricks_remaining() > 0);
                }
                if !state.phase.is_playing() {
                    break;
                }
            }
        }
    }
}
