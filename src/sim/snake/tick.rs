//! Fixed-step snake tick

use super::collision::{Step, advance_body};
use super::state::SnakeState;
use crate::sim::event::GameEvent;
use crate::sim::input::SteerInput;
use crate::sim::phase::{GamePhase, Outcome};

/// Advance the snake state by one tick
pub fn tick(state: &mut SnakeState, input: &SteerInput) {
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

    for &turn in &input.turns {
        state.request_turn(turn);
    }

    state.time_ticks += 1;
    state.direction = state.next_direction;

    let step = advance_body(&mut state.body, state.direction, state.grid, state.food);
    match step {
        Step::OutOfBounds | Step::SelfHit => {
            log::debug!("Snake crashed: {:?} at tick {}", step, state.time_ticks);
            state.board.record_crash();
            state.events.push(GameEvent::Crashed);
            finish(state, Outcome::Lost);
        }
        Step::Ate => {
            state.board.award(state.config.points_per_food);
            state.events.push(GameEvent::FoodEaten);
            if !state.place_food() {
                finish(state, Outcome::Won);
            }
        }
        Step::Moved => {}
    }
}

fn finish(state: &mut SnakeState, outcome: Outcome) {
    if state.phase.finish(outcome) {
        state.events.push(GameEvent::RoundOver(outcome));
    }
}
