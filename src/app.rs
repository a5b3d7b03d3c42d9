//! Games as seen by the run loop

use crate::render::{self, Renderer};
use crate::sim::breakout::{self, BreakoutState};
use crate::sim::snake::{self, SnakeState};
use crate::sim::{GameEvent, GamePhase, InputFrame, PaddleInput, SteerInput};

pub trait Game {
    fn title(&self) -> &'static str;
    /// Simulation steps per second
    fn tick_hz(&self) -> u32;
    fn phase(&self) -> GamePhase;
    /// Map raw input to intents and run one tick
    fn step(&mut self, input: &InputFrame);
    /// Events produced by the last step
    fn events(&self) -> &[GameEvent];
    fn draw(&self, renderer: &mut dyn Renderer);
}

impl Game for BreakoutState {
    fn title(&self) -> &'static str {
        if self.config.show_menu {
            "Breakout"
        } else {
            "Breakout (endless)"
        }
    }

    fn tick_hz(&self) -> u32 {
        self.config.tick_hz
    }

    fn phase(&self) -> GamePhase {
        self.phase.phase()
    }

    fn step(&mut self, input: &InputFrame) {
        breakout::tick(self, &PaddleInput::from_frame(input));
    }

    fn events(&self) -> &[GameEvent] {
        &self.events
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        render::draw_breakout(self, renderer);
    }
}

impl Game for SnakeState {
    fn title(&self) -> &'static str {
        "Snake"
    }

    fn tick_hz(&self) -> u32 {
        self.config.tick_hz
    }

    fn phase(&self) -> GamePhase {
        self.phase.phase()
    }

    fn step(&mut self, input: &InputFrame) {
        snake::tick(self, &SteerInput::from_frame(input));
    }

    fn events(&self) -> &[GameEvent] {
        &self.events
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        render::draw_snake(self, renderer);
    }
}
