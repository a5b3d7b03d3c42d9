//! Drawing surface abstraction and scene drawing
//!
//! Scenes are drawn in arena pixels through [`Renderer`]; backends scale to
//! whatever they actually display.

use glam::IVec2;

use crate::sim::breakout::BreakoutState;
use crate::sim::snake::SnakeState;
use crate::sim::{GamePhase, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BRICK_RED: Color = Color::rgb(200, 50, 50);
    pub const WIN_GREEN: Color = Color::rgb(50, 200, 50);
    pub const SNAKE_GREEN: Color = Color::rgb(0, 255, 0);
    pub const FOOD_RED: Color = Color::rgb(255, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Normal,
    Large,
}

/// Drawing backend
pub trait Renderer {
    fn clear(&mut self, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_ellipse(&mut self, rect: Rect, color: Color);
    /// Text centred on `center`
    fn draw_text(&mut self, text: &str, center: IVec2, color: Color, size: TextSize);
    /// Show the finished frame
    fn present(&mut self) -> anyhow::Result<()>;
}

pub fn draw_breakout(state: &BreakoutState, r: &mut dyn Renderer) {
    let config = &state.config;
    let center = IVec2::new(config.arena_width / 2, config.arena_height / 2);
    r.clear(palette::BLACK);

    match state.phase.phase() {
        GamePhase::Menu => {
            r.draw_text(
                "Breakout - Synthwave Atari Style",
                center - IVec2::new(0, 50),
                palette::WHITE,
                TextSize::Large,
            );
            r.draw_text(
                "Press SPACE to start",
                center + IVec2::new(0, 20),
                palette::WHITE,
                TextSize::Normal,
            );
        }
        GamePhase::Playing => {
            r.draw_rect(state.paddle.rect, palette::WHITE);
            r.draw_ellipse(state.ball.rect, palette::WHITE);
            for brick in state.bricks.iter().filter(|b| b.alive) {
                r.draw_rect(brick.rect, palette::BRICK_RED);
            }
            let hud_y = config.arena_height - 20;
            r.draw_text(
                &format!("Score: {}", state.board.score),
                IVec2::new(60, hud_y),
                palette::WHITE,
                TextSize::Normal,
            );
            if let Some(lives) = state.board.lives {
                r.draw_text(
                    &format!("Lives: {lives}"),
                    IVec2::new(config.arena_width - 60, hud_y),
                    palette::WHITE,
                    TextSize::Normal,
                );
            }
        }
        GamePhase::GameOver => {
            let (title, color) = if state.phase.won() {
                ("YOU WIN!", palette::WIN_GREEN)
            } else {
                ("GAME OVER", palette::BRICK_RED)
            };
            r.draw_text(title, center - IVec2::new(0, 50), color, TextSize::Large);
            r.draw_text(
                &format!("Score: {}", state.board.score),
                center,
                palette::WHITE,
                TextSize::Normal,
            );
            let hint = if state.phase.rules().restart_to == GamePhase::Menu {
                "Press SPACE to return to main menu"
            } else {
                "Press SPACE to restart"
            };
            r.draw_text(hint, center + IVec2::new(0, 50), palette::WHITE, TextSize::Normal);
        }
    }
}

pub fn draw_snake(state: &SnakeState, r: &mut dyn Renderer) {
    let cell = state.config.cell_size;
    let to_rect = |c: IVec2| Rect::new(c.x * cell, c.y * cell, cell, cell);
    let center = IVec2::new(state.config.arena_width / 2, state.config.arena_height / 2);
    r.clear(palette::BLACK);

    match state.phase.phase() {
        GamePhase::GameOver => {
            let title = if state.phase.won() { "YOU WIN!" } else { "GAME OVER" };
            r.draw_text(title, center - IVec2::new(0, 50), palette::FOOD_RED, TextSize::Large);
            r.draw_text(
                &format!("Final Score: {}", state.board.score),
                center + IVec2::new(0, 20),
                palette::WHITE,
                TextSize::Normal,
            );
            r.draw_text(
                "Press SPACE to restart",
                center + IVec2::new(0, 80),
                palette::YELLOW,
                TextSize::Normal,
            );
        }
        GamePhase::Menu => {
            r.draw_text("Snake", center - IVec2::new(0, 50), palette::SNAKE_GREEN, TextSize::Large);
            r.draw_text(
                "Press SPACE to start",
                center + IVec2::new(0, 20),
                palette::WHITE,
                TextSize::Normal,
            );
        }
        GamePhase::Playing => {
            r.draw_rect(to_rect(state.food), palette::FOOD_RED);
            for &c in state.body.iter() {
                r.draw_rect(to_rect(c), palette::SNAKE_GREEN);
            }
            r.draw_text(
                &format!("Score: {}", state.board.score),
                IVec2::new(60, 20),
                palette::WHITE,
                TextSize::Normal,
            );
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::settings::{BreakoutConfig, SnakeConfig};
    use crate::sim::Outcome;

    /// Renderer that records draw calls
    #[derive(Debug, Default)]
    pub(crate) struct RecordingRenderer {
        pub rects: Vec<(Rect, Color)>,
        pub ellipses: Vec<Rect>,
        pub texts: Vec<String>,
        pub frames: usize,
    }

    impl Renderer for RecordingRenderer {
        fn clear(&mut self, _color: Color) {
            self.rects.clear();
            self.ellipses.clear();
            self.texts.clear();
        }

        fn draw_rect(&mut self, rect: Rect, color: Color) {
            self.rects.push((rect, color));
        }

        fn draw_ellipse(&mut self, rect: Rect, _color: Color) {
            self.ellipses.push(rect);
        }

        fn draw_text(&mut self, text: &str, _center: IVec2, _color: Color, _size: TextSize) {
            self.texts.push(text.to_string());
        }

        fn present(&mut self) -> anyhow::Result<()> {
            self.frames += 1;
            Ok(())
        }
    }

    #[test]
    fn test_breakout_screens() {
        let mut state = BreakoutState::new(BreakoutConfig::classic());
        let mut r = RecordingRenderer::default();

        draw_breakout(&state, &mut r);
        assert!(r.texts.iter().any(|t| t == "Press SPACE to start"));
        assert!(r.rects.is_empty());

        state.phase.start();
        draw_breakout(&state, &mut r);
        // paddle + 40 bricks
        assert_eq!(r.rects.len(), 41);
        assert_eq!(r.ellipses, vec![state.ball.rect]);
        assert!(r.texts.contains(&"Lives: 3".to_string()));

        state.phase.finish(Outcome::Won);
        draw_breakout(&state, &mut r);
        assert_eq!(r.texts[0], "YOU WIN!");
        assert!(r.texts.iter().any(|t| t.contains("main menu")));
    }

    #[test]
    fn test_snake_cells_scaled() {
        let state = SnakeState::new(SnakeConfig::default(), 4);
        let mut r = RecordingRenderer::default();
        draw_snake(&state, &mut r);
        assert_eq!(r.rects.len(), 4);
        let food = state.food * 20;
        assert_eq!(r.rects[0].0, Rect::new(food.x, food.y, 20, 20));
        assert!(r.rects.contains(&(Rect::new(360, 300, 20, 20), palette::SNAKE_GREEN)));
    }
}
