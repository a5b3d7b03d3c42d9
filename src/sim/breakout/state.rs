//! Breakout entities and round state

use glam::IVec2;

use crate::settings::BreakoutConfig;
use crate::sim::event::GameEvent;
use crate::sim::geom::Rect;
use crate::sim::phase::PhaseMachine;
use crate::sim::score::ScoreBoard;

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paddle {
    pub rect: Rect,
}

impl Paddle {
    pub fn centered(config: &BreakoutConfig) -> Self {
        let mut rect = Rect::new(
            0,
            config.arena_height - config.paddle_margin,
            config.paddle_width,
            config.paddle_height,
        );
        rect.set_center_x(config.arena_width / 2);
        Self { rect }
    }

    /// Move by `dx` pixels, clamped to the arena width
    pub fn slide(&mut self, dx: i32, arena_width: i32) {
        let max_x = (arena_width - self.rect.w).max(0);
        self.rect.x = (self.rect.x + dx).clamp(0, max_x);
    }
}

/// A ball entity. Speed is in pixels per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ball {
    pub rect: Rect,
    pub vel: IVec2,
}

impl Ball {
    /// Ball at the arena centre, heading up and to the right
    pub fn served(config: &BreakoutConfig) -> Self {
        Self {
            rect: Rect::new(
                config.arena_width / 2,
                config.arena_height / 2,
                config.ball_size,
                config.ball_size,
            ),
            vel: IVec2::new(config.ball_speed, -config.ball_speed),
        }
    }

    pub fn advance(&mut self) {
        self.rect.translate(self.vel);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brick {
    pub rect: Rect,
    pub alive: bool,
}

/// Row-major brick grid. Scan order is part of the collision rules.
pub fn layout_bricks(config: &BreakoutConfig) -> Vec<Brick> {
    let cell_w = config.arena_width / config.brick_cols;
    let cell_h = config.brick_height;
    let mut bricks = Vec::with_capacity((config.brick_rows * config.brick_cols) as usize);
    for row in 0..config.brick_rows {
        for col in 0..config.brick_cols {
            bricks.push(Brick {
                rect: Rect::new(
                    col * cell_w,
                    row * cell_h,
                    cell_w - config.brick_gap,
                    cell_h - config.brick_gap,
                ),
                alive: true,
            });
        }
    }
    bricks
}

/// Complete breakout state (deterministic, no randomness involved)
#[derive(Debug, Clone)]
pub struct BreakoutState {
    pub config: BreakoutConfig,
    pub phase: PhaseMachine,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
    pub board: ScoreBoard,
    /// Ticks left before the ball moves again after a lost life
    pub serve_ticks: u32,
    /// Simulated (Playing) tick counter
    pub time_ticks: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
}

impl BreakoutState {
    pub fn new(config: BreakoutConfig) -> Self {
        let phase = PhaseMachine::new(config.phase_rules());
        Self {
            paddle: Paddle::centered(&config),
            ball: Ball::served(&config),
            bricks: layout_bricks(&config),
            board: ScoreBoard::new(config.lives),
            serve_ticks: 0,
            time_ticks: 0,
            events: Vec::new(),
            phase,
            config,
        }
    }

    /// Fresh bricks, score and lives; the phase is left alone
    pub fn reset_round(&mut self) {
        self.paddle = Paddle::centered(&self.config);
        self.ball = Ball::served(&self.config);
        self.bricks = layout_bricks(&self.config);
        self.board = ScoreBoard::new(self.config.lives);
        self.serve_ticks = 0;
        self.time_ticks = 0;
        log::info!("Breakout round reset ({} bricks)", self.bricks.len());
    }

    /// Put the ball back in the centre after a lost ball. Paddle and
    /// horizontal direction are reset only when the config asks for it.
    pub fn reserve(&mut self) {
        let served = Ball::served(&self.config);
        if self.config.recenter_on_loss {
            self.paddle = Paddle::centered(&self.config);
            self.ball = served;
        } else {
            self.ball.rect = served.rect;
            self.ball.vel.y = served.vel.y;
        }
        self.serve_ticks = self.config.serve_delay_ticks;
    }

    pub fn bricks_remaining(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }
}
