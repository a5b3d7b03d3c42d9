//! Snake body, food and round state

use std::collections::VecDeque;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::SnakeConfig;
use crate::sim::event::GameEvent;
use crate::sim::geom::{Direction, GridSize};
use crate::sim::phase::{PhaseMachine, PhaseRules};
use crate::sim::score::ScoreBoard;

/// Ordered grid cells, tail at the front, head at the back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeBody {
    cells: VecDeque<IVec2>,
    /// Tail removals still owed to recent meals
    pub growth_pending: u32,
}

impl SnakeBody {
    /// Build from cells ordered tail first. Panics on an empty body.
    pub fn from_cells(cells: impl IntoIterator<Item = IVec2>) -> Self {
        let cells: VecDeque<IVec2> = cells.into_iter().collect();
        assert!(!cells.is_empty(), "snake body needs at least one cell");
        Self {
            cells,
            growth_pending: 0,
        }
    }

    /// Horizontal body left of the arena centre, head on the right
    pub fn starting(grid: GridSize, length: usize) -> Self {
        let head_x = grid.cols / 2 - 2;
        let y = grid.rows / 2;
        let length = length as i32;
        Self::from_cells((0..length).map(|i| IVec2::new(head_x - (length - 1) + i, y)))
    }

    pub fn head(&self) -> IVec2 {
        // Never empty: constructed non-empty and only grows before shrinking
        self.cells[self.cells.len() - 1]
    }

    pub fn tail(&self) -> IVec2 {
        self.cells[0]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        self.cells.contains(&cell)
    }

    /// Cells from tail to head
    pub fn iter(&self) -> impl Iterator<Item = &IVec2> {
        self.cells.iter()
    }

    pub fn push_head(&mut self, cell: IVec2) {
        self.cells.push_back(cell);
    }

    pub fn pop_tail(&mut self) -> Option<IVec2> {
        if self.cells.len() <= 1 {
            return None;
        }
        self.cells.pop_front()
    }

    pub fn has_duplicates(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .any(|(i, cell)| self.cells.iter().skip(i + 1).any(|other| other == cell))
    }
}

/// Complete snake state. Food placement is driven by a seeded RNG.
#[derive(Debug, Clone)]
pub struct SnakeState {
    pub config: SnakeConfig,
    pub grid: GridSize,
    pub phase: PhaseMachine,
    pub body: SnakeBody,
    /// Heading used by the last move
    pub direction: Direction,
    /// Buffered heading applied on the next tick
    pub next_direction: Direction,
    pub food: IVec2,
    pub board: ScoreBoard,
    pub seed: u64,
    pub time_ticks: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl SnakeState {
    pub fn new(config: SnakeConfig, seed: u64) -> Self {
        let grid = GridSize::new(config.cols(), config.rows());
        let mut state = Self {
            grid,
            phase: PhaseMachine::new(PhaseRules::ARCADE),
            body: SnakeBody::starting(grid, config.initial_length),
            direction: Direction::Right,
            next_direction: Direction::Right,
            food: IVec2::ZERO,
            board: ScoreBoard::new(None),
            seed,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            config,
        };
        state.place_food();
        state
    }

    /// Fresh body, score and food; the RNG keeps running
    pub fn reset_round(&mut self) {
        self.body = SnakeBody::starting(self.grid, self.config.initial_length);
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.board = ScoreBoard::new(None);
        self.time_ticks = 0;
        self.place_food();
        log::info!("Snake round reset, food at {}", self.food);
    }

    /// Buffer a heading change; an exact reversal of the current heading is dropped
    pub fn request_turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.next_direction = direction;
        true
    }

    /// Resample food uniformly until it lands off the body.
    /// Returns false when the body covers every cell.
    pub fn place_food(&mut self) -> bool {
        if self.body.len() >= self.grid.cell_count() {
            return false;
        }
        loop {
            let cell = IVec2::new(
                self.rng.random_range(0..self.grid.cols),
                self.rng.random_range(0..self.grid.rows),
            );
            if !self.body.contains(cell) {
                self.food = cell;
                log::debug!("Food placed at {}", cell);
                return true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_body() {
        let body = SnakeBody::starting(GridSize::new(40, 30), 3);
        let cells: Vec<IVec2> = body.iter().copied().collect();
        assert_eq!(
            cells,
            vec![IVec2::new(16, 15), IVec2::new(17, 15), IVec2::new(18, 15)]
        );
        assert_eq!(body.head(), IVec2::new(18, 15));
        assert_eq!(body.tail(), IVec2::new(16, 15));
    }

    #[test]
    fn test_reversal_rejected() {
        let mut state = SnakeState::new(SnakeConfig::default(), 1);
        assert!(!state.request_turn(Direction::Left));
        assert_eq!(state.next_direction, Direction::Right);
        assert!(state.request_turn(Direction::Up));
        // Still checked against the committed heading, not the buffered one
        assert!(state.request_turn(Direction::Down));
        assert_eq!(state.next_direction, Direction::Down);
    }

    #[test]
    fn test_food_off_body() {
        for seed in 0..50 {
            let state = SnakeState::new(SnakeConfig::default(), seed);
            assert!(!state.body.contains(state.food));
            assert!(state.grid.contains(state.food));
        }
    }

    #[test]
    fn test_food_finds_last_free_cell() {
        let config = SnakeConfig {
            arena_width: 200,
            arena_height: 200,
            ..SnakeConfig::default()
        };
        let mut state = SnakeState::new(config, 3);
        let free = IVec2::new(7, 4);
        let cells: Vec<IVec2> = (0..10)
            .flat_map(|y| (0..10).map(move |x| IVec2::new(x, y)))
            .filter(|c| *c != free)
            .collect();
        state.body = SnakeBody::from_cells(cells);
        assert!(state.place_food());
        assert_eq!(state.food, free);

        state.body.push_head(free);
        assert!(!state.place_food());
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = SnakeState::new(SnakeConfig::default(), 42);
        let b = SnakeState::new(SnakeConfig::default(), 42);
        assert_eq!(a.food, b.food);
    }

    #[test]
    fn test_duplicate_detection() {
        let body = SnakeBody::from_cells([IVec2::new(0, 0), IVec2::new(1, 0), IVec2::new(0, 0)]);
        assert!(body.has_duplicates());
        let body = SnakeBody::starting(GridSize::new(40, 30), 5);
        assert!(!body.has_duplicates());
    }
}
