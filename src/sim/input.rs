//! Raw key state and the per-game intents derived from it

use bitflags::bitflags;

use super::geom::Direction;

bitflags! {
    /// Set of keys the games care about
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Keys: u16 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const A = 1 << 4;
        const D = 1 << 5;
        const W = 1 << 6;
        const S = 1 << 7;
        const SPACE = 1 << 8;
    }
}

/// Input sampled once per tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Keys currently held down
    pub held: Keys,
    /// Keys that went down since the previous poll
    pub pressed: Keys,
    /// The same presses, one key each, in arrival order
    pub presses: Vec<Keys>,
    /// Window close / quit key
    pub quit: bool,
}

impl InputFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Frame with `keys` newly pressed (and therefore held)
    pub fn press(keys: Keys) -> Self {
        Self::press_in_order(keys.iter())
    }

    /// Frame with each key pressed after the previous one
    pub fn press_in_order(keys: impl IntoIterator<Item = Keys>) -> Self {
        let presses: Vec<Keys> = keys.into_iter().collect();
        let pressed = presses.iter().fold(Keys::empty(), |acc, k| acc | *k);
        Self {
            held: pressed,
            pressed,
            presses,
            quit: false,
        }
    }

    pub fn hold(keys: Keys) -> Self {
        Self {
            held: keys,
            ..Self::default()
        }
    }

    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }
}

/// Breakout intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub left: bool,
    pub right: bool,
    /// Start from the menu / acknowledge game over
    pub confirm: bool,
}

impl PaddleInput {
    pub fn from_frame(frame: &InputFrame) -> Self {
        Self {
            left: frame.held.intersects(Keys::LEFT | Keys::A),
            right: frame.held.intersects(Keys::RIGHT | Keys::D),
            confirm: frame.pressed.contains(Keys::SPACE),
        }
    }

    /// Net horizontal direction, -1, 0 or 1
    pub fn axis(&self) -> i32 {
        self.right as i32 - self.left as i32
    }
}

fn steer_key(key: Keys) -> Option<Direction> {
    if key.intersects(Keys::UP | Keys::W) {
        Some(Direction::Up)
    } else if key.intersects(Keys::DOWN | Keys::S) {
        Some(Direction::Down)
    } else if key.intersects(Keys::LEFT | Keys::A) {
        Some(Direction::Left)
    } else if key.intersects(Keys::RIGHT | Keys::D) {
        Some(Direction::Right)
    } else {
        None
    }
}

/// Snake intents for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SteerInput {
    /// Requested headings in the order they are fed to the turn buffer
    pub turns: Vec<Direction>,
    pub confirm: bool,
}

impl SteerInput {
    /// Turns follow the order the keys were pressed in
    pub fn from_frame(frame: &InputFrame) -> Self {
        let turns = frame.presses.iter().filter_map(|&key| steer_key(key)).collect();
        Self {
            turns,
            confirm: frame.pressed.contains(Keys::SPACE),
        }
    }

    pub fn turn(direction: Direction) -> Self {
        Self {
            turns: vec![direction],
            confirm: false,
        }
    }
}
