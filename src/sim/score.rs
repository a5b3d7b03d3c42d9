//! Score and lives bookkeeping

/// Result of losing a life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLoss {
    /// Lives remain (or the mode has unlimited lives), keep playing
    Continue,
    /// Last life gone
    Exhausted,
}

/// Per-round score, lives and crash flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    pub score: u32,
    /// Remaining lives, `None` for modes without a life count
    pub lives: Option<u8>,
    /// Set by a fatal collision (snake)
    pub crashed: bool,
}

impl ScoreBoard {
    pub fn new(lives: Option<u8>) -> Self {
        Self {
            score: 0,
            lives,
            crashed: false,
        }
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn lose_life(&mut self) -> LifeLoss {
        match self.lives.as_mut() {
            None => LifeLoss::Continue,
            Some(lives) => {
                *lives = lives.saturating_sub(1);
                if *lives == 0 {
                    LifeLoss::Exhausted
                } else {
                    LifeLoss::Continue
                }
            }
        }
    }

    pub fn record_crash(&mut self) {
        self.crashed = true;
    }

    /// Win predicate: nothing left to clear
    pub fn is_cleared(remaining: usize) -> bool {
        remaining == 0
    }

    /// Loss predicate
    pub fn is_lost(&self) -> bool {
        self.crashed || self.lives == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lives_run_out() {
        let mut board = ScoreBoard::new(Some(2));
        assert_eq!(board.lose_life(), LifeLoss::Continue);
        assert!(!board.is_lost());
        assert_eq!(board.lose_life(), LifeLoss::Exhausted);
        assert!(board.is_lost());
        // Further losses stay at zero
        assert_eq!(board.lose_life(), LifeLoss::Exhausted);
        assert_eq!(board.lives, Some(0));
    }

    #[test]
    fn test_unlimited_lives() {
        let mut board = ScoreBoard::new(None);
        for _ in 0..100 {
            assert_eq!(board.lose_life(), LifeLoss::Continue);
        }
        assert!(!board.is_lost());
    }

    #[test]
    fn test_crash_is_a_loss() {
        let mut board = ScoreBoard::new(None);
        board.award(10);
        board.record_crash();
        assert!(board.is_lost());
        assert_eq!(board.score, 10);
    }

    #[test]
    fn test_score_saturates() {
        let mut board = ScoreBoard::new(None);
        board.score = u32::MAX - 5;
        board.award(10);
        assert_eq!(board.score, u32::MAX);
        assert!(ScoreBoard::is_cleared(0));
        assert!(!ScoreBoard::is_cleared(1));
    }
}
