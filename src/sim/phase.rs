//! Menu / Playing / GameOver state machine
//!
//! Only `Playing` lets a tick touch entities. Quit is not a phase: the run
//! loop checks it before every tick and leaves.

/// Current phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for a start intent
    Menu,
    /// Active gameplay
    Playing,
    /// Round ended, waiting for a restart intent
    GameOver,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Per-game wiring of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseRules {
    /// Phase a fresh game opens in
    pub initial: GamePhase,
    /// Phase a restart from GameOver leads to
    pub restart_to: GamePhase,
}

impl PhaseRules {
    /// Title screen first, back to the title after a round
    pub const WITH_MENU: PhaseRules = PhaseRules {
        initial: GamePhase::Menu,
        restart_to: GamePhase::Menu,
    };

    /// Straight into play, restart replays immediately
    pub const ARCADE: PhaseRules = PhaseRules {
        initial: GamePhase::Playing,
        restart_to: GamePhase::Playing,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseMachine {
    phase: GamePhase,
    outcome: Option<Outcome>,
    rules: PhaseRules,
}

impl PhaseMachine {
    pub fn new(rules: PhaseRules) -> Self {
        Self {
            phase: rules.initial,
            outcome: None,
            rules,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn rules(&self) -> PhaseRules {
        self.rules
    }

    /// Outcome of the finished round (only set in GameOver)
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Win flag shown on the game over screen
    pub fn won(&self) -> bool {
        self.outcome == Some(Outcome::Won)
    }

    /// Menu -> Playing
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }
        self.phase = GamePhase::Playing;
        log::info!("Round started");
        true
    }

    /// Playing -> GameOver
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.outcome = Some(outcome);
        log::info!("Round over: {:?}", outcome);
        true
    }

    /// GameOver -> Menu or Playing, per rules. The caller resets the round.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.phase = self.rules.restart_to;
        self.outcome = None;
        log::info!("Restart -> {:?}", self.phase);
        true
    }
}
