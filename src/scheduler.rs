//! Fixed-rate frame pacing and the run loop

use std::thread;
use std::time::{Duration, Instant};

use crate::app::Game;
use crate::audio::AudioManager;
use crate::render::Renderer;
use crate::sim::InputFrame;

/// Frames we may fall behind before the schedule is reset instead of
/// replayed back to back
const MAX_LAG_FRAMES: u32 = 4;

/// Deadline-based pacing at a fixed rate
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    period: Duration,
    next_deadline: Option<Instant>,
}

impl FrameScheduler {
    pub fn new(hz: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / hz.max(1),
            next_deadline: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time to wait after the frame that ended at `now`
    pub fn pace(&mut self, now: Instant) -> Duration {
        let deadline = self.next_deadline.unwrap_or(now) + self.period;
        if now > deadline + self.period * MAX_LAG_FRAMES {
            log::debug!("Frame schedule behind by {:?}, resyncing", now - deadline);
            self.next_deadline = Some(now);
            return Duration::ZERO;
        }
        self.next_deadline = Some(deadline);
        deadline.saturating_duration_since(now)
    }
}

/// Keyboard state provider
pub trait InputSource {
    fn poll(&mut self) -> anyhow::Result<InputFrame>;
}

/// Drive `game` until the input source asks to quit.
///
/// One simulation step per frame: poll input, step, play the step's events,
/// draw, present, then sleep out the rest of the period.
pub fn run<G, B>(game: &mut G, backend: &mut B, audio: &AudioManager) -> anyhow::Result<()>
where
    G: Game + ?Sized,
    B: InputSource + Renderer,
{
    let mut scheduler = FrameScheduler::new(game.tick_hz());
    log::info!("{} running at {} Hz", game.title(), game.tick_hz());

    let mut frames: u64 = 0;
    loop {
        let input = backend.poll()?;
        if input.quit {
            break;
        }

        let before = game.phase();
        game.step(&input);
        if game.phase() != before {
            log::debug!("{:?} -> {:?}", before, game.phase());
        }
        audio.play_events(game.events());

        game.draw(backend);
        backend.present()?;
        frames += 1;

        let wait = scheduler.pace(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }

    log::info!("{} stopped after {} frames", game.title(), frames);
    Ok(())
}
