//! Audio feedback
//!
//! Simulation events map to short synthesized tones. Playback is fire and
//! forget: a sink accepts the request and returns immediately, nothing waits
//! for a tone to finish.

use crate::sim::GameEvent;

/// A single tone request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_secs: f32,
    /// Amplitude (0.0 - 1.0) before master volume
    pub volume: f32,
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a wall or the paddle
    Bounce,
    /// Brick removed
    Break,
    /// Snake eats
    Eat,
    /// Snake crashes
    Death,
}

impl SoundEffect {
    /// Effect for an event, if it makes a sound at all
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::WallBounce | GameEvent::PaddleBounce => Some(SoundEffect::Bounce),
            GameEvent::BrickBroken { .. } => Some(SoundEffect::Break),
            GameEvent::FoodEaten => Some(SoundEffect::Eat),
            GameEvent::Crashed => Some(SoundEffect::Death),
            GameEvent::BallLost | GameEvent::RoundOver(_) => None,
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            SoundEffect::Bounce => Tone {
                frequency_hz: 440.0,
                duration_secs: 0.05,
                volume: 1.0,
            },
            SoundEffect::Break => Tone {
                frequency_hz: 220.0,
                duration_secs: 0.05,
                volume: 1.0,
            },
            // High pitch for food
            SoundEffect::Eat => Tone {
                frequency_hz: 660.0,
                duration_secs: 0.1,
                volume: 0.5,
            },
            // Low pitch for game over
            SoundEffect::Death => Tone {
                frequency_hz: 220.0,
                duration_secs: 0.5,
                volume: 0.8,
            },
        }
    }
}

/// Tone output backend
pub trait ToneSink {
    /// Start playing and return without waiting
    fn play_tone(&self, tone: Tone);
}

/// Sink that only logs; used when no audio device is available
#[derive(Debug, Default)]
pub struct SilentSink;

impl ToneSink for SilentSink {
    fn play_tone(&self, tone: Tone) {
        log::trace!(
            "tone {} Hz for {} s (silent)",
            tone.frequency_hz,
            tone.duration_secs
        );
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn ToneSink>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(SilentSink))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn ToneSink>) -> Self {
        Self {
            sink,
            master_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let mut tone = effect.tone();
        tone.volume *= vol;
        log::debug!("{:?}: {} Hz", effect, tone.frequency_hz);
        self.sink.play_tone(tone);
    }

    /// Play whatever the events of one tick call for
    pub fn play_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

#[cfg(feature = "sound")]
pub use device::DeviceSink;

#[cfg(feature = "sound")]
mod device {
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::{Tone, ToneSink};

    const SAMPLE_RATE: u32 = 44_100;

    /// Plays tones on the default output device
    pub struct DeviceSink {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl DeviceSink {
        pub fn new() -> Result<Self, rodio::StreamError> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }
    }

    /// Mono sine wave
    pub(super) fn sine_samples(tone: Tone, sample_rate: u32) -> Vec<f32> {
        let count = (sample_rate as f32 * tone.duration_secs) as usize;
        (0..count)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                (std::f32::consts::TAU * tone.frequency_hz * t).sin() * tone.volume
            })
            .collect()
    }

    impl ToneSink for DeviceSink {
        fn play_tone(&self, tone: Tone) {
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    sink.append(SamplesBuffer::new(1, SAMPLE_RATE, sine_samples(tone, SAMPLE_RATE)));
                    sink.detach();
                }
                Err(err) => log::warn!("Cannot play tone: {err}"),
            }
        }
    }
}
