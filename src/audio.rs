//! Procedurally generated sound effects
//!
//! No external files: each cue is a short decaying sine tone rendered to
//! 16-bit mono PCM. Playback goes through an optional output device; when no
//! device could be opened the manager stays silent and the game runs on.

use std::collections::HashMap;

use thiserror::Error;

use crate::sim::GameEvent;

/// Sample rate for synthesized cues
pub const SAMPLE_RATE: u32 = 44_100;

/// Peak amplitude before volume scaling
const PEAK_AMPLITUDE: f32 = 32_000.0;

/// Sound cues the engine can signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball bounced off the paddle
    PaddleHit,
    /// Ball destroyed a brick
    BrickHit,
    /// Ball fell out of the field
    LifeLost,
    /// Level cleared
    LevelWon,
}

impl SoundEffect {
    /// Cue name shared with render/audio hosts
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::PaddleHit => "paddleHit",
            SoundEffect::BrickHit => "brickHit",
            SoundEffect::LifeLost => "lifeLost",
            SoundEffect::LevelWon => "levelWon",
        }
    }

    /// Tone frequency (Hz) and duration (seconds)
    pub fn tone(&self) -> (f32, f32) {
        match self {
            SoundEffect::PaddleHit => (740.0, 0.04),
            SoundEffect::BrickHit => (1240.0, 0.05),
            SoundEffect::LifeLost => (140.0, 0.2),
            SoundEffect::LevelWon => (520.0, 0.25),
        }
    }

    /// Cue for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleHit => Some(SoundEffect::PaddleHit),
            GameEvent::BricksDestroyed { .. } => Some(SoundEffect::BrickHit),
            GameEvent::LifeLost { .. } => Some(SoundEffect::LifeLost),
            GameEvent::LevelWon { .. } => Some(SoundEffect::LevelWon),
            _ => None,
        }
    }
}

/// Render a linearly decaying sine tone
pub fn synth_tone(freq: f32, duration: f32, sample_rate: u32) -> Vec<i16> {
    let n = (sample_rate as f32 * duration).round() as usize;
    (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let envelope = 1.0 - i as f32 / n as f32;
            let sample = PEAK_AMPLITUDE * envelope * (std::f32::consts::TAU * freq * t).sin();
            sample as i16
        })
        .collect()
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device available")]
    NoDevice,
    #[error("audio device error: {0}")]
    Device(String),
}

/// A PCM sink supplied by the host
pub trait AudioOutput {
    fn play(&mut self, samples: &[i16], sample_rate: u32) -> Result<(), AudioError>;
}

/// Audio manager for the game
pub struct AudioManager {
    device: Option<Box<dyn AudioOutput>>,
    buffers: HashMap<SoundEffect, Vec<i16>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::disabled()
    }
}

impl AudioManager {
    /// Manager with no device; every `play` is a no-op
    pub fn disabled() -> Self {
        Self {
            device: None,
            buffers: HashMap::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Try to open a device; on failure audio is disabled, not fatal
    pub fn open<F>(open_device: F) -> Self
    where
        F: FnOnce() -> Result<Box<dyn AudioOutput>, AudioError>,
    {
        let mut manager = Self::disabled();
        match open_device() {
            Ok(device) => manager.device = Some(device),
            Err(e) => log::warn!("Audio disabled: {}", e),
        }
        manager
    }

    pub fn is_available(&self) -> bool {
        self.device.is_some()
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(device) = self.device.as_mut() else {
            return;
        };

        let buffer = self.buffers.entry(effect).or_insert_with(|| {
            let (freq, duration) = effect.tone();
            synth_tone(freq, duration, SAMPLE_RATE)
        });
        let scaled: Vec<i16> = buffer.iter().map(|&s| (s as f32 * vol) as i16).collect();

        if let Err(e) = device.play(&scaled, SAMPLE_RATE) {
            log::warn!("Failed to play {}: {}", effect.name(), e);
        }
    }

    /// Play the cues for a tick's events
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<usize>>>);

    impl AudioOutput for Recorder {
        fn play(&mut self, samples: &[i16], _sample_rate: u32) -> Result<(), AudioError> {
            self.0.borrow_mut().push(samples.len());
            Ok(())
        }
    }

    #[test]
    fn test_tone_length_and_decay() {
        let pcm = synth_tone(740.0, 0.04, SAMPLE_RATE);
        assert_eq!(pcm.len(), 1764);
        assert_eq!(pcm[0], 0);
        let head = pcm[..100].iter().map(|s| s.unsigned_abs()).max().unwrap();
        let tail = pcm[pcm.len() - 100..].iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert!(head > tail);
    }

    #[test]
    fn test_missing_device_is_silent() {
        let mut audio = AudioManager::open(|| Err(AudioError::NoDevice));
        assert!(!audio.is_available());
        audio.play(SoundEffect::BrickHit);
    }

    #[test]
    fn test_events_map_to_cues() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let sink = Recorder(played.clone());
        let mut audio = AudioManager::open(move || Ok(Box::new(sink) as Box<dyn AudioOutput>));
        assert!(audio.is_available());

        audio.play_events(&[
            GameEvent::PaddleHit,
            GameEvent::BricksDestroyed { count: 2 },
            GameEvent::GameOver,
        ]);
        assert_eq!(played.borrow().len(), 2);

        audio.set_muted(true);
        audio.play(SoundEffect::LevelWon);
        assert_eq!(played.borrow().len(), 2);
    }

    #[test]
    fn test_cue_names() {
        assert_eq!(SoundEffect::PaddleHit.name(), "paddleHit");
        assert_eq!(SoundEffect::LevelWon.name(), "levelWon");
        assert_eq!(
            SoundEffect::for_event(&GameEvent::LifeLost { lives_left: 1 }),
            Some(SoundEffect::LifeLost)
        );
    }
}
