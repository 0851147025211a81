//! Audio events
//!
//! The simulation fires named [`SoundEffect`]s into an [`AudioSink`] and
//! never waits on them. [`AudioManager`] is the production sink: it applies
//! volume/mute and forwards procedural voice descriptions to whatever
//! synthesis backend the host provides. Without a backend it is silent.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Player touched down after being airborne
    Land,
    /// Footstep while running
    Step,
    /// Block placed
    Build,
    /// Block removed (by the player or crushed by a platform)
    Deconstruct,
    /// Player died
    Die,
    /// Falling spike armed
    TrapTrigger,
    /// Phase dash
    Dash,
    /// Laser fired
    Laser,
    /// Checkpoint reached or revealed
    Ding,
    /// Loadout dice rolled
    DiceRoll,
}

/// Oscillator shape for a synthesized voice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Sawtooth,
    /// Filtered white noise
    Noise,
}

/// One procedural voice: a pitch sweep under a decaying envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Peak gain before master volume
    pub gain: f32,
    pub duration_ms: u32,
}

impl Voice {
    const fn new(waveform: Waveform, start_hz: f32, end_hz: f32, gain: f32, duration_ms: u32) -> Self {
        Self {
            waveform,
            start_hz,
            end_hz,
            gain,
            duration_ms,
        }
    }
}

impl SoundEffect {
    /// Voice recipe for this effect
    pub fn voice(&self) -> Voice {
        use Waveform::*;
        match self {
            SoundEffect::Jump => Voice::new(Sine, 300.0, 500.0, 0.3, 150),
            SoundEffect::Land => Voice::new(Triangle, 100.0, 50.0, 0.5, 100),
            // Noise voices use the frequencies as a lowpass sweep
            SoundEffect::Step => Voice::new(Noise, 400.0, 400.0, 0.2, 50),
            SoundEffect::Build => Voice::new(Sine, 800.0, 1200.0, 0.3, 100),
            SoundEffect::Deconstruct => Voice::new(Triangle, 1200.0, 400.0, 0.3, 100),
            SoundEffect::Die => Voice::new(Triangle, 800.0, 200.0, 0.4, 600),
            SoundEffect::TrapTrigger => Voice::new(Square, 220.0, 440.0, 0.25, 120),
            SoundEffect::Dash => Voice::new(Noise, 200.0, 3000.0, 0.4, 300),
            SoundEffect::Laser => Voice::new(Sawtooth, 880.0, 110.0, 0.2, 200),
            SoundEffect::Ding => Voice::new(Sine, 1200.0, 1200.0, 0.3, 500),
            SoundEffect::DiceRoll => Voice::new(Triangle, 600.0, 100.0, 0.3, 400),
        }
    }
}

/// Anything the simulation can fire sounds into
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Start/stop the intro's rolling-dice loop
    fn set_rolling(&mut self, _playing: bool) {}

    /// Start/stop background music
    fn set_music(&mut self, _playing: bool) {}
}

/// Discards every sound
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Records sounds in order (used by tests and replays)
impl AudioSink for Vec<SoundEffect> {
    fn play(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

/// Host synthesis backend
pub trait AudioBackend {
    fn play_voice(&mut self, voice: Voice, volume: f32);
    /// Start or stop the background music loop
    fn set_music(&mut self, playing: bool, volume: f32);
    /// Start or stop the intro's rolling-dice noise loop
    fn set_rolling(&mut self, playing: bool, volume: f32);
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    muted: bool,
    music_playing: bool,
    rolling: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("has_backend", &self.backend.is_some())
            .field("master_volume", &self.master_volume)
            .field("muted", &self.muted)
            .field("music_playing", &self.music_playing)
            .field("rolling", &self.rolling)
            .finish()
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend: Some(backend),
            ..Self::silent()
        }
    }

    /// Manager with no backend; every call is a no-op
    pub fn silent() -> Self {
        Self {
            backend: None,
            master_volume: 0.5,
            muted: false,
            music_playing: false,
            rolling: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.refresh_loops();
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.refresh_loops();
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn is_rolling(&self) -> bool {
        self.rolling
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Idempotent
    pub fn start_music(&mut self) {
        if self.music_playing {
            return;
        }
        self.music_playing = true;
        let vol = self.effective_volume();
        if let Some(backend) = self.backend.as_mut() {
            backend.set_music(true, vol);
        }
    }

    /// Idempotent
    pub fn stop_music(&mut self) {
        if !self.music_playing {
            return;
        }
        self.music_playing = false;
        let vol = self.effective_volume();
        if let Some(backend) = self.backend.as_mut() {
            backend.set_music(false, vol);
        }
    }

    /// Idempotent
    pub fn start_rolling(&mut self) {
        if self.rolling {
            return;
        }
        self.rolling = true;
        let vol = self.effective_volume();
        if let Some(backend) = self.backend.as_mut() {
            backend.set_rolling(true, vol);
        }
    }

    /// Idempotent
    pub fn stop_rolling(&mut self) {
        if !self.rolling {
            return;
        }
        self.rolling = false;
        let vol = self.effective_volume();
        if let Some(backend) = self.backend.as_mut() {
            backend.set_rolling(false, vol);
        }
    }

    /// Push the current volume to running loops
    fn refresh_loops(&mut self) {
        let vol = self.effective_volume();
        let (music, rolling) = (self.music_playing, self.rolling);
        if let Some(backend) = self.backend.as_mut() {
            if music {
                backend.set_music(true, vol);
            }
            if rolling {
                backend.set_rolling(true, vol);
            }
        }
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.play_voice(effect.voice(), vol);
    }

    fn set_rolling(&mut self, playing: bool) {
        if playing {
            self.start_rolling();
        } else {
            self.stop_rolling();
        }
    }

    fn set_music(&mut self, playing: bool) {
        if playing {
            self.start_music();
        } else {
            self.stop_music();
        }
    }
}
