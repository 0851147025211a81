//! Frame-driven controller
//!
//! Owns a [`GameState`] and the audio manager, turns key presses into
//! per-tick inputs and drains wall-clock frame time in fixed 60 Hz steps.
//! The host calls [`Game::frame`] once per rendered frame and draws from
//! [`Game::snapshot`].

use std::collections::HashSet;

use crate::audio::AudioManager;
use crate::consts::*;
use crate::loadout::Loadout;
use crate::sim::actions::{BuildPreview, build_preview};
use crate::sim::camera::Camera;
use crate::sim::entity::Entity;
use crate::sim::intro::{FlyingFace, IntroState};
use crate::sim::physics::HeldInput;
use crate::sim::player::PlayerState;
use crate::sim::state::{GameState, RunEvent, RunPhase, SessionConfig};
use crate::sim::tick::{TickInput, tick};
use crate::ticks_to_display_secs;

/// Logical keys (host maps arrows/WASD/space/F/Escape onto these)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Build, fire or dash; skips the intro and leaves view mode
    Action,
    /// Toggle build mode
    Build,
    /// Toggle pause
    Escape,
    /// Free camera (from pause)
    View,
    /// Back to the home screen; works in every phase, dead or paused included
    Home,
}

/// Intro dice for the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiceSprite {
    pub x: f32,
    pub rotation: f32,
    pub size: f32,
}

/// Read-only view of one frame
#[derive(Debug, Clone)]
pub struct RenderSnapshot<'a> {
    pub camera: Camera,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub phase: &'a RunPhase,
    pub player: &'a PlayerState,
    /// Entities overlapping the camera horizontally
    pub visible: Vec<&'a Entity>,
    /// Ghost block while building
    pub preview: Option<BuildPreview>,
    pub dice: Option<DiceSprite>,
    pub faces: &'a [FlyingFace],
    pub lives: u32,
    /// Whole seconds left on a timed level
    pub seconds_left: Option<u64>,
    pub build_mode: bool,
}

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    state: GameState,
    audio: AudioManager,
    accumulator: f64,
    held: HashSet<Key>,
    /// One-shot commands waiting for the next tick
    pending: TickInput,
    /// Action fires once per press
    action_ready: bool,
}

impl Game {
    pub fn new(
        level: u32,
        loadout: Loadout,
        config: SessionConfig,
        seed: u64,
        mut audio: AudioManager,
    ) -> Self {
        let state = GameState::new(level, loadout, config, seed, &mut audio);
        audio.start_music();
        Self {
            state,
            audio,
            accumulator: 0.0,
            held: HashSet::new(),
            pending: TickInput::default(),
            action_ready: true,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    pub fn key_down(&mut self, key: Key) {
        let repeat = !self.held.insert(key);
        match key {
            Key::Action => {
                if self.action_ready {
                    self.pending.action = true;
                    self.action_ready = false;
                }
            }
            Key::Build if !repeat => self.pending.toggle_build = true,
            Key::Escape if !repeat => self.pending.pause = true,
            Key::View if !repeat => self.pending.toggle_view = true,
            Key::Home => self.pending.home = true,
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
        if key == Key::Action {
            self.action_ready = true;
        }
    }

    /// Drop all held keys (focus lost)
    pub fn release_all(&mut self) {
        self.held.clear();
        self.action_ready = true;
    }

    fn held_input(&self) -> HeldInput {
        HeldInput {
            left: self.held.contains(&Key::Left),
            right: self.held.contains(&Key::Right),
            jump: self.held.contains(&Key::Up),
            duck: self.held.contains(&Key::Down),
        }
    }

    /// Run simulation ticks for `elapsed_ms` of wall-clock time.
    /// Returns the number of ticks run.
    pub fn frame(&mut self, elapsed_ms: f64) -> u32 {
        self.accumulator += elapsed_ms.clamp(0.0, MAX_FRAME_MS);

        let mut substeps = 0;
        while self.accumulator >= MS_PER_TICK && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= MS_PER_TICK;
            substeps += 1;
        }
        substeps
    }

    /// Exactly one tick with the current keys
    pub fn step(&mut self) {
        let input = TickInput {
            held: self.held_input(),
            ..self.pending
        };
        tick(&mut self.state, &input, &mut self.audio);

        // Clear one-shot inputs after processing
        self.pending = TickInput::default();

        if self.state.phase.is_terminal() {
            self.audio.stop_music();
            self.audio.stop_rolling();
        }
    }

    pub fn drain_events(&mut self) -> Vec<RunEvent> {
        self.state.drain_events()
    }

    /// Restart the current level from scratch with a new loadout
    pub fn restart(&mut self, loadout: Loadout) {
        self.state.loadout = loadout;
        self.state.start_level(&mut self.audio);
        self.audio.start_music();
        self.accumulator = 0.0;
        self.pending = TickInput::default();
    }

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        let state = &self.state;
        let camera = state.active_camera();
        let vp = state.config.viewport;
        let visible = state
            .level
            .entities
            .iter()
            .filter(|e| e.visible && e.rect.right() > camera.x && e.rect.x < camera.x + vp.width)
            .collect();

        let preview = (state.phase == RunPhase::Playing && state.player.build_mode)
            .then(|| build_preview(&state.level, &state.player, state.loadout.block));

        let (dice, faces): (Option<DiceSprite>, &[FlyingFace]) = match &state.phase {
            RunPhase::Intro(intro) => (
                Some(DiceSprite {
                    x: intro.dice_x,
                    rotation: intro.rotation,
                    size: IntroState::dice_size(),
                }),
                intro.faces.as_slice(),
            ),
            _ => (None, &[][..]),
        };

        RenderSnapshot {
            camera,
            viewport_width: vp.width,
            viewport_height: vp.height,
            phase: &state.phase,
            player: &state.player,
            visible,
            preview,
            dice,
            faces,
            lives: state.player.lives,
            seconds_left: state.timer_ticks.map(ticks_to_display_secs),
            build_mode: state.player.build_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actions::PreviewValidity;
    use crate::sim::entity::{BlockType, PowerUpType};

    fn game() -> Game {
        Game::new(
            1,
            Loadout::new(BlockType::Floating, PowerUpType::Laser),
            SessionConfig {
                show_intro: false,
                ..Default::default()
            },
            3,
            AudioManager::silent(),
        )
    }

    #[test]
    fn test_frame_accumulator() {
        let mut g = game();
        assert_eq!(g.frame(MS_PER_TICK / 2.0), 0);
        assert_eq!(g.frame(MS_PER_TICK / 2.0 + 0.01), 1);
        // long frames are clamped to MAX_FRAME_MS
        assert_eq!(g.frame(10_000.0), 6);
        assert_eq!(g.state().time_ticks, 7);
    }

    #[test]
    fn test_action_fires_once_per_press() {
        let mut g = game();
        for _ in 0..30 {
            g.step();
        }
        let bolts = |g: &Game| {
            g.state()
                .level
                .entities
                .iter()
                .filter(|e| matches!(e.kind, crate::sim::entity::EntityKind::Projectile))
                .count()
        };
        g.key_down(Key::Action);
        g.step();
        g.key_down(Key::Action); // key repeat
        g.step();
        assert_eq!(bolts(&g), 1);

        g.key_up(Key::Action);
        g.key_down(Key::Action);
        g.step();
        assert_eq!(bolts(&g), 2);
    }

    #[test]
    fn test_held_keys_move_player() {
        let mut g = game();
        for _ in 0..30 {
            g.step();
        }
        let x = g.state().player.rect.x;
        g.key_down(Key::Right);
        for _ in 0..10 {
            g.step();
        }
        g.key_up(Key::Right);
        assert_eq!(g.state().player.rect.x, x + 10.0 * MOVE_SPEED);
    }

    #[test]
    fn test_snapshot_preview_only_in_build_mode() {
        let mut g = game();
        for _ in 0..30 {
            g.step();
        }
        assert!(g.snapshot().preview.is_none());
        g.key_down(Key::Build);
        g.step();
        let snap = g.snapshot();
        let preview = snap.preview.expect("preview in build mode");
        assert_eq!(preview.validity, PreviewValidity::Valid);
        assert!(snap.build_mode);
        assert!(!snap.visible.is_empty());
        assert!(snap.dice.is_none());
    }

    #[test]
    fn test_restart_rederives_power_up_abilities() {
        let mut g = game();
        assert!(!g.state().player.can_double_jump);

        g.restart(Loadout::new(BlockType::Square, PowerUpType::DoubleJump));
        assert!(g.state().player.can_double_jump);

        g.restart(Loadout::new(BlockType::Square, PowerUpType::ExtraLife));
        assert!(!g.state().player.can_double_jump);
        assert_eq!(g.state().player.lives, STARTING_LIVES + 1);
    }

    #[test]
    fn test_release_all_drops_held_keys() {
        let mut g = game();
        for _ in 0..30 {
            g.step();
        }
        g.key_down(Key::Right);
        g.key_down(Key::Action);
        g.release_all();
        let x = g.state().player.rect.x;
        g.step();
        assert_eq!(g.state().player.rect.x, x);

        // Action is armed again after the release
        g.key_down(Key::Action);
        g.step();
        let bolts = g
            .state()
            .level
            .entities
            .iter()
            .filter(|e| matches!(e.kind, crate::sim::entity::EntityKind::Projectile))
            .count();
        assert_eq!(bolts, 2);
    }

    #[test]
    fn test_intro_snapshot_has_dice() {
        let mut g = Game::new(
            1,
            Loadout::default(),
            SessionConfig::default(),
            3,
            AudioManager::silent(),
        );
        g.frame(MS_PER_TICK * 3.0 + 0.1);
        let snap = g.snapshot();
        let dice = snap.dice.expect("dice during intro");
        assert_eq!(dice.x, 3.0 * INTRO_ROLL_SPEED);
        assert!(g.audio_mut().is_rolling());

        g.key_down(Key::Action);
        g.step();
        assert_eq!(g.state().phase, RunPhase::Playing);
        assert!(!g.audio_mut().is_rolling());
    }
}
