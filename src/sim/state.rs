//! Run state and core transitions
//!
//! Everything a running level needs lives in [`GameState`]. The per-tick
//! state machine is in `tick`; the transitions shared by several phases
//! (death, life loss, level reset) live here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::{Camera, Viewport};
use super::entity::PowerUpType;
use super::intro::IntroState;
use super::level::{LevelData, create_level};
use super::player::{PlayerPose, PlayerState, starting_lives};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::loadout::Loadout;

/// Top-level run phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Dice roll-through revealing the checkpoints
    Intro(IntroState),
    /// Normal play
    Playing,
    /// Ticking suspended. `respawn_at` is kept when paused mid-death.
    Paused { respawn_at: Option<u64> },
    /// Free camera, no physics (entered from pause)
    ViewMode {
        camera: Camera,
        respawn_at: Option<u64>,
    },
    /// Death animation; the life is settled once the clock reaches `respawn_at`
    Dead { respawn_at: u64 },
    LevelComplete,
    GameOver,
    /// Player left for the home screen
    Exited,
}

impl RunPhase {
    /// No further ticks will change the run
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunPhase::LevelComplete | RunPhase::GameOver | RunPhase::Exited
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            RunPhase::Intro(_) => "intro",
            RunPhase::Playing => "playing",
            RunPhase::Paused { .. } => "paused",
            RunPhase::ViewMode { .. } => "view",
            RunPhase::Dead { .. } => "dead",
            RunPhase::LevelComplete => "level-complete",
            RunPhase::GameOver => "game-over",
            RunPhase::Exited => "exited",
        }
    }
}

/// Notifications for whoever owns the run (UI shell, progress store)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEvent {
    LevelStarted { level: u32 },
    CheckpointReached { level: u32, index: u8 },
    PlayerDied { level: u32 },
    LevelComplete { level: u32 },
    GameOver { level: u32 },
    Home,
}

/// Per-run options decided outside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unlimited lives; an expired timer is refilled instead of ending the run
    pub admin_mode: bool,
    pub viewport: Viewport,
    /// Play the dice intro on a fresh level start
    pub show_intro: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            admin_mode: false,
            viewport: Viewport::default(),
            show_intro: true,
        }
    }
}

/// Complete run state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub level: LevelData,
    pub player: PlayerState,
    pub phase: RunPhase,
    /// Logical clock in ticks; frozen while paused or in the intro
    pub time_ticks: u64,
    pub loadout: Loadout,
    pub config: SessionConfig,
    /// Ticks left on a timed level
    pub timer_ticks: Option<u64>,
    pub camera: Camera,
    /// Jump latch: a held jump key fires once until released
    pub jump_armed: bool,
    pub last_build_tick: Option<u64>,
    pub last_step_tick: Option<u64>,
    #[serde(skip)]
    pub events: Vec<RunEvent>,
}

impl GameState {
    /// Start `level_index` from scratch
    pub fn new(
        level_index: u32,
        loadout: Loadout,
        config: SessionConfig,
        seed: u64,
        audio: &mut dyn AudioSink,
    ) -> Self {
        let level = create_level(level_index);
        let player = PlayerState::new(level.id, loadout.power_up);
        let timer_ticks = level.time_limit_ticks();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level,
            player,
            phase: RunPhase::Playing,
            time_ticks: 0,
            loadout,
            config,
            timer_ticks,
            camera: Camera::default(),
            jump_armed: true,
            last_build_tick: None,
            last_step_tick: None,
            events: Vec::new(),
        };
        state.start_level(audio);
        state
    }

    /// Fresh start of the current level: lives, timer and checkpoint reset
    pub fn start_level(&mut self, audio: &mut dyn AudioSink) {
        self.player.lives = starting_lives(self.loadout.power_up);
        self.player.can_double_jump = self.loadout.power_up == PowerUpType::DoubleJump;
        self.timer_ticks = self.level.time_limit_ticks();
        let intro = self.config.show_intro;
        self.reset_level(0, intro, audio);
        log::info!(
            "Level {} ({}) started with {} lives",
            self.level.id,
            self.level.name,
            self.player.lives
        );
        self.events.push(RunEvent::LevelStarted { level: self.level.id });
    }

    /// Rebuild the level geometry and put the player at `checkpoint`.
    ///
    /// Only checkpoints up to `checkpoint` are revealed again. Lives and the
    /// timer are left alone.
    pub fn reset_level(&mut self, checkpoint: u8, show_intro: bool, audio: &mut dyn AudioSink) {
        let id = self.level.id;
        self.level = create_level(id);
        self.level.reveal_checkpoints_through(checkpoint);

        let spawn = self.level.respawn_point(checkpoint);
        self.player.respawn_at(spawn, id, checkpoint);
        self.jump_armed = true;
        self.last_build_tick = None;
        self.last_step_tick = None;

        if show_intro {
            self.camera = Camera::default();
            self.phase = RunPhase::Intro(IntroState::new(checkpoint));
            audio.set_rolling(true);
        } else {
            self.camera.center_on(spawn.x, &self.level, &self.config.viewport);
            self.phase = RunPhase::Playing;
        }
    }

    /// Enter the death animation. No-op if already dead.
    pub fn trigger_death(&mut self, audio: &mut dyn AudioSink) {
        if self.player.is_dead() {
            return;
        }
        self.player.pose = PlayerPose::Dead;
        self.player.vel.x = 0.0;
        self.player.vel.y = DEATH_BOUNCE;
        self.player.build_mode = false;
        audio.play(SoundEffect::Die);
        log::info!(
            "Player died on level {} at ({:.0}, {:.0})",
            self.level.id,
            self.player.rect.x,
            self.player.rect.y
        );
        self.phase = RunPhase::Dead {
            respawn_at: self.time_ticks + DEATH_DELAY_TICKS,
        };
        self.events.push(RunEvent::PlayerDied { level: self.level.id });
    }

    fn timer_expired(&self) -> bool {
        self.timer_ticks == Some(0)
    }

    /// Settle a death once its animation has finished
    pub fn handle_life_lost(&mut self, audio: &mut dyn AudioSink) {
        let admin = self.config.admin_mode;
        let expired = self.timer_expired();

        // running out of time ends the run outright; lives are not spent
        if expired && !admin {
            log::info!("Time ran out on level {}", self.level.id);
            self.game_over(audio);
            return;
        }

        if !admin {
            self.player.lives = self.player.lives.saturating_sub(1);
            if self.player.lives == 0 {
                self.game_over(audio);
                return;
            }
        }

        if expired {
            self.timer_ticks = self.level.time_limit_ticks();
        }

        let checkpoint = self.player.last_checkpoint;
        self.reset_level(checkpoint, false, audio);
        log::info!(
            "Respawned at checkpoint {} with {} lives",
            checkpoint,
            self.player.lives
        );
    }

    fn game_over(&mut self, audio: &mut dyn AudioSink) {
        self.phase = RunPhase::GameOver;
        audio.set_rolling(false);
        log::info!("Game over on level {}", self.level.id);
        self.events.push(RunEvent::GameOver { level: self.level.id });
    }

    pub(crate) fn complete_level(&mut self) {
        self.phase = RunPhase::LevelComplete;
        self.player.build_mode = false;
        log::info!("Level {} complete at tick {}", self.level.id, self.time_ticks);
        self.events.push(RunEvent::LevelComplete { level: self.level.id });
    }

    /// Leave for the home screen
    pub fn exit_to_home(&mut self, audio: &mut dyn AudioSink) {
        self.phase = RunPhase::Exited;
        audio.set_rolling(false);
        self.events.push(RunEvent::Home);
    }

    /// Hand pending events to the caller
    pub fn drain_events(&mut self) -> Vec<RunEvent> {
        std::mem::take(&mut self.events)
    }

    /// Camera the renderer should use this frame
    pub fn active_camera(&self) -> Camera {
        match &self.phase {
            RunPhase::ViewMode { camera, .. } => *camera,
            _ => self.camera,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::sim::entity::{BlockType, PowerUpType};

    fn no_intro() -> SessionConfig {
        SessionConfig {
            show_intro: false,
            ..Default::default()
        }
    }

    fn state(power_up: PowerUpType, config: SessionConfig) -> GameState {
        GameState::new(1, Loadout::new(BlockType::Square, power_up), config, 1, &mut NullAudio)
    }

    #[test]
    fn test_new_starts_with_intro() {
        let mut sounds = Vec::new();
        let mut s = GameState::new(
            2,
            Loadout::default(),
            SessionConfig::default(),
            5,
            &mut sounds,
        );
        assert!(matches!(s.phase, RunPhase::Intro(_)));
        assert_eq!(s.player.lives, STARTING_LIVES);
        assert_eq!(s.player.rect.x, s.level.spawn_point.x);
        assert_eq!(s.drain_events(), vec![RunEvent::LevelStarted { level: 2 }]);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_extra_life() {
        let s = state(PowerUpType::ExtraLife, no_intro());
        assert_eq!(s.player.lives, STARTING_LIVES + 1);
        assert_eq!(s.phase, RunPhase::Playing);
    }

    #[test]
    fn test_death_is_not_reentrant() {
        let mut s = state(PowerUpType::Laser, no_intro());
        let mut sounds = Vec::new();
        s.trigger_death(&mut sounds);
        s.time_ticks += 10;
        s.trigger_death(&mut sounds);
        assert_eq!(sounds, vec![SoundEffect::Die]);
        assert_eq!(s.phase, RunPhase::Dead { respawn_at: DEATH_DELAY_TICKS });
        assert_eq!(s.player.vel.y, DEATH_BOUNCE);
    }

    #[test]
    fn test_life_lost_respawns_at_checkpoint() {
        let mut s = state(PowerUpType::Laser, no_intro());
        s.player.last_checkpoint = 3;
        s.trigger_death(&mut NullAudio);
        s.handle_life_lost(&mut NullAudio);

        assert_eq!(s.player.lives, STARTING_LIVES - 1);
        assert_eq!(s.phase, RunPhase::Playing);
        let expected = s.level.respawn_point(3);
        assert_eq!((s.player.rect.x, s.player.rect.y), (expected.x, expected.y));
        assert!(s.level.checkpoint(3).is_some_and(|e| e.visible));
        assert!(s.level.checkpoint(4).is_some_and(|e| !e.visible));
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut s = state(PowerUpType::Laser, no_intro());
        s.player.lives = 1;
        s.handle_life_lost(&mut NullAudio);
        assert_eq!(s.phase, RunPhase::GameOver);
        assert!(s.drain_events().contains(&RunEvent::GameOver { level: 1 }));
    }

    #[test]
    fn test_timer_expiry() {
        let mut s = GameState::new(5, Loadout::default(), no_intro(), 1, &mut NullAudio);
        s.timer_ticks = Some(0);
        s.handle_life_lost(&mut NullAudio);
        assert_eq!(s.phase, RunPhase::GameOver);
        assert_eq!(s.player.lives, STARTING_LIVES);

        let mut admin = GameState::new(
            5,
            Loadout::default(),
            SessionConfig {
                admin_mode: true,
                ..no_intro()
            },
            1,
            &mut NullAudio,
        );
        admin.timer_ticks = Some(0);
        admin.handle_life_lost(&mut NullAudio);
        assert_eq!(admin.phase, RunPhase::Playing);
        assert_eq!(admin.timer_ticks, Some(60 * u64::from(SIM_HZ)));
        assert_eq!(admin.player.lives, STARTING_LIVES);
    }

    #[test]
    fn test_active_camera_in_view_mode() {
        let mut s = state(PowerUpType::Laser, no_intro());
        let free = Camera { x: 300.0, y: 0.0 };
        s.phase = RunPhase::ViewMode {
            camera: free,
            respawn_at: None,
        };
        assert_eq!(s.active_camera(), free);
    }
}
