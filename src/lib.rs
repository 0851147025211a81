//! Dice Quest - a living-room platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, entities, hazards, run state machine)
//! - `game`: Fixed-timestep controller, input capture and render snapshots
//! - `audio`: Named sound events and the sink they are fired into
//! - `loadout`: The two dice rolled before each run
//! - `progress`: Per-level start/complete record and level unlocking
//! - `persistence`: JSON save/load
//! - `settings`: Player preferences

pub mod audio;
pub mod game;
pub mod loadout;
pub mod persistence;
pub mod progress;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, AudioSink, NullAudio, SoundEffect};
pub use game::{Game, Key, RenderSnapshot};
pub use loadout::Loadout;
pub use progress::LevelProgress;
pub use settings::Settings;

/// Game configuration constants
///
/// Velocities are in world units per tick, accelerations in units per tick².
/// Durations are in ticks of the fixed 60 Hz simulation.
pub mod consts {
    /// Simulation rate
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep in milliseconds
    pub const MS_PER_TICK: f64 = 1000.0 / SIM_HZ as f64;
    /// Longest frame the accumulator will accept (tab suspend/resume)
    pub const MAX_FRAME_MS: f64 = 100.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// One tile in world units
    pub const TILE_SIZE: f32 = 40.0;
    /// Default viewport
    pub const CANVAS_WIDTH: f32 = 1024.0;
    pub const CANVAS_HEIGHT: f32 = 768.0;

    /// Player hitbox
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const DUCK_HEIGHT: f32 = 24.0;

    /// Player physics
    pub const GRAVITY: f32 = 0.6;
    /// Extra gravity once the player is already falling
    pub const FALL_GRAVITY_MULTIPLIER: f32 = 1.2;
    pub const JUMP_FORCE: f32 = -13.0;
    pub const MOVE_SPEED: f32 = 4.0;
    pub const MAX_FALL_SPEED: f32 = 15.0;
    pub const COYOTE_TICKS: u64 = 6;
    /// Feet-to-platform-top distance that still counts as riding
    pub const RIDE_TOLERANCE: f32 = 6.0;

    /// Build mode slows the robot down
    pub const BUILD_SPEED_FACTOR: f32 = 0.5;
    pub const BUILD_JUMP_FACTOR: f32 = 0.85;

    /// Power-ups
    pub const SPEED_BOOST_MULTIPLIER: f32 = 1.5;
    pub const GRAVITY_BOOTS_MULTIPLIER: f32 = 0.5;
    pub const PHASE_DURATION_TICKS: u64 = 9;
    pub const DASH_DURATION_TICKS: u64 = 9;
    pub const DASH_SPEED: f32 = 15.0;
    pub const LASER_SPEED: f32 = 12.0;
    pub const PROJECTILE_WIDTH: f32 = 20.0;
    pub const PROJECTILE_HEIGHT: f32 = 4.0;

    /// Building
    pub const BUILD_GAP: f32 = 2.0;
    pub const BUILD_COOLDOWN_TICKS: u64 = 12;
    pub const TEMPORARY_BLOCK_TICKS: u64 = 120;
    /// Fallen blocks are dropped this far below the level
    pub const BLOCK_DESPAWN_MARGIN: f32 = 100.0;

    /// World entities
    pub const MOVING_PLATFORM_SPEED: f32 = 2.0;
    pub const SPIDER_SPEED: f32 = 2.0;
    pub const FRUIT_FLY_SPEED: f32 = 1.5;
    pub const FRUIT_FLY_BOB_AMPLITUDE: f32 = 1.5;
    pub const FRUIT_FLY_BOB_PERIOD_MS: f64 = 200.0;
    pub const FALLING_SPIKE_SPEED: f32 = 10.0;
    pub const FALLING_SPIKE_RANGE: f32 = TILE_SIZE * 15.0;
    pub const SPIKE_FALL_DELAY_TICKS: u64 = 18;

    /// Run flow
    pub const STARTING_LIVES: u32 = 3;
    pub const CHECKPOINTS_PER_LEVEL: u8 = 6;
    pub const LEVEL_COUNT: u32 = 9;
    pub const DEATH_BOUNCE: f32 = -12.0;
    pub const DEATH_DELAY_TICKS: u64 = 30;
    /// Distance below the level at which a falling player is lost
    pub const FALL_OUT_MARGIN: f32 = 200.0;
    /// Respawn hovers the robot this far above the checkpoint marker
    pub const RESPAWN_HOVER: f32 = 5.0;
    pub const STEP_INTERVAL_TICKS: u64 = 15;
    pub const BUILD_STEP_INTERVAL_TICKS: u64 = 24;

    /// Intro and camera
    pub const INTRO_ROLL_SPEED: f32 = 15.0;
    pub const INTRO_SPIN_PER_TICK: f32 = 0.2;
    pub const INTRO_FACE_EASE: f32 = 0.1;
    pub const INTRO_FACE_ARRIVE_DIST: f32 = 20.0;
    pub const INTRO_OVERRUN: f32 = 200.0;
    pub const CAMERA_EASE: f32 = 0.1;
    pub const VIEW_PAN_SPEED: f32 = 10.0;
}

/// Convert a tick count on the logical clock to milliseconds
#[inline]
pub fn ticks_to_ms(ticks: u64) -> f64 {
    ticks as f64 * consts::MS_PER_TICK
}

/// Whole seconds remaining, rounded up (HUD display)
#[inline]
pub fn ticks_to_display_secs(ticks: u64) -> u64 {
    ticks.div_ceil(u64::from(consts::SIM_HZ))
}
