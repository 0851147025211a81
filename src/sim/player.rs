//! The player robot

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::PowerUpType;
use super::rect::Rect;
use crate::consts::*;

/// Which way the robot faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1.0 or +1.0
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Animation/state tag, derived each tick (Dead is terminal until respawn)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPose {
    Idle,
    Running,
    Jumping,
    Ducking,
    Dead,
}

/// Full player state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub rect: Rect,
    pub vel: Vec2,
    pub grounded: bool,
    /// Last tick the robot stood on something (coyote time)
    pub last_grounded: Option<u64>,
    pub ducking: bool,
    pub facing: Facing,
    pub build_mode: bool,
    pub pose: PlayerPose,
    pub lives: u32,
    pub current_level: u32,
    /// 0 = start, 1..=6 = checkpoints (6 completes the level)
    pub last_checkpoint: u8,
    /// Jumps used in the current airborne episode (0..=2)
    pub jump_count: u8,
    pub can_double_jump: bool,
    /// Wall passthrough lasts while the clock is below this tick
    pub phase_until: u64,
    /// Manual steering is ignored while the clock is below this tick
    pub dash_until: u64,
}

impl PlayerState {
    pub fn new(level: u32, power_up: PowerUpType) -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            grounded: false,
            last_grounded: None,
            ducking: false,
            facing: Facing::Right,
            build_mode: false,
            pose: PlayerPose::Idle,
            lives: starting_lives(power_up),
            current_level: level,
            last_checkpoint: 0,
            jump_count: 0,
            can_double_jump: power_up == PowerUpType::DoubleJump,
            phase_until: 0,
            dash_until: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.pose == PlayerPose::Dead
    }

    pub fn is_phasing(&self, now: u64) -> bool {
        now < self.phase_until
    }

    pub fn is_dashing(&self, now: u64) -> bool {
        now < self.dash_until
    }

    /// Put the robot back on its feet at `spawn` (lives untouched)
    pub fn respawn_at(&mut self, spawn: Vec2, level: u32, checkpoint: u8) {
        self.rect = Rect::new(spawn.x, spawn.y, PLAYER_WIDTH, PLAYER_HEIGHT);
        self.vel = Vec2::ZERO;
        self.grounded = false;
        self.last_grounded = None;
        self.ducking = false;
        self.build_mode = false;
        self.pose = PlayerPose::Idle;
        self.current_level = level;
        self.last_checkpoint = checkpoint;
        self.jump_count = 0;
        self.phase_until = 0;
        self.dash_until = 0;
    }
}

/// Lives granted at the start of a level
pub fn starting_lives(power_up: PowerUpType) -> u32 {
    if power_up == PowerUpType::ExtraLife {
        STARTING_LIVES + 1
    } else {
        STARTING_LIVES
    }
}
