//! Entity model
//!
//! Every level object is an [`Entity`]: a box, a velocity and a kind. Each
//! kind carries only the data its behavior needs. The player is not an
//! entity; see [`super::player::PlayerState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Stable entity identifier (unique within one level instance)
pub type EntityId = u32;

/// Flat type tag, mirrors [`EntityKind`] without payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Player,
    Platform,
    Spike,
    FallingSpike,
    EnemySpider,
    FruitFly,
    Checkpoint,
    BuiltBlock,
    Lamp,
    Projectile,
    MovingPlatform,
}

/// Buildable block rolled on the first die
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    Square,
    Floating,
    High,
    Wide,
    Temporary,
    Random,
}

impl BlockType {
    pub const ALL: [BlockType; 6] = [
        BlockType::Square,
        BlockType::Floating,
        BlockType::High,
        BlockType::Wide,
        BlockType::Temporary,
        BlockType::Random,
    ];

    /// Types a Random roll can resolve to
    pub const CONCRETE: [BlockType; 5] = [
        BlockType::Square,
        BlockType::Floating,
        BlockType::High,
        BlockType::Wide,
        BlockType::Temporary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Square => "Square",
            BlockType::Floating => "Floating",
            BlockType::High => "High",
            BlockType::Wide => "Wide",
            BlockType::Temporary => "Temporary",
            BlockType::Random => "Random",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "square" => Some(BlockType::Square),
            "floating" | "float" => Some(BlockType::Floating),
            "high" | "tall" => Some(BlockType::High),
            "wide" => Some(BlockType::Wide),
            "temporary" | "temp" => Some(BlockType::Temporary),
            "random" => Some(BlockType::Random),
            _ => None,
        }
    }

    /// Width and height of a placed block
    pub fn footprint(&self) -> Vec2 {
        match self {
            BlockType::High => Vec2::new(TILE_SIZE / 2.0, TILE_SIZE * 2.0),
            BlockType::Wide => Vec2::new(TILE_SIZE * 2.0, TILE_SIZE / 2.0),
            _ => Vec2::splat(TILE_SIZE),
        }
    }

    /// Whether a placed block of this type drops under gravity
    pub fn falls(&self) -> bool {
        matches!(self, BlockType::Square | BlockType::High | BlockType::Wide)
    }

    /// Render hint
    pub fn color(&self) -> u32 {
        match self {
            BlockType::Square => 0x95a5a6,
            BlockType::Floating => 0x00bcd4,
            BlockType::High => 0x9b59b6,
            BlockType::Wide => 0x2ecc71,
            BlockType::Temporary => 0xe67e22,
            BlockType::Random => 0x34495e,
        }
    }
}

/// Power-up rolled on the second die
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpType {
    DoubleJump,
    Laser,
    GravityBoots,
    ExtraLife,
    Phase,
}

impl PowerUpType {
    pub const ALL: [PowerUpType; 5] = [
        PowerUpType::DoubleJump,
        PowerUpType::Laser,
        PowerUpType::GravityBoots,
        PowerUpType::ExtraLife,
        PowerUpType::Phase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpType::DoubleJump => "Double Jump",
            PowerUpType::Laser => "Laser Gun",
            PowerUpType::GravityBoots => "Gravity Boots",
            PowerUpType::ExtraLife => "Extra Life",
            PowerUpType::Phase => "Phase Wall",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "doublejump" => Some(PowerUpType::DoubleJump),
            "laser" | "lasergun" => Some(PowerUpType::Laser),
            "gravityboots" | "boots" => Some(PowerUpType::GravityBoots),
            "extralife" => Some(PowerUpType::ExtraLife),
            "phase" | "phasewall" => Some(PowerUpType::Phase),
            _ => None,
        }
    }
}

/// Axis a moving platform travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Horizontal patrol range for walking/flying enemies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolAi {
    pub start_x: f32,
    pub end_x: f32,
}

/// Bounce range of a moving platform along its axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformPath {
    pub axis: Axis,
    pub min: f32,
    pub max: f32,
}

/// Falling spike lifecycle (removal is the implicit final state)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpikePhase {
    Dormant,
    Triggered { at: u64 },
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallingSpike {
    pub phase: SpikePhase,
    /// Hangs permanently (under a lamp or a platform) and never falls
    pub anchored: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuiltBlock {
    /// Resolved type (never Random)
    pub block_type: BlockType,
    pub falling: bool,
    /// Tick after which a temporary block vanishes
    pub expires_at: Option<u64>,
}

/// Per-kind payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Platform,
    /// Hanging lamp: solid like a platform, drawn differently
    Lamp,
    Spike,
    FallingSpike(FallingSpike),
    Spider(PatrolAi),
    FruitFly { patrol: PatrolAi, origin_y: f32 },
    Checkpoint { index: u8 },
    BuiltBlock(BuiltBlock),
    Projectile,
    MovingPlatform(PlatformPath),
}

/// A level object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub rect: Rect,
    pub vel: Vec2,
    /// Render hint only (0xRRGGBB)
    pub color: Option<u32>,
    /// Intro reveal gating; only checkpoints start hidden
    pub visible: bool,
    /// Moving platform this entity follows rigidly
    pub attached_to: Option<EntityId>,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(id: EntityId, rect: Rect, kind: EntityKind) -> Self {
        Self {
            id,
            rect,
            vel: Vec2::ZERO,
            color: None,
            visible: true,
            attached_to: None,
            kind,
        }
    }

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn entity_type(&self) -> EntityType {
        match self.kind {
            EntityKind::Platform => EntityType::Platform,
            EntityKind::Lamp => EntityType::Lamp,
            EntityKind::Spike => EntityType::Spike,
            EntityKind::FallingSpike(_) => EntityType::FallingSpike,
            EntityKind::Spider(_) => EntityType::EnemySpider,
            EntityKind::FruitFly { .. } => EntityType::FruitFly,
            EntityKind::Checkpoint { .. } => EntityType::Checkpoint,
            EntityKind::BuiltBlock(_) => EntityType::BuiltBlock,
            EntityKind::Projectile => EntityType::Projectile,
            EntityKind::MovingPlatform(_) => EntityType::MovingPlatform,
        }
    }

    /// Blocks movement (platforms, lamps, built blocks, moving platforms)
    pub fn is_solid(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::Platform
                | EntityKind::Lamp
                | EntityKind::BuiltBlock(_)
                | EntityKind::MovingPlatform(_)
        )
    }

    /// Solid that a build can never be placed into
    pub fn is_fixed_solid(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::Platform | EntityKind::Lamp | EntityKind::MovingPlatform(_)
        )
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, EntityKind::Spider(_) | EntityKind::FruitFly { .. })
    }

    /// Kills the player on contact
    pub fn is_hazard(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::Spike
                | EntityKind::FallingSpike(_)
                | EntityKind::Spider(_)
                | EntityKind::FruitFly { .. }
        )
    }

    /// Lethal area, inset from the sprite box
    pub fn hazard_hitbox(&self) -> Rect {
        match self.kind {
            EntityKind::FruitFly { .. } => self.rect.inset(2.0, 2.0, 2.0, 2.0),
            _ => self.rect.inset(8.0, 8.0, 8.0, 4.0),
        }
    }

    pub fn checkpoint_index(&self) -> Option<u8> {
        match self.kind {
            EntityKind::Checkpoint { index } => Some(index),
            _ => None,
        }
    }

    pub fn is_built_block(&self) -> bool {
        matches!(self.kind, EntityKind::BuiltBlock(_))
    }
}
