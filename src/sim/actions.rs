//! Player actions: build/deconstruct, laser and phase dash
//!
//! These are called at most once per tick by the state machine, which owns
//! the cooldowns and power-up gating.

use glam::Vec2;
use rand::Rng;

use super::entity::{BlockType, BuiltBlock, Entity, EntityId, EntityKind};
use super::level::LevelData;
use super::player::{Facing, PlayerState};
use super::rect::Rect;
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;

/// What a build at a given rectangle would do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// An existing built block is in the way and will be removed instead
    Deconstruct(EntityId),
    /// Something permanent (or the player) is in the way
    Refused,
    /// The block fits; these enemies get squashed
    Clear { squash: Vec<EntityId> },
}

/// Result of a build action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Built { id: EntityId, block_type: BlockType },
    Deconstructed { id: EntityId },
    Refused,
}

/// Ghost rectangle validity shown while in build mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewValidity {
    Valid,
    Invalid,
    Deconstruct,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildPreview {
    pub rect: Rect,
    pub validity: PreviewValidity,
}

/// Where a block of `block_type` lands next to the player
pub fn placement_rect(player: &PlayerState, block_type: BlockType) -> Rect {
    let size = block_type.footprint();
    let x = match player.facing {
        Facing::Right => player.rect.right() + BUILD_GAP,
        Facing::Left => player.rect.x - size.x - BUILD_GAP,
    };
    let feet = player.rect.bottom();
    let y = if player.ducking { feet } else { feet - size.y };
    Rect::new(x, y, size.x, size.y)
}

/// Scan the level in entity order and decide what a build at `rect` does
pub fn classify_placement(level: &LevelData, player: &PlayerState, rect: &Rect) -> Placement {
    let mut blocked = false;
    let mut squash = Vec::new();

    for e in &level.entities {
        if !rect.intersects(&e.rect) {
            continue;
        }
        if e.is_built_block() {
            return Placement::Deconstruct(e.id);
        }
        if e.is_fixed_solid() {
            return Placement::Refused;
        }
        if e.is_enemy() {
            squash.push(e.id);
        } else {
            blocked = true;
        }
    }

    if blocked || rect.intersects(&player.rect) {
        Placement::Refused
    } else {
        Placement::Clear { squash }
    }
}

/// Ghost preview for the block the player would place right now.
///
/// Random blocks preview as a standard tile.
pub fn build_preview(level: &LevelData, player: &PlayerState, block_type: BlockType) -> BuildPreview {
    let rect = placement_rect(player, block_type);
    let validity = match classify_placement(level, player, &rect) {
        Placement::Deconstruct(_) => PreviewValidity::Deconstruct,
        Placement::Refused => PreviewValidity::Invalid,
        Placement::Clear { .. } => PreviewValidity::Valid,
    };
    BuildPreview { rect, validity }
}

/// Place (or remove) a block next to the player
pub fn build<R: Rng + ?Sized>(
    level: &mut LevelData,
    player: &PlayerState,
    block_type: BlockType,
    rng: &mut R,
    now: u64,
    audio: &mut dyn AudioSink,
) -> BuildOutcome {
    let block_type = match block_type {
        BlockType::Random => BlockType::CONCRETE[rng.random_range(0..BlockType::CONCRETE.len())],
        other => other,
    };
    let rect = placement_rect(player, block_type);

    match classify_placement(level, player, &rect) {
        Placement::Deconstruct(id) => {
            level.entities.retain(|e| e.id != id);
            audio.play(SoundEffect::Deconstruct);
            log::debug!("Deconstructed block {}", id);
            BuildOutcome::Deconstructed { id }
        }
        Placement::Refused => {
            log::debug!("Build refused at ({:.0}, {:.0})", rect.x, rect.y);
            BuildOutcome::Refused
        }
        Placement::Clear { squash } => {
            if !squash.is_empty() {
                level.entities.retain(|e| !squash.contains(&e.id));
                log::debug!("Build squashed {} enemies", squash.len());
            }
            let id = level.next_entity_id();
            let block = BuiltBlock {
                block_type,
                falling: block_type.falls(),
                expires_at: (block_type == BlockType::Temporary).then(|| now + TEMPORARY_BLOCK_TICKS),
            };
            level.entities.push(
                Entity::new(id, rect, EntityKind::BuiltBlock(block)).with_color(block_type.color()),
            );
            audio.play(SoundEffect::Build);
            log::debug!("Built {} block {}", block_type.as_str(), id);
            BuildOutcome::Built { id, block_type }
        }
    }
}

/// Fire a laser bolt from the player's leading edge
pub fn shoot(level: &mut LevelData, player: &PlayerState, audio: &mut dyn AudioSink) -> EntityId {
    let x = match player.facing {
        Facing::Right => player.rect.right(),
        Facing::Left => player.rect.x - PROJECTILE_WIDTH,
    };
    let y = player.rect.center().y - PROJECTILE_HEIGHT / 2.0;
    let id = level.next_entity_id();
    level.entities.push(
        Entity::new(
            id,
            Rect::new(x, y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            EntityKind::Projectile,
        )
        .with_vel(Vec2::new(player.facing.sign() * LASER_SPEED, 0.0)),
    );
    audio.play(SoundEffect::Laser);
    id
}

/// Open the wall-passthrough window and dash forward
pub fn phase_dash(player: &mut PlayerState, now: u64, audio: &mut dyn AudioSink) {
    player.phase_until = now + PHASE_DURATION_TICKS;
    player.dash_until = now + DASH_DURATION_TICKS;
    player.vel.x = player.facing.sign() * DASH_SPEED;
    audio.play(SoundEffect::Dash);
}
