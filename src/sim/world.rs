//! Entity update engine
//!
//! Walks the entity list back to front once per tick. Entities removed
//! during the pass are tombstoned and compacted at the end, so indices stay
//! valid while other entities are still being updated.

use super::entity::{Axis, Entity, EntityKind, PatrolAi, SpikePhase};
use super::level::LevelData;
use super::player::PlayerState;
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::ticks_to_ms;

/// Side effects of one world update the state machine must apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldOutcome {
    /// A falling spike struck the player
    pub player_killed: bool,
}

/// Advance every entity by one tick
pub fn update_entities(
    level: &mut LevelData,
    player: &PlayerState,
    now: u64,
    audio: &mut dyn AudioSink,
) -> WorldOutcome {
    let mut outcome = WorldOutcome::default();
    let height = level.height;
    let width = level.width;
    let entities = &mut level.entities;
    let mut removed = vec![false; entities.len()];

    for i in (0..entities.len()).rev() {
        if removed[i] {
            continue;
        }
        match entities[i].kind {
            EntityKind::FallingSpike(_) => {
                if update_falling_spike(entities, &mut removed, i, player, height, now, audio) {
                    outcome.player_killed = true;
                }
            }
            EntityKind::MovingPlatform(_) => {
                update_moving_platform(entities, &mut removed, i, audio);
            }
            EntityKind::Spider(_) | EntityKind::FruitFly { .. } => {
                update_patrol(entities, &removed, i, now);
            }
            EntityKind::Projectile => {
                update_projectile(entities, &mut removed, i, width);
            }
            EntityKind::BuiltBlock(_) => {
                update_built_block(entities, &mut removed, i, height, now);
            }
            _ => {}
        }
    }

    let mut flags = removed.into_iter();
    entities.retain(|_| !flags.next().unwrap_or(false));
    outcome
}

fn update_falling_spike(
    entities: &mut [Entity],
    removed: &mut [bool],
    i: usize,
    player: &PlayerState,
    level_height: f32,
    now: u64,
    audio: &mut dyn AudioSink,
) -> bool {
    let e = &mut entities[i];
    let EntityKind::FallingSpike(spike) = &mut e.kind else {
        return false;
    };
    if spike.anchored {
        return false;
    }

    let phase = spike.phase;
    match phase {
        SpikePhase::Dormant => {
            let p = &player.rect;
            let dist_y = p.bottom() - e.rect.y;
            if dist_y > 0.0 && dist_y < FALLING_SPIKE_RANGE {
                let ticks_to_impact = dist_y / FALLING_SPIKE_SPEED;
                let predicted_x = p.x + player.vel.x * ticks_to_impact;
                let dist_x = (p.center().x - e.rect.center().x).abs();
                let on_course = predicted_x + p.w > e.rect.x && predicted_x < e.rect.right();
                if on_course || dist_x < TILE_SIZE / 2.0 {
                    spike.phase = SpikePhase::Triggered { at: now };
                    log::debug!("Spike {} triggered at tick {}", e.id, now);
                    audio.play(SoundEffect::TrapTrigger);
                }
            }
        }
        SpikePhase::Triggered { at } if now >= at + SPIKE_FALL_DELAY_TICKS => {
            spike.phase = SpikePhase::Falling;
        }
        _ => {}
    }

    if spike.phase != SpikePhase::Falling {
        return false;
    }

    e.rect.y += FALLING_SPIKE_SPEED;
    if e.rect.y > level_height {
        removed[i] = true;
        return false;
    }

    let killed = player.rect.intersects(&e.hazard_hitbox());
    let rect = e.rect;
    let landed = entities.iter().enumerate().any(|(j, other)| {
        !removed[j] && matches!(other.kind, EntityKind::Platform) && rect.intersects(&other.rect)
    });
    if landed {
        removed[i] = true;
    }
    killed
}

fn update_moving_platform(
    entities: &mut [Entity],
    removed: &mut [bool],
    i: usize,
    audio: &mut dyn AudioSink,
) {
    let e = &mut entities[i];
    let EntityKind::MovingPlatform(path) = e.kind else {
        return;
    };
    let before = e.rect;

    let (pos, speed) = match path.axis {
        Axis::X => (&mut e.rect.x, &mut e.vel.x),
        Axis::Y => (&mut e.rect.y, &mut e.vel.y),
    };
    *pos += *speed;
    if (*speed > 0.0 && *pos >= path.max) || (*speed < 0.0 && *pos <= path.min) {
        *speed = -*speed;
    }

    let id = e.id;
    let rect = e.rect;
    let delta = glam::Vec2::new(rect.x - before.x, rect.y - before.y);

    for (j, other) in entities.iter_mut().enumerate() {
        if removed[j] {
            continue;
        }
        if delta != glam::Vec2::ZERO && other.attached_to == Some(id) {
            other.rect = other.rect.translated(delta);
        }
        if other.is_built_block() && rect.intersects(&other.rect) {
            log::debug!("Platform {} crushed block {}", id, other.id);
            audio.play(SoundEffect::Deconstruct);
            removed[j] = true;
        }
    }
}

/// Horizontal patrol shared by spiders and fruit flies
fn update_patrol(entities: &mut [Entity], removed: &[bool], i: usize, now: u64) {
    let (patrol, origin_y): (PatrolAi, Option<f32>) = match entities[i].kind {
        EntityKind::Spider(patrol) => (patrol, None),
        EntityKind::FruitFly { patrol, origin_y } => (patrol, Some(origin_y)),
        _ => return,
    };
    if entities[i].vel.x == 0.0 {
        return;
    }

    {
        let e = &mut entities[i];
        e.rect.x += e.vel.x;
        if e.rect.x < patrol.start_x || e.rect.x > patrol.end_x {
            e.vel.x = -e.vel.x;
            e.rect.x += e.vel.x;
        }
    }

    let rect = entities[i].rect;
    let bumped = entities
        .iter()
        .enumerate()
        .any(|(j, b)| !removed[j] && b.is_built_block() && rect.intersects(&b.rect));

    let e = &mut entities[i];
    if bumped {
        e.vel.x = -e.vel.x;
        e.rect.x += e.vel.x;
    }
    if let Some(origin_y) = origin_y {
        let phase = ticks_to_ms(now) / FRUIT_FLY_BOB_PERIOD_MS;
        e.rect.y = origin_y + phase.sin() as f32 * FRUIT_FLY_BOB_AMPLITUDE;
    }
}

fn update_projectile(entities: &mut [Entity], removed: &mut [bool], i: usize, level_width: f32) {
    let rect = {
        let e = &mut entities[i];
        e.rect.x += e.vel.x;
        e.rect
    };

    // newest enemies first
    let hit = (0..entities.len())
        .rev()
        .find(|&j| !removed[j] && entities[j].is_enemy() && rect.intersects(&entities[j].rect));
    if let Some(j) = hit {
        log::debug!("Projectile {} hit enemy {}", entities[i].id, entities[j].id);
        removed[j] = true;
        removed[i] = true;
        return;
    }

    if rect.x < 0.0 || rect.x > level_width {
        removed[i] = true;
    }
}

fn update_built_block(
    entities: &mut [Entity],
    removed: &mut [bool],
    i: usize,
    level_height: f32,
    now: u64,
) {
    let EntityKind::BuiltBlock(block) = entities[i].kind else {
        return;
    };
    if block.expires_at.is_some_and(|t| now >= t) {
        removed[i] = true;
        return;
    }
    if !block.falling {
        return;
    }

    let mut rect = entities[i].rect;
    let mut vy = entities[i].vel.y + GRAVITY;
    rect.y += vy;
    for (j, other) in entities.iter().enumerate() {
        if j == i || removed[j] {
            continue;
        }
        let support = matches!(
            other.kind,
            EntityKind::Platform | EntityKind::BuiltBlock(_) | EntityKind::MovingPlatform(_)
        );
        if support && rect.intersects(&other.rect) {
            rect.y = other.rect.y - rect.h;
            vy = 0.0;
        }
    }

    let e = &mut entities[i];
    e.rect = rect;
    e.vel.y = vy;
    if rect.y > level_height + BLOCK_DESPAWN_MARGIN {
        removed[i] = true;
    }
}
