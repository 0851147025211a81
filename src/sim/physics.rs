//! Player physics
//!
//! One call to [`step_player`] advances the robot by one tick: steering,
//! jumping, ducking, gravity, then per-axis integration with collision
//! resolution against every solid in the level.

use super::entity::{Entity, EntityId, EntityKind, PowerUpType};
use super::level::LevelData;
use super::player::{Facing, PlayerPose, PlayerState};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;

/// Movement keys held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub duck: bool,
}

/// What happened to the player this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhysicsOutcome {
    /// Grounded before vertical resolution
    pub was_grounded: bool,
    pub is_moving: bool,
    /// Airborne to grounded transition
    pub landed: bool,
}

/// The moving platform the player is standing on, if any
pub fn ridden_platform<'a>(player: &PlayerState, entities: &'a [Entity]) -> Option<&'a Entity> {
    let feet = player.rect.bottom();
    entities.iter().find(|e| {
        matches!(e.kind, EntityKind::MovingPlatform(_))
            && (feet - e.rect.y).abs() < RIDE_TOLERANCE
            && player.rect.overlaps_x(&e.rect)
    })
}

fn resolve_x(player: &mut PlayerState, entities: &[Entity], ignore: Option<EntityId>) {
    for e in entities {
        if !e.is_solid() {
            continue;
        }
        if let Some(id) = ignore {
            if e.id == id || e.attached_to == Some(id) {
                continue;
            }
        }
        if !player.rect.intersects(&e.rect) {
            continue;
        }
        if player.vel.x > 0.0 {
            player.rect.x = e.rect.x - player.rect.w;
        } else if player.vel.x < 0.0 {
            player.rect.x = e.rect.right();
        }
    }
}

fn resolve_y(player: &mut PlayerState, entities: &[Entity]) {
    for e in entities {
        if !e.is_solid() || !player.rect.intersects(&e.rect) {
            continue;
        }
        if player.vel.y > 0.0 {
            player.rect.y = e.rect.y - player.rect.h;
            player.grounded = true;
            player.vel.y = 0.0;
        } else if player.vel.y < 0.0 {
            player.rect.y = e.rect.bottom();
            player.vel.y = 0.0;
        }
    }
}

/// Advance a living player by one tick
pub fn step_player(
    player: &mut PlayerState,
    level: &LevelData,
    input: &HeldInput,
    jump_armed: &mut bool,
    power_up: PowerUpType,
    now: u64,
    audio: &mut dyn AudioSink,
) -> PhysicsOutcome {
    let entities = level.entities.as_slice();

    // power-up first, build mode on top
    let mut speed = MOVE_SPEED;
    if power_up == PowerUpType::Phase {
        speed *= SPEED_BOOST_MULTIPLIER;
    }
    let mut jump_force = JUMP_FORCE;
    if player.build_mode {
        speed *= BUILD_SPEED_FACTOR;
        jump_force *= BUILD_JUMP_FACTOR;
    }
    let mut gravity = GRAVITY;
    if power_up == PowerUpType::GravityBoots {
        gravity *= GRAVITY_BOOTS_MULTIPLIER;
    }
    if player.vel.y > 0.0 {
        gravity *= FALL_GRAVITY_MULTIPLIER;
    }

    // Steering (a dash keeps its velocity)
    if !player.is_dashing(now) {
        if input.left {
            player.vel.x = -speed;
            player.facing = Facing::Left;
        } else if input.right {
            player.vel.x = speed;
            player.facing = Facing::Right;
        } else {
            player.vel.x = 0.0;
        }
    }

    // Jumping
    if player.grounded {
        player.last_grounded = Some(now);
    }
    if input.jump {
        if *jump_armed {
            let in_coyote = player
                .last_grounded
                .is_some_and(|t| now.saturating_sub(t) <= COYOTE_TICKS);
            let can_jump = player.grounded || (in_coyote && player.vel.y >= 0.0);

            if can_jump {
                player.vel.y = jump_force;
                if let Some(platform) = ridden_platform(player, entities) {
                    player.vel.y += platform.vel.y;
                }
                player.grounded = false;
                player.last_grounded = None;
                player.jump_count = 1;
                *jump_armed = false;
                audio.play(SoundEffect::Jump);
            } else if player.can_double_jump && player.jump_count < 2 {
                player.vel.y = jump_force;
                player.jump_count += 1;
                *jump_armed = false;
                audio.play(SoundEffect::Jump);
            }
        }
    } else {
        *jump_armed = true;
    }

    // Ducking
    let duck_delta = PLAYER_HEIGHT - DUCK_HEIGHT;
    if input.duck && !player.ducking {
        player.rect.y += duck_delta;
        player.rect.h = DUCK_HEIGHT;
        player.ducking = true;
    } else if !input.duck && player.ducking {
        let mut standing = player.rect;
        standing.y -= duck_delta;
        standing.h = PLAYER_HEIGHT;
        let blocked = entities
            .iter()
            .any(|e| e.is_solid() && standing.intersects(&e.rect));
        if !blocked {
            player.rect = standing;
            player.ducking = false;
        }
    }

    // Gravity
    player.vel.y = (player.vel.y + gravity).min(MAX_FALL_SPEED);

    // Horizontal
    player.rect.x += player.vel.x;
    if player.rect.x < 0.0 {
        player.rect.x = 0.0;
        player.vel.x = 0.0;
    } else if player.rect.right() > level.width {
        player.rect.x = level.width - player.rect.w;
        player.vel.x = 0.0;
    }

    let riding = ridden_platform(player, entities);
    if let Some(platform) = riding {
        player.rect.x += platform.vel.x;
    }
    if !player.is_phasing(now) && !player.is_dashing(now) {
        resolve_x(player, entities, riding.map(|p| p.id));
    }

    // Vertical
    player.rect.y += player.vel.y;
    if let Some(platform) = riding {
        player.rect.y += platform.vel.y;
    }

    let was_grounded = player.grounded;
    player.grounded = false;
    resolve_y(player, entities);

    let landed = !was_grounded && player.grounded;
    if landed {
        audio.play(SoundEffect::Land);
        player.jump_count = 0;
    }

    let is_moving = player.vel.x.abs() > 0.0;
    player.pose = if player.ducking {
        PlayerPose::Ducking
    } else if !player.grounded {
        PlayerPose::Jumping
    } else if is_moving {
        PlayerPose::Running
    } else {
        PlayerPose::Idle
    };

    PhysicsOutcome {
        was_grounded,
        is_moving,
        landed,
    }
}

/// Death arc: gravity only, no collision
pub fn step_dead(player: &mut PlayerState) {
    player.vel.y = (player.vel.y + GRAVITY).min(MAX_FALL_SPEED);
    player.rect.y += player.vel.y;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::sim::entity::{Axis, PlatformPath};
    use crate::sim::level::{LayoutInfo, LevelBuilder};
    use crate::sim::rect::Rect;
    use glam::Vec2;

    fn flat_level() -> LevelData {
        let mut b = LevelBuilder::new();
        b.floor(0.0, 40.0);
        b.finish(
            1,
            LayoutInfo {
                name: "flat",
                width_tiles: 40.0,
                time_limit_secs: None,
            },
        )
    }

    fn standing_player(x: f32) -> PlayerState {
        let mut p = PlayerState::new(1, PowerUpType::Laser);
        // floor surface at 14 tiles
        p.rect = Rect::new(x, 560.0 - PLAYER_HEIGHT, PLAYER_WIDTH, PLAYER_HEIGHT);
        p.grounded = true;
        p
    }

    fn step(p: &mut PlayerState, level: &LevelData, input: HeldInput, armed: &mut bool, now: u64) -> PhysicsOutcome {
        step_player(p, level, &input, armed, PowerUpType::Laser, now, &mut NullAudio)
    }

    #[test]
    fn test_standing_still_stays_grounded() {
        let level = flat_level();
        let mut p = standing_player(100.0);
        let mut armed = true;
        for t in 0..30 {
            let out = step(&mut p, &level, HeldInput::default(), &mut armed, t);
            assert!(out.was_grounded);
        }
        assert!(p.grounded);
        assert_eq!(p.rect.bottom(), 560.0);
        assert_eq!(p.pose, PlayerPose::Idle);
    }

    #[test]
    fn test_jump_latch_requires_release() {
        let level = flat_level();
        let mut p = standing_player(100.0);
        let mut armed = true;
        let mut sounds = Vec::new();
        let jump = HeldInput { jump: true, ..Default::default() };

        step_player(&mut p, &level, &jump, &mut armed, PowerUpType::Laser, 0, &mut sounds);
        assert_eq!(sounds, vec![SoundEffect::Jump]);
        assert!(p.vel.y < 0.0);
        assert!(!armed);

        // holding the key never re-fires, even after landing
        for t in 1..120 {
            step_player(&mut p, &level, &jump, &mut armed, PowerUpType::Laser, t, &mut sounds);
        }
        assert_eq!(sounds.iter().filter(|s| **s == SoundEffect::Jump).count(), 1);
        assert!(sounds.contains(&SoundEffect::Land));
        assert_eq!(p.jump_count, 0);
    }

    #[test]
    fn test_double_jump_cap() {
        let level = flat_level();
        let mut p = standing_player(100.0);
        p.can_double_jump = true;
        let mut armed = true;
        let jump = HeldInput { jump: true, ..Default::default() };
        let none = HeldInput::default();

        step(&mut p, &level, jump, &mut armed, 0);
        step(&mut p, &level, none, &mut armed, 1);
        step(&mut p, &level, jump, &mut armed, 2);
        assert_eq!(p.jump_count, 2);
        let vy = p.vel.y;
        step(&mut p, &level, none, &mut armed, 3);
        step(&mut p, &level, jump, &mut armed, 4);
        assert_eq!(p.jump_count, 2);
        // third press only applies gravity
        assert!(p.vel.y > vy);
    }

    #[test]
    fn test_build_mode_slows_and_weakens_jump() {
        let level = flat_level();
        let mut p = standing_player(100.0);
        p.build_mode = true;
        let mut armed = true;
        let input = HeldInput { right: true, jump: true, ..Default::default() };
        step(&mut p, &level, input, &mut armed, 0);
        assert_eq!(p.vel.x, MOVE_SPEED * BUILD_SPEED_FACTOR);
        assert!((p.vel.y - (JUMP_FORCE * BUILD_JUMP_FACTOR + GRAVITY)).abs() < 1e-4);
    }

    #[test]
    fn test_left_wins_over_right() {
        let level = flat_level();
        let mut p = standing_player(100.0);
        let mut armed = true;
        step(&mut p, &level, HeldInput { left: true, right: true, ..Default::default() }, &mut armed, 0);
        assert_eq!(p.vel.x, -MOVE_SPEED);
        assert_eq!(p.facing, Facing::Left);
    }

    #[test]
    fn test_unduck_refused_under_ceiling() {
        let mut level = flat_level();
        let id = level.next_entity_id();
        // low shelf 30 units above the floor
        level.entities.push(Entity::new(id, Rect::new(80.0, 500.0, 100.0, 30.0), EntityKind::Platform));
        let mut p = standing_player(100.0);
        p.rect.y += PLAYER_HEIGHT - DUCK_HEIGHT;
        p.rect.h = DUCK_HEIGHT;
        p.ducking = true;
        let mut armed = true;

        step(&mut p, &level, HeldInput::default(), &mut armed, 0);
        assert!(p.ducking);
        assert_eq!(p.rect.h, DUCK_HEIGHT);
        assert_eq!(p.pose, PlayerPose::Ducking);
    }

    #[test]
    fn test_riding_platform_carries_player() {
        let mut level = flat_level();
        let id = level.next_entity_id();
        let path = PlatformPath { axis: Axis::X, min: 200.0, max: 600.0 };
        level.entities.push(
            Entity::new(id, Rect::new(200.0, 400.0, 120.0, 40.0), EntityKind::MovingPlatform(path))
                .with_vel(Vec2::new(2.0, 0.0)),
        );
        let mut p = PlayerState::new(1, PowerUpType::Laser);
        p.rect = Rect::new(220.0, 400.0 - PLAYER_HEIGHT, PLAYER_WIDTH, PLAYER_HEIGHT);
        p.grounded = true;
        let mut armed = true;

        step(&mut p, &level, HeldInput::default(), &mut armed, 0);
        assert_eq!(p.rect.x, 222.0);
        assert!(p.grounded);
        assert_eq!(p.rect.bottom(), 400.0);
    }

    #[test]
    fn test_phase_passes_through_walls() {
        let mut level = flat_level();
        let id = level.next_entity_id();
        level.entities.push(Entity::new(id, Rect::new(140.0, 400.0, 40.0, 160.0), EntityKind::Platform));
        let mut p = standing_player(100.0);
        p.vel.x = DASH_SPEED;
        p.phase_until = 9;
        p.dash_until = 9;
        let mut armed = true;

        step(&mut p, &level, HeldInput::default(), &mut armed, 0);
        assert_eq!(p.rect.x, 115.0);
        step(&mut p, &level, HeldInput::default(), &mut armed, 1);
        // never pushed back out of the wall
        assert_eq!(p.rect.x, 130.0);
    }

    #[test]
    fn test_level_edges_clamp() {
        let level = flat_level();
        let mut p = standing_player(1.0);
        let mut armed = true;
        step(&mut p, &level, HeldInput { left: true, ..Default::default() }, &mut armed, 0);
        assert_eq!(p.rect.x, 0.0);
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn test_dead_arc_ignores_floor() {
        let mut p = standing_player(100.0);
        p.vel.y = DEATH_BOUNCE;
        let y0 = p.rect.y;
        for _ in 0..120 {
            step_dead(&mut p);
        }
        assert!(p.rect.y > y0 + 400.0);
        assert_eq!(p.vel.y, MAX_FALL_SPEED);
    }
}
