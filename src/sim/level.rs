//! Level data and the furniture/hazard primitives levels are built from
//!
//! Layout coordinates are in tiles; the builder converts to world units.
//! Building is deterministic: the same index always yields the same
//! geometry and the same entity ids, which respawn relies on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{
    Axis, Entity, EntityId, EntityKind, FallingSpike, PatrolAi, PlatformPath, SpikePhase,
};
use super::layouts;
use super::rect::Rect;
use crate::consts::*;

/// Tile row the floor surface sits on
pub const GROUND_Y: f32 = 14.0;
/// Tile row floors and pit backdrops extend down to
pub const BOTTOM_TILE_Y: f32 = 50.0;

/// Render hints for authored geometry
pub mod palette {
    pub const WOOD: u32 = 0x8b4513;
    pub const DARK_WOOD: u32 = 0x5d4037;
    pub const FLOOR: u32 = 0xd7ccc8;
    pub const FLOOR_TRIM: u32 = 0x8d6e63;
    pub const PIT: u32 = 0x2c3e50;
    pub const MOVING: u32 = 0x7f8c8d;
    pub const SOFA_RED: u32 = 0xc0392b;
    pub const SOFA_BLUE: u32 = 0x2980b9;
    pub const TV_BLACK: u32 = 0x111111;
    pub const TV_STAND: u32 = 0x34495e;
    pub const TRIM_GREY: u32 = 0x7f8c8d;
    pub const LED_RED: u32 = 0xe74c3c;
    pub const BOUNDARY: u32 = 0x000000;
    pub const BOOK_SPINES: [u32; 5] = [0xe74c3c, 0xf1c40f, 0x2ecc71, 0x3498db, 0x9b59b6];
}

/// A fully built level. Entities are mutated in place during play; the
/// container is only replaced by a level (re)start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub id: u32,
    pub name: String,
    /// World width in units
    pub width: f32,
    /// World height in units (the visible play area)
    pub height: f32,
    pub entities: Vec<Entity>,
    pub spawn_point: Vec2,
    /// Checkpoint marker positions in authoring order (informational)
    pub checkpoints: Vec<Vec2>,
    pub time_limit_secs: Option<u32>,
    next_id: EntityId,
}

impl LevelData {
    /// Allocate an id for an entity spawned during play
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn checkpoint(&self, index: u8) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.checkpoint_index() == Some(index))
    }

    pub fn time_limit_ticks(&self) -> Option<u64> {
        self.time_limit_secs
            .map(|secs| u64::from(secs) * u64::from(SIM_HZ))
    }

    /// Where the robot appears after (re)starting at `checkpoint`
    pub fn respawn_point(&self, checkpoint: u8) -> Vec2 {
        if checkpoint == 0 {
            return self.spawn_point;
        }
        match self.checkpoint(checkpoint) {
            Some(cp) => Vec2::new(cp.rect.x, cp.rect.y - PLAYER_HEIGHT - RESPAWN_HOVER),
            None => self.spawn_point,
        }
    }

    /// Mark checkpoints `1..=index` as revealed
    pub fn reveal_checkpoints_through(&mut self, index: u8) {
        for e in &mut self.entities {
            if let Some(i) = e.checkpoint_index() {
                if i <= index {
                    e.visible = true;
                }
            }
        }
    }
}

/// Which face of a moving platform carries spikes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpikeSide {
    Top,
    Bottom,
}

/// Name, size and timer of an authored layout
#[derive(Debug, Clone, Copy)]
pub struct LayoutInfo {
    pub name: &'static str,
    pub width_tiles: f32,
    pub time_limit_secs: Option<u32>,
}

/// Accumulates entities for one level
#[derive(Debug, Default)]
pub struct LevelBuilder {
    entities: Vec<Entity>,
    checkpoints: Vec<Vec2>,
    next_id: EntityId,
}

#[inline]
fn tiles(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::new(x * TILE_SIZE, y * TILE_SIZE, w * TILE_SIZE, h * TILE_SIZE)
}

impl LevelBuilder {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            checkpoints: Vec::new(),
            next_id: 1,
        }
    }

    fn push(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(build(id));
        id
    }

    // === Primitives ===

    /// Static platform, in tiles
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: u32) -> EntityId {
        self.push(|id| Entity::new(id, tiles(x, y, w, h), EntityKind::Platform).with_color(color))
    }

    pub fn spike(&mut self, x: f32, y: f32) -> EntityId {
        self.push(|id| Entity::new(id, tiles(x, y, 1.0, 0.9), EntityKind::Spike))
    }

    pub fn falling_spike(&mut self, x: f32, y: f32) -> EntityId {
        self.push(|id| {
            Entity::new(
                id,
                tiles(x, y, 1.0, 0.9),
                EntityKind::FallingSpike(FallingSpike {
                    phase: SpikePhase::Dormant,
                    anchored: false,
                }),
            )
        })
    }

    /// Spike that hangs in place forever, optionally riding a platform
    fn anchored_spike(&mut self, rect: Rect, attached_to: Option<EntityId>) -> EntityId {
        self.push(|id| {
            let mut e = Entity::new(
                id,
                rect,
                EntityKind::FallingSpike(FallingSpike {
                    phase: SpikePhase::Dormant,
                    anchored: true,
                }),
            );
            e.attached_to = attached_to;
            e
        })
    }

    pub fn spider(&mut self, x: f32, y: f32, patrol_tiles: f32) -> EntityId {
        let patrol = PatrolAi {
            start_x: x * TILE_SIZE,
            end_x: (x + patrol_tiles) * TILE_SIZE,
        };
        self.push(|id| {
            Entity::new(id, tiles(x, y, 1.0, 0.6), EntityKind::Spider(patrol))
                .with_vel(Vec2::new(SPIDER_SPEED, 0.0))
        })
    }

    pub fn fruit_fly(&mut self, x: f32, y: f32, patrol_tiles: f32) -> EntityId {
        let patrol = PatrolAi {
            start_x: x * TILE_SIZE,
            end_x: (x + patrol_tiles) * TILE_SIZE,
        };
        self.push(|id| {
            Entity::new(
                id,
                tiles(x, y, 0.8, 0.5),
                EntityKind::FruitFly {
                    patrol,
                    origin_y: y * TILE_SIZE,
                },
            )
            .with_vel(Vec2::new(FRUIT_FLY_SPEED, 0.0))
        })
    }

    /// Ceiling lamp of `length` tiles hanging from y = 0
    pub fn lamp(&mut self, x: f32, length: f32) -> EntityId {
        self.push(|id| Entity::new(id, tiles(x, 0.0, 1.0, length), EntityKind::Lamp))
    }

    /// Lamp with a permanent spike under its shade
    pub fn spiked_lamp(&mut self, x: f32, length: f32) {
        self.lamp(x, length);
        self.anchored_spike(tiles(x, length, 1.0, 0.9), None);
    }

    pub fn moving_platform(&mut self, x: f32, y: f32, w: f32, range: f32, axis: Axis) -> EntityId {
        let (start, vel) = match axis {
            Axis::X => (x, Vec2::new(MOVING_PLATFORM_SPEED, 0.0)),
            Axis::Y => (y, Vec2::new(0.0, MOVING_PLATFORM_SPEED)),
        };
        let path = PlatformPath {
            axis,
            min: start * TILE_SIZE,
            max: (start + range) * TILE_SIZE,
        };
        self.push(|id| {
            Entity::new(id, tiles(x, y, w, 1.0), EntityKind::MovingPlatform(path))
                .with_vel(vel)
                .with_color(palette::MOVING)
        })
    }

    /// Moving platform lined with spikes that travel with it
    pub fn spiked_moving_platform(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        range: f32,
        axis: Axis,
        side: SpikeSide,
    ) {
        let platform_id = self.moving_platform(x, y, w, range, axis);
        let platform = tiles(x, y, w, 1.0);
        let spike_h = TILE_SIZE * 0.9;
        for i in 0..w as u32 {
            let sx = platform.x + i as f32 * TILE_SIZE;
            match side {
                SpikeSide::Top => {
                    let rect = Rect::new(sx, platform.y - spike_h, TILE_SIZE, spike_h);
                    self.push(|id| {
                        let mut e = Entity::new(id, rect, EntityKind::Spike);
                        e.attached_to = Some(platform_id);
                        e
                    });
                }
                SpikeSide::Bottom => {
                    let rect = Rect::new(sx, platform.bottom(), TILE_SIZE, spike_h);
                    self.anchored_spike(rect, Some(platform_id));
                }
            }
        }
    }

    /// Checkpoint marker standing on the surface at row `gy`
    pub fn checkpoint(&mut self, index: u8, gx: f32, gy: f32) {
        self.push(|id| {
            let mut e = Entity::new(id, tiles(gx, gy - 1.0, 1.0, 1.0), EntityKind::Checkpoint { index });
            e.visible = false;
            e
        });
        self.checkpoints
            .push(Vec2::new(gx * TILE_SIZE, (gy - 1.0) * TILE_SIZE));
    }

    // === Terrain ===

    pub fn floor(&mut self, start: f32, length: f32) {
        self.rect(start, GROUND_Y, length, 0.4, palette::FLOOR_TRIM);
        self.rect(start, GROUND_Y + 0.4, length, BOTTOM_TILE_Y - GROUND_Y, palette::FLOOR);
    }

    /// Gap in the floor lined with spikes
    pub fn pit(&mut self, start: f32, length: f32) {
        self.rect(start, GROUND_Y + 1.0, length, BOTTOM_TILE_Y - (GROUND_Y + 1.0), palette::PIT);
        for i in 0..length as u32 {
            self.spike(start + i as f32, GROUND_Y + 0.1);
        }
    }

    // === Furniture ===

    /// L-shaped sofa: backrest on the left, open seat to the right
    pub fn sofa(&mut self, x: f32, y: f32, width: f32, color: u32) {
        let seat = 2.0;
        let legs = 1.0;
        let back = 3.0;
        self.rect(x, y - legs, 1.0, legs, palette::DARK_WOOD);
        self.rect(x + width - 1.0, y - legs, 1.0, legs, palette::DARK_WOOD);
        self.rect(x, y - legs - seat, width, seat, color);
        self.rect(x, y - legs - seat - back, 1.0, back, color);
        // armrest bump
        self.rect(x + width - 0.5, y - legs - seat - 0.5, 0.5, 0.5, palette::DARK_WOOD);
    }

    pub fn table(&mut self, x: f32, y: f32, width: f32) {
        let height = 4.0;
        self.rect(x, y - height, width, 1.0, palette::WOOD);
        self.rect(x + 0.2, y - height + 1.0, 0.5, height - 1.0, palette::WOOD);
        self.rect(x + width - 0.7, y - height + 1.0, 0.5, height - 1.0, palette::WOOD);
    }

    pub fn bookshelf(&mut self, x: f32, y: f32, height: f32) {
        self.rect(x, y - height, 2.0, height, palette::DARK_WOOD);
        for i in 0..(height as u32).saturating_sub(1) {
            let color = palette::BOOK_SPINES[i as usize % palette::BOOK_SPINES.len()];
            self.rect(x + 0.2, y - height + i as f32 + 0.2, 1.6, 0.6, color);
        }
    }

    /// Low cabinet with a flatscreen set back so its left ledge is standable
    pub fn tv_stand(&mut self, x: f32, y: f32) {
        self.rect(x, y - 2.0, 4.0, 2.0, palette::TV_STAND);
        self.rect(x + 0.2, y - 1.8, 1.7, 1.6, palette::PIT);
        self.rect(x + 2.1, y - 1.8, 1.7, 1.6, palette::PIT);
        self.rect(x + 1.6, y - 1.2, 0.2, 0.4, palette::TRIM_GREY);
        self.rect(x + 2.2, y - 1.2, 0.2, 0.4, palette::TRIM_GREY);

        self.rect(x + 1.0, y - 5.0, 3.0, 2.8, palette::TV_BLACK);
        self.rect(x + 2.2, y - 2.3, 0.6, 0.3, palette::TV_BLACK);
        self.rect(x + 1.2, y - 4.8, 2.6, 2.4, palette::PIT);
        self.rect(x + 3.6, y - 2.35, 0.1, 0.1, palette::LED_RED);
        self.rect(x + 1.4, y - 2.35, 0.2, 0.1, palette::TRIM_GREY);
        self.rect(x + 1.8, y - 2.35, 0.2, 0.1, palette::TRIM_GREY);
    }

    /// Close the level with side walls and a ceiling
    pub fn finish(mut self, id: u32, info: LayoutInfo) -> LevelData {
        let width = info.width_tiles;
        self.rect(-1.0, 0.0, 1.0, BOTTOM_TILE_Y, palette::BOUNDARY);
        self.rect(width, 0.0, 1.0, BOTTOM_TILE_Y, palette::BOUNDARY);
        self.rect(0.0, -1.0, width, 1.0, palette::PIT);

        LevelData {
            id,
            name: info.name.to_string(),
            width: width * TILE_SIZE,
            height: CANVAS_HEIGHT,
            entities: self.entities,
            spawn_point: Vec2::new(2.0 * TILE_SIZE, (GROUND_Y - 2.0) * TILE_SIZE),
            checkpoints: self.checkpoints,
            time_limit_secs: info.time_limit_secs,
            next_id: self.next_id,
        }
    }
}

/// Build level `level_index` (1-based). Indices outside the authored range
/// fall back to level 1.
pub fn create_level(level_index: u32) -> LevelData {
    let index = if (1..=LEVEL_COUNT).contains(&level_index) {
        level_index
    } else {
        log::warn!("Level {} does not exist, loading level 1", level_index);
        1
    };

    let mut builder = LevelBuilder::new();
    let info = layouts::author(index, &mut builder);
    builder.finish(index, info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityType;

    #[test]
    fn test_every_level_has_six_ordered_checkpoints() {
        for index in 1..=LEVEL_COUNT {
            let level = create_level(index);
            assert_eq!(level.id, index);
            for cp in 1..=CHECKPOINTS_PER_LEVEL {
                let marker = level
                    .checkpoint(cp)
                    .unwrap_or_else(|| panic!("level {index} missing checkpoint {cp}"));
                assert!(!marker.visible);
            }
            assert_eq!(level.checkpoints.len(), CHECKPOINTS_PER_LEVEL as usize);
            assert!(level.width > CANVAS_WIDTH);
        }
    }

    #[test]
    fn test_out_of_range_falls_back_to_level_one() {
        let fallback = create_level(0);
        assert_eq!(fallback.id, 1);
        assert_eq!(fallback, create_level(1));
        assert_eq!(create_level(LEVEL_COUNT + 5).id, 1);
    }

    #[test]
    fn test_factory_is_deterministic() {
        for index in 1..=LEVEL_COUNT {
            assert_eq!(create_level(index), create_level(index));
        }
    }

    #[test]
    fn test_time_limits() {
        assert_eq!(create_level(1).time_limit_ticks(), None);
        assert_eq!(create_level(5).time_limit_ticks(), Some(60 * 60));
        assert_eq!(create_level(9).time_limit_secs, Some(300));
    }

    #[test]
    fn test_respawn_point_hovers_over_checkpoint() {
        let level = create_level(1);
        assert_eq!(level.respawn_point(0), level.spawn_point);
        let cp = level.checkpoint(2).map(|e| e.rect).unwrap_or_default();
        assert_eq!(
            level.respawn_point(2),
            Vec2::new(cp.x, cp.y - PLAYER_HEIGHT - RESPAWN_HOVER)
        );
    }

    #[test]
    fn test_spiked_platform_spikes_are_attached() {
        let mut b = LevelBuilder::new();
        b.spiked_moving_platform(10.0, 5.0, 3.0, 4.0, Axis::Y, SpikeSide::Bottom);
        let level = b.finish(
            1,
            LayoutInfo {
                name: "test",
                width_tiles: 40.0,
                time_limit_secs: None,
            },
        );
        let platform = &level.entities[0];
        assert_eq!(platform.entity_type(), EntityType::MovingPlatform);
        let spikes: Vec<_> = level
            .entities
            .iter()
            .filter(|e| e.attached_to == Some(platform.id))
            .collect();
        assert_eq!(spikes.len(), 3);
        for s in spikes {
            assert_eq!(s.rect.y, platform.rect.bottom());
            assert!(matches!(
                s.kind,
                EntityKind::FallingSpike(FallingSpike { anchored: true, .. })
            ));
        }
    }

    #[test]
    fn test_reveal_checkpoints_through() {
        let mut level = create_level(2);
        level.reveal_checkpoints_through(3);
        for cp in 1..=CHECKPOINTS_PER_LEVEL {
            let visible = level.checkpoint(cp).map(|e| e.visible);
            assert_eq!(visible, Some(cp <= 3));
        }
    }
}
