//! Camera follow, centring and view-mode panning

use serde::{Deserialize, Serialize};

use super::level::LevelData;
use super::player::PlayerState;
use crate::consts::*;

/// Size of the visible area in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

/// Top-left corner of the view
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

// max(0, min(v, limit)): levels narrower than the view pin to 0
#[inline]
fn clamp_to(value: f32, world: f32, view: f32) -> f32 {
    value.min(world - view).max(0.0)
}

impl Camera {
    /// Centre horizontally on `x` immediately
    pub fn center_on(&mut self, x: f32, level: &LevelData, viewport: &Viewport) {
        self.x = clamp_to(x - viewport.width / 2.0, level.width, viewport.width);
    }

    /// Ease toward the player
    pub fn follow(&mut self, player: &PlayerState, level: &LevelData, viewport: &Viewport) {
        let target_x = clamp_to(
            player.rect.x - viewport.width / 2.0,
            level.width,
            viewport.width,
        );

        // track the standing head height so ducking doesn't jerk the view
        let mut track_y = player.rect.y;
        if player.ducking {
            track_y -= PLAYER_HEIGHT - DUCK_HEIGHT;
        }
        let target_y = clamp_to(
            track_y - viewport.height / 1.5,
            level.height,
            viewport.height,
        );

        self.x += (target_x - self.x) * CAMERA_EASE;
        self.y += (target_y - self.y) * CAMERA_EASE;
    }

    /// Free pan in view mode; `direction` is -1, 0 or 1
    pub fn pan(&mut self, direction: f32, level: &LevelData, viewport: &Viewport) {
        self.x = clamp_to(
            self.x + direction * VIEW_PAN_SPEED,
            level.width,
            viewport.width,
        );
    }
}
