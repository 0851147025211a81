//! Level intro: a die rolls across the level and throws a face at each
//! checkpoint, revealing it when the face arrives.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::{Camera, Viewport};
use super::level::{GROUND_Y, LevelData};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;

/// A die face in flight toward its checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlyingFace {
    pub pos: Vec2,
    pub target: Vec2,
    /// Checkpoint index (also the pip count drawn)
    pub value: u8,
    pub reached: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntroState {
    pub dice_x: f32,
    pub rotation: f32,
    pub next_checkpoint: u8,
    pub faces: Vec<FlyingFace>,
}

impl IntroState {
    pub fn new(after_checkpoint: u8) -> Self {
        Self {
            dice_x: 0.0,
            rotation: 0.0,
            next_checkpoint: after_checkpoint + 1,
            faces: Vec::new(),
        }
    }

    /// Dice side length in world units
    pub fn dice_size() -> f32 {
        TILE_SIZE * 2.0
    }
}

/// Advance the intro one tick. Returns true once the die has rolled off
/// the end of the level.
pub fn step_intro(
    intro: &mut IntroState,
    level: &mut LevelData,
    camera: &mut Camera,
    viewport: &Viewport,
    audio: &mut dyn AudioSink,
) -> bool {
    intro.dice_x += INTRO_ROLL_SPEED;
    intro.rotation += INTRO_SPIN_PER_TICK;

    if let Some(cp) = level.checkpoint(intro.next_checkpoint) {
        if intro.dice_x > cp.rect.x {
            intro.faces.push(FlyingFace {
                pos: Vec2::new(intro.dice_x, GROUND_Y * TILE_SIZE - IntroState::dice_size() / 2.0),
                target: Vec2::new(cp.rect.x, cp.rect.y),
                value: intro.next_checkpoint,
                reached: false,
            });
            intro.next_checkpoint += 1;
        }
    }

    for face in intro.faces.iter_mut().filter(|f| !f.reached) {
        let delta = face.target - face.pos;
        if delta.length() < INTRO_FACE_ARRIVE_DIST {
            face.reached = true;
            if let Some(cp) = level
                .entities
                .iter_mut()
                .find(|e| e.checkpoint_index() == Some(face.value))
            {
                cp.visible = true;
            }
            audio.play(SoundEffect::Ding);
        } else {
            face.pos += delta * INTRO_FACE_EASE;
        }
    }

    camera.center_on(intro.dice_x, level, viewport);

    intro.dice_x > level.width + INTRO_OVERRUN
}

/// Reveal every checkpoint (intro skipped or finished)
pub fn reveal_all(level: &mut LevelData) {
    level.reveal_checkpoints_through(u8::MAX);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::create_level;

    #[test]
    fn test_intro_reveals_checkpoints_in_order() {
        let mut level = create_level(1);
        let mut intro = IntroState::new(0);
        let mut cam = Camera::default();
        let vp = Viewport::default();
        let mut sounds = Vec::new();

        let mut ticks = 0;
        while !step_intro(&mut intro, &mut level, &mut cam, &vp, &mut sounds) {
            ticks += 1;
            assert!(ticks < 10_000);
        }

        assert_eq!(intro.faces.len(), CHECKPOINTS_PER_LEVEL as usize);
        let values: Vec<u8> = intro.faces.iter().map(|f| f.value).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);
        assert!(intro.faces.iter().all(|f| f.reached));
        assert_eq!(sounds.iter().filter(|s| **s == SoundEffect::Ding).count(), 6);
        for cp in 1..=CHECKPOINTS_PER_LEVEL {
            assert!(level.checkpoint(cp).is_some_and(|e| e.visible));
        }
        assert_eq!(cam.x, level.width - vp.width);
    }

    #[test]
    fn test_intro_length_follows_level_width() {
        let mut level = create_level(1);
        let mut intro = IntroState::new(0);
        let mut cam = Camera::default();
        let vp = Viewport::default();
        let mut ticks = 1;
        while !step_intro(&mut intro, &mut level, &mut cam, &vp, &mut crate::audio::NullAudio) {
            ticks += 1;
        }
        let expected = ((level.width + INTRO_OVERRUN) / INTRO_ROLL_SPEED).floor() as u32 + 1;
        assert_eq!(ticks, expected);
    }

    #[test]
    fn test_reveal_all() {
        let mut level = create_level(3);
        reveal_all(&mut level);
        for cp in 1..=CHECKPOINTS_PER_LEVEL {
            assert!(level.checkpoint(cp).is_some_and(|e| e.visible));
        }
    }
}
