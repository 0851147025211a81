//! Checkpoint and hazard contact scan

use super::level::LevelData;
use super::player::PlayerState;
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::CHECKPOINTS_PER_LEVEL;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HazardOutcome {
    /// Newly reached checkpoint index
    pub checkpoint: Option<u8>,
    /// The final checkpoint was reached
    pub level_complete: bool,
    pub died: bool,
}

/// Scan every entity against the player. Does nothing for a dead player.
///
/// Checkpoints advance monotonically and are always scanned in full, so a
/// final checkpoint is seen even when a hazard earlier in the list hits.
/// Only the first hazard contact counts.
pub fn check_hazards(
    player: &mut PlayerState,
    level: &mut LevelData,
    audio: &mut dyn AudioSink,
) -> HazardOutcome {
    let mut outcome = HazardOutcome::default();
    if player.is_dead() {
        return outcome;
    }

    for e in level.entities.iter_mut() {
        if let Some(index) = e.checkpoint_index() {
            if index > player.last_checkpoint && player.rect.intersects(&e.rect) {
                player.last_checkpoint = index;
                e.visible = true;
                outcome.checkpoint = Some(index);
                audio.play(SoundEffect::Ding);
                log::info!("Checkpoint {} reached", index);
                if index == CHECKPOINTS_PER_LEVEL {
                    outcome.level_complete = true;
                }
            }
        } else if !outcome.died && e.is_hazard() && player.rect.intersects(&e.hazard_hitbox()) {
            outcome.died = true;
        }
    }
    outcome
}
