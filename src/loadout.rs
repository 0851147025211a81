//! Pre-run loadout
//!
//! Two dice are rolled before each run: one picks the buildable block, the
//! other the power-up. A Random block is kept as-is here and only resolves
//! to a concrete type when a block is actually built.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::audio::{AudioSink, SoundEffect};
use crate::sim::entity::{BlockType, PowerUpType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub block: BlockType,
    pub power_up: PowerUpType,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            block: BlockType::Square,
            power_up: PowerUpType::DoubleJump,
        }
    }
}

impl Loadout {
    pub fn new(block: BlockType, power_up: PowerUpType) -> Self {
        Self { block, power_up }
    }

    /// Roll both dice uniformly
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, audio: &mut dyn AudioSink) -> Self {
        audio.play(SoundEffect::DiceRoll);
        let block = BlockType::ALL[rng.random_range(0..BlockType::ALL.len())];
        let power_up = PowerUpType::ALL[rng.random_range(0..PowerUpType::ALL.len())];
        log::info!("Rolled {} block, {}", block.as_str(), power_up.as_str());
        Self { block, power_up }
    }
}
