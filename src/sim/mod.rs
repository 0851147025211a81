//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, durations counted on the logical tick clock
//! - Seeded RNG only
//! - Stable iteration order (entity list order)
//! - No rendering or platform dependencies; sounds go out through `AudioSink`

pub mod actions;
pub mod camera;
pub mod entity;
pub mod hazards;
pub mod intro;
mod layouts;
pub mod level;
pub mod physics;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;
pub mod world;

pub use actions::{BuildOutcome, BuildPreview, Placement, PreviewValidity, build_preview};
pub use camera::{Camera, Viewport};
pub use entity::{BlockType, Entity, EntityId, EntityKind, EntityType, PowerUpType};
pub use hazards::{HazardOutcome, check_hazards};
pub use intro::{FlyingFace, IntroState};
pub use level::{LevelData, create_level};
pub use physics::{HeldInput, PhysicsOutcome, step_player};
pub use player::{Facing, PlayerPose, PlayerState};
pub use rect::Rect;
pub use state::{GameState, RunEvent, RunPhase, SessionConfig};
pub use tick::{TickInput, skip_intro, tick};
pub use world::{WorldOutcome, update_entities};
