//! Player preferences
//!
//! Persisted as JSON next to the progress file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::AudioManager;
use crate::persistence::{self, StoreError};
use crate::sim::camera::Viewport;
use crate::sim::state::SessionConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
    pub viewport: Viewport,
    /// Play the dice intro when a level starts
    pub show_intro: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.5,
            muted: false,
            viewport: Viewport::default(),
            show_intro: true,
        }
    }
}

impl Settings {
    /// Load from `path`; missing or unreadable files give the defaults
    pub fn load(path: &Path) -> Self {
        let mut settings: Self = persistence::load_or_default(path);
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Push volume and mute into the audio manager
    pub fn apply_audio(&self, audio: &mut AudioManager) {
        audio.set_master_volume(self.master_volume);
        audio.set_muted(self.muted);
    }

    /// Run options derived from these preferences
    pub fn session(&self, admin_mode: bool) -> SessionConfig {
        SessionConfig {
            admin_mode,
            viewport: self.viewport,
            show_intro: self.show_intro,
        }
    }
}
