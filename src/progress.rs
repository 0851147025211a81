//! Level progress record
//!
//! A flat map from level index to when it was first started and completed
//! (unix milliseconds). Level N+1 unlocks once level N has been completed.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_COUNT;
use crate::persistence::{self, StoreError};
use crate::sim::state::RunEvent;

/// Timestamps for one level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelProgress {
    pub levels: BTreeMap<u32, LevelRecord>,
}

/// Current wall-clock time in unix milliseconds
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl LevelProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Self {
        let progress: Self = persistence::load_or_default(path);
        log::info!("Loaded progress for {} levels", progress.levels.len());
        progress
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        persistence::save_json(path, self)
    }

    pub fn record(&self, level: u32) -> Option<&LevelRecord> {
        self.levels.get(&level)
    }

    /// Stamp a level start (every start overwrites the previous one)
    pub fn mark_started(&mut self, level: u32, at_ms: u64) {
        self.levels.entry(level).or_default().started_at = Some(at_ms);
    }

    /// Stamp a completion
    pub fn mark_completed(&mut self, level: u32, at_ms: u64) {
        self.levels.entry(level).or_default().completed_at = Some(at_ms);
    }

    pub fn is_completed(&self, level: u32) -> bool {
        self.record(level).is_some_and(|r| r.completed_at.is_some())
    }

    /// Level 1 is always open; N+1 opens once N is complete
    pub fn is_unlocked(&self, level: u32) -> bool {
        match level {
            0 => false,
            1 => true,
            n if n > LEVEL_COUNT => false,
            n => self.is_completed(n - 1),
        }
    }

    /// Highest playable level
    pub fn max_unlocked(&self) -> u32 {
        (1..=LEVEL_COUNT)
            .take_while(|&n| self.is_unlocked(n))
            .last()
            .unwrap_or(1)
    }

    /// Apply a run event. Returns true if the record changed.
    pub fn apply(&mut self, event: &RunEvent, at_ms: u64) -> bool {
        match *event {
            RunEvent::LevelStarted { level } => {
                self.mark_started(level, at_ms);
                true
            }
            RunEvent::LevelComplete { level } => {
                self.mark_completed(level, at_ms);
                log::info!("Level {} recorded complete", level);
                true
            }
            _ => false,
        }
    }
}

/// Format a timestamp relative to `now_ms` for menus
pub fn format_relative(timestamp_ms: u64, now_ms: u64) -> String {
    let mins = now_ms.saturating_sub(timestamp_ms) / 60_000;
    let hours = mins / 60;
    let days = hours / 24;

    if days >= 1 {
        if days == 1 {
            "Yesterday".to_string()
        } else {
            format!("{} days ago", days)
        }
    } else if hours >= 1 {
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if mins >= 1 {
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_chain() {
        let mut p = LevelProgress::new();
        assert!(p.is_unlocked(1));
        assert!(!p.is_unlocked(2));
        assert_eq!(p.max_unlocked(), 1);

        p.mark_started(1, 10);
        assert!(!p.is_unlocked(2));
        p.mark_completed(1, 20);
        assert!(p.is_unlocked(2));
        assert!(!p.is_unlocked(3));
        assert_eq!(p.max_unlocked(), 2);
    }

    #[test]
    fn test_unlock_is_capped() {
        let mut p = LevelProgress::new();
        for n in 1..=LEVEL_COUNT {
            p.mark_completed(n, 1);
        }
        assert_eq!(p.max_unlocked(), LEVEL_COUNT);
        assert!(!p.is_unlocked(LEVEL_COUNT + 1));
        assert!(!p.is_unlocked(0));
    }

    #[test]
    fn test_apply_events() {
        let mut p = LevelProgress::new();
        assert!(p.apply(&RunEvent::LevelStarted { level: 3 }, 100));
        assert!(!p.apply(&RunEvent::PlayerDied { level: 3 }, 150));
        assert!(p.apply(&RunEvent::LevelComplete { level: 3 }, 200));
        assert_eq!(
            p.record(3),
            Some(&LevelRecord {
                started_at: Some(100),
                completed_at: Some(200),
            })
        );
    }

    #[test]
    fn test_json_shape() {
        let mut p = LevelProgress::new();
        p.mark_started(2, 5);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"2":{"started_at":5}}"#);
        let back: LevelProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_format_relative() {
        let now = 10 * 24 * 3_600_000;
        assert_eq!(format_relative(now - 5_000, now), "Just now");
        assert_eq!(format_relative(now - 60_000, now), "1 min ago");
        assert_eq!(format_relative(now - 3 * 3_600_000, now), "3 hours ago");
        assert_eq!(format_relative(now - 24 * 3_600_000, now), "Yesterday");
        assert_eq!(format_relative(now - 4 * 24 * 3_600_000, now), "4 days ago");
    }
}
