use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::game::JudgeWindows;

/// Per-session playback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayConfig {
    /// Lead time in seconds a note is visible before its hit time.
    #[serde(default = "default_preempt")]
    pub preempt_secs: f64,
    /// Pre-roll delay before the audio becomes audible.
    #[serde(default = "default_start_delay")]
    pub start_delay_secs: f64,
    #[serde(default)]
    pub windows: JudgeWindows,
}

fn default_preempt() -> f64 {
    2.0
}

fn default_start_delay() -> f64 {
    3.0
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            preempt_secs: default_preempt(),
            start_delay_secs: default_start_delay(),
            windows: JudgeWindows::default(),
        }
    }
}

impl PlayConfig {
    /// Load configuration from disk, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from_file().unwrap_or_default()
    }

    fn load_from_file() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("com", "taiko-player", "taiko-player") {
            Ok(proj_dirs.config_dir().join("play.json"))
        } else {
            Ok(PathBuf::from(".taiko-player.json"))
        }
    }
}
