use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::savings::DEFAULT_SEGMENT_COUNT;

const CONFIG_FILE_NAME: &str = "config.json";
pub const MAX_SEGMENT_COUNT: usize = 100;

/// When edits to the goal field reach the store.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalPersistence {
    /// Only on an explicit commit (leaving the field, submitting, quitting).
    #[default]
    OnCommit,
    /// On every change, keystroke by keystroke.
    OnEdit,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub segment_count: usize,
    pub goal_persistence: GoalPersistence,
    /// Show a status line when an add or withdraw is refused.
    pub show_rejections: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            segment_count: DEFAULT_SEGMENT_COUNT,
            goal_persistence: GoalPersistence::default(),
            show_rejections: false,
        }
    }
}

impl Config {
    /// Reads `config.json` from `data_dir`, falling back to defaults when the
    /// file does not exist.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = Self::path(data_dir);
        let config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE_NAME)
    }

    pub fn validate(&self) -> Result<()> {
        if self.segment_count == 0 {
            bail!("segment_count must be at least 1");
        }
        if self.segment_count > MAX_SEGMENT_COUNT {
            bail!(
                "segment_count must be at most {}, got {}",
                MAX_SEGMENT_COUNT,
                self.segment_count
            );
        }
        Ok(())
    }
}
