use crate::palette::Palette;
use roadweave_graph_layout::{LayeredLayout, RankDir, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Settings of a roadmap layout. Missing fields take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    /// Gap between two consecutive ranks
    pub rank_sep: f32,
    /// Gap between two nodes of the same rank
    pub node_sep: f32,
    pub rank_dir: RankDir,
    pub max_crossing_iterations: usize,
    pub max_position_iterations: usize,
    pub palette: Palette,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let layered = LayeredLayout::default();
        Self {
            node_width: 240.0,
            node_height: 60.0,
            rank_sep: 120.0,
            node_sep: 60.0,
            rank_dir: RankDir::LeftRight,
            max_crossing_iterations: layered.max_crossing_iterations,
            max_position_iterations: layered.max_position_iterations,
            palette: Palette::default(),
        }
    }
}

impl LayoutConfig {
    pub fn from_ron(ron: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(ron)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading layout config from {}", path.display());

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn node_size(&self) -> Vec2 {
        Vec2::new(self.node_width, self.node_height)
    }

    /// Layered layout engine for these settings
    pub fn layered(&self) -> LayeredLayout {
        LayeredLayout {
            rank_sep: self.rank_sep,
            node_sep: self.node_sep,
            rank_dir: self.rank_dir,
            break_cycles: true,
            max_crossing_iterations: self.max_crossing_iterations,
            max_position_iterations: self.max_position_iterations,
        }
    }
}
