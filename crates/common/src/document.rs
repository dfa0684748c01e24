use crate::model::Roadmap;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::io::Read;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DocumentError {
    /// Malformed JSON, an I/O failure while reading it, or a shape that is
    /// not a roadmap
    #[error("invalid roadmap document: {0}")]
    Json(#[from] serde_json::Error),
}

/// How difficult a generated roadmap is meant to be.
///
/// Matching is case-insensitive; unknown levels are kept verbatim.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Other(String),
}

impl From<String> for Difficulty {
    fn from(level: String) -> Self {
        match level.trim().to_lowercase().as_str() {
            "beginner" => Difficulty::Beginner,
            "intermediate" => Difficulty::Intermediate,
            "advanced" => Difficulty::Advanced,
            _ => Difficulty::Other(level),
        }
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.to_string()
    }
}

/// A roadmap saved to a user's library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRoadmap {
    pub topic: String,
    pub difficulty: Difficulty,
    pub data: Roadmap,
}

/// The shapes a roadmap arrives in.
///
/// Generators answer either with the bare graph or with the graph under a
/// `data` key, and saved roadmaps carry their topic and difficulty next to
/// it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoadmapDocument {
    Saved(SavedRoadmap),
    Wrapped { data: Roadmap },
    Bare(Roadmap),
}

impl RoadmapDocument {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, DocumentError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Topic and difficulty, when the document is a saved roadmap
    pub fn meta(&self) -> Option<(&str, &Difficulty)> {
        match self {
            RoadmapDocument::Saved(saved) => Some((&saved.topic, &saved.difficulty)),
            _ => None,
        }
    }

    pub fn into_roadmap(self) -> Roadmap {
        let roadmap = match self {
            RoadmapDocument::Saved(saved) => saved.data,
            RoadmapDocument::Wrapped { data } => data,
            RoadmapDocument::Bare(roadmap) => roadmap,
        };
        debug!(
            "Roadmap with {} nodes and {} edges",
            roadmap.nodes.len(),
            roadmap.edges.len()
        );
        roadmap
    }
}
