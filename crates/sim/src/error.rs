//! Error types surfaced by the simulation core.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::EntityId;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("entity {entity:?} has no {component} component")]
    MissingComponent { entity: EntityId, component: &'static str },
    #[error("entity {entity:?} already has a pending action")]
    ActionAlreadyPending { entity: EntityId },
    #[error("event sink closed")]
    EventSinkClosed,
    #[error("input source failed: {0}")]
    Input(String),
    #[error("level transition failed: {0}")]
    Level(String),
    #[error("npc brain failed: {0}")]
    Brain(String),
    #[error("unexpected layout glyph {glyph:?} at line {line}, column {column}")]
    Layout { line: usize, column: usize, glyph: char },
    #[error("layout has no player")]
    MissingPlayer,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
