//! Tunables for a simulation session, loaded from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_NAV_RADIUS: i32 = 8;
pub const DEFAULT_FOV_RADIUS: i32 = 6;
/// Upper bound for both radii; larger windows would outgrow any level we load.
pub const MAX_RADIUS: i32 = 64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub seed: u64,
    /// Half-size of the square window NPC navigation is computed over.
    pub nav_radius: i32,
    pub fov_radius: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 0, nav_radius: DEFAULT_NAV_RADIUS, fov_radius: DEFAULT_FOV_RADIUS }
    }
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("nav_radius", self.nav_radius), ("fov_radius", self.fov_radius)] {
            if !(0..=MAX_RADIUS).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is outside 0..={MAX_RADIUS}"),
                });
            }
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }
}
