//! Simulation Configuration
//!
//! Centralized knobs for world population. `Default` reproduces the stock
//! world; a JSON file can override any subset of fields (every struct is
//! `#[serde(default)]`), which the tests and the demo binary use to shrink
//! the world.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level simulation configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// World population knobs.
    pub world: WorldConfig,
}

/// World population counts and extents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of destructible buildings.
    pub building_count: usize,
    /// Number of ice-cream trucks parked along the road grid.
    pub truck_count: usize,
    /// Wandering cows.
    pub cow_count: usize,
    /// Wandering sheep.
    pub sheep_count: usize,
    /// Wandering pigs.
    pub pig_count: usize,
    /// Number of tree clusters.
    pub tree_clusters: usize,
    /// Trees scattered around each cluster center.
    pub trees_per_cluster: usize,
    /// Half-extent of the building spawn square (meters).
    pub building_extent: f32,
    /// Half-extent of the animal spawn square (meters).
    pub animal_extent: f32,
    /// Half-extent of the tree cluster-center square (meters).
    pub tree_cluster_extent: f32,
    /// Half-extent of the per-cluster tree scatter (meters).
    pub tree_scatter: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            building_count: 10,
            truck_count: 5,
            cow_count: 10,
            sheep_count: 15,
            pig_count: 10,
            tree_clusters: 10,
            trees_per_cluster: 50,
            building_extent: 1250.0,
            animal_extent: 750.0,
            tree_cluster_extent: 1500.0,
            tree_scatter: 100.0,
        }
    }
}

impl WorldConfig {
    /// Total number of animals of all species.
    pub fn animal_count(&self) -> usize {
        self.cow_count + self.sheep_count + self.pig_count
    }
}

/// Errors raised while loading or saving a config file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read or written.
    Io(std::io::Error),
    /// The file is not valid config JSON.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "config file io error: {err}"),
            ConfigError::Parse(err) => write!(f, "config file parse error: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl SimConfig {
    /// Load a config from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
