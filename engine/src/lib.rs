//! Barnstormer Engine Library
//!
//! Simulation core for an arcade flight game: a player aircraft flies over a
//! procedurally populated open world, fires missiles, drops bombs and has to
//! survive collisions with terrain, structures and wandering actors. This
//! library owns the per-frame integration and collision machinery; rendering,
//! camera framing, HUD and explosion playback are host concerns that consume
//! the read-only projections exposed here.
//!
//! # Modules
//!
//! - [`flight`] - Aircraft pose, inertia-based input integration, stall model
//! - [`physics`] - Collision world and the kind-parameterized projectile pool
//! - [`input`] - Platform-agnostic per-frame command snapshot
//! - [`game`] - World population, drift, particle trail and frame orchestration
//!
//! # Example
//!
//! ```ignore
//! use barnstormer_engine::game::{FlightSim, SimConfig};
//! use barnstormer_engine::input::{FlightKeys, KeyCode};
//!
//! let mut sim = FlightSim::new(&SimConfig::default());
//! let mut keys = FlightKeys::new();
//!
//! keys.handle_key(KeyCode::W, true); // throttle up
//! let report = sim.advance(&mut keys, 1.0 / 60.0);
//! assert!(report.crash.is_none());
//! ```

pub mod flight;
pub mod input;
pub mod physics;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used types at crate level for convenience
pub use flight::{FlightBody, FlightStatus, WingSide};
pub use input::{FlightKeys, KeyCode};
pub use physics::{
    CollisionWorld, Hit, ObstacleId, ObstacleKind, ProjectileEvent, ProjectileKind, ProjectilePool,
};
