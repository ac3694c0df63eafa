//! Physics module
//!
//! Custom physics for the flight simulation, built without an external
//! physics library: the world holds a few hundred obstacles at most, so
//! brute-force scans and hand-rolled integration stay simpler and faster
//! than a general-purpose engine.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//! - Angles in radians, angular velocities in rad/s
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types (Vec3, Quat) re-exported from glam
//! - [`ballistics`] - Kind-parameterized projectile pool and trajectory integration
//! - [`collision`] - Point-vs-world collision classification and obstacle store

pub mod ballistics;
pub mod collision;
pub mod types;

// Re-export commonly used types at the physics module level
pub use ballistics::{BallisticsSpec, Projectile, ProjectileEvent, ProjectileKind, ProjectilePool};
pub use collision::{CollisionWorld, Hit, Obstacle, ObstacleId, ObstacleKind};
pub use types::{Quat, Vec3};
