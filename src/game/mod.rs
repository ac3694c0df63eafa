//! Game Module
//!
//! Game-specific systems built on top of the engine: world population and
//! churn, the exhaust particle trail, configuration, and the per-frame
//! simulation orchestrator.

pub mod config;
pub mod particles;
pub mod session;
pub mod world;

pub use config::{ConfigError, SimConfig, WorldConfig};
pub use particles::{MAX_TRAIL_PARTICLES, TrailEmitter, TrailParticle};
pub use session::{FlightSim, FrameReport, MAX_FRAME_DT};
pub use world::{AnimalSpecies, GameWorld};
