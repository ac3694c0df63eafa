//! Flight module
//!
//! Player-facing flight dynamics: the [`FlightBody`] integrates held input
//! into angular motion with inertia, derives bank-to-turn yaw, applies the
//! simplified lift/stall model and reports a per-frame [`FlightStatus`].

pub mod body;

pub use body::{FlightBody, FlightStatus, WingSide};
