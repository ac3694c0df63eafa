//! Input Module
//!
//! Platform-agnostic flight input. The host samples its windowing events
//! once per frame into a [`FlightKeys`] snapshot; held commands track key
//! state, edge-triggered commands (gear, reset, fire, drop) latch until the
//! simulation consumes them.

pub mod keyboard;

pub use keyboard::{FlightKeys, KeyCode};
