//! Simulation engine for CROSSFIRE.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the frontend.

pub mod config;
pub mod engine;
pub mod schedule;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use config::{ConfigError, SimConfig};
pub use crossfire_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
