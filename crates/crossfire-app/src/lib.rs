//! CROSSFIRE application shell.
//!
//! Wires the simulation engine to a fixed-rate game loop thread, a shared
//! snapshot slot for polling, and a scripted pilot for unattended runs.

pub mod autopilot;
pub mod game_loop;
pub mod state;

pub use crossfire_core as core;
