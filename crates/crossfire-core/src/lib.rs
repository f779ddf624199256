//! Core types and definitions for the CROSSFIRE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the street grid, components, controls, commands, state snapshots,
//! events, and constants. It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod controls;
pub mod enums;
pub mod events;
pub mod grid;
pub mod state;
pub mod types;
