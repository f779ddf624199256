//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for read-only).
//! Session counters live in `SessionState`, passed in by the engine in a fixed order.

pub mod alien_ai;
pub mod cleanup;
pub mod collision;
pub mod fire_control;
pub mod movement;
pub mod progression;
pub mod scheduled;
pub mod snapshot;
pub mod spawner;
