//! Tanks application shell.
//!
//! Runs the round engine on its own thread with a headless engine host and
//! UI, and exposes control functions for whatever drives it.

pub mod control;
pub mod game_loop;
pub mod state;

pub use tanks_core as core;
