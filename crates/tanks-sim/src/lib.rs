//! Round core for TANKS.
//!
//! Owns the round state machine, the tank roster, the Firestorm scheduler
//! and the UI binding table. The game engine and UI toolkit are reached
//! through the `EngineHost` and `UiHost` traits; headless versions of both
//! live in [`headless`].

pub mod engine;
pub mod headless;
pub mod roster;
pub mod systems;
pub mod ui;

pub use engine::RoundEngine;
pub use tanks_core as core;
