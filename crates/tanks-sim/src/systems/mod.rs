//! Per-tick systems driven by the round engine.
//!
//! Systems are functions over the roster, the engine host and their own
//! small state. They never change the round state themselves; they report
//! back and the engine decides.

pub mod firestorm;
pub mod snapshot;
pub mod stats;
