//! Core types and definitions for the TANKS round core.
//!
//! This crate defines the vocabulary shared across all other crates:
//! commands, events, snapshot views, configuration, errors, constants,
//! and the traits through which the game engine and UI are reached.
//! It has no dependency on any engine or runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod host;
pub mod state;
pub mod types;
