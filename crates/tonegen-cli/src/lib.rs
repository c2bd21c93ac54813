//! tonegen CLI library.
//!
//! This crate provides the batch orchestrator that drives parsing, synthesis,
//! the WAV intermediate, and format conversion for a list of frequencies,
//! plus the command implementations behind the `tonegen` binary.

pub mod batch;
pub mod commands;
pub mod input;
