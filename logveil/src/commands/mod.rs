// logveil/src/commands/mod.rs
//! Command implementations for the logveil CLI.

pub mod mask;
