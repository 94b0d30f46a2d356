//! Subcommand implementations.

pub mod assemble;
pub mod classify;
pub mod config_cmd;
