//! CLI module for readlog - command-line flags.

pub mod commands;

pub use commands::Cli;
