//! CLI module
//!
//! Argument parsing and command routing for the `underbar` binary.

pub mod args;
pub mod router;

pub use args::{Cli, Commands};
pub use router::execute_command;
