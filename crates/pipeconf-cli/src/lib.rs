//! pipeconf command-line tool
//!
//! Thin layer over `pipeconf-sdk`: argument parsing, file access and
//! output formatting.

pub mod cli;
pub mod commands;

pub use cli::{Args, Command};
pub use commands::{run, Outcome};
