//! EEG session alignment CLI library.
//!
//! This crate provides the command-line front end over `eegs-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
