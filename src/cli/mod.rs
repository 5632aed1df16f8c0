//! Command-line interface for echosift.

mod commands;
pub mod helpers;

pub use commands::{is_verbose, run};
