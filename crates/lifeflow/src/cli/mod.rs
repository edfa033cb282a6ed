//! CLI layer: argument parsing, backend selection, and terminal output.
//! Everything below this module is UI-agnostic.

mod commands;
mod render;
mod setup;

pub use commands::run;
