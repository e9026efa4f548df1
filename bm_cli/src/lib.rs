//! Internal modules for the bracket CLI.
//!
//! This library provides subcommand parsing, configuration, rendering and
//! book storage used by the bm_cli binary.

pub mod commands;
pub mod config;
pub mod render;
pub mod store;
