//! Parsing and validation of `vhdlgen.toml` emission settings.
//!
//! This crate reads the optional project configuration file and produces a
//! strongly-typed [`EmitConfig`] controlling indentation and the library
//! preamble printed ahead of every design unit.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
