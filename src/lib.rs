//! layercfg: layered configuration for command-line services
//!
//! A configuration type describes its fields once through [`Schema`]; the
//! [`ConfigLoader`] then fills an instance from compiled defaults, a JSON
//! snapshot, command-line switches and environment variables (highest wins:
//! env > flag > file > default), and writes the merged result back.

pub mod cli;
pub mod config;
pub mod env;
pub mod render;
pub mod schema;
pub mod utils;

#[cfg(test)]
mod fixtures;

pub use config::{
    read_config, read_config_with_saver, ConfigError, ConfigLoader, FileStore, LoadReport,
    LoadedConfig, Saver,
};
pub use env::{EnvSource, ProcessEnv};
pub use render::print_config;
pub use schema::{Kind, Primitive, Record, Schema, Value};
