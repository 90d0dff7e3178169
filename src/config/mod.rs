//! Configuration loading and persistence
//!
//! Layers compiled defaults, the snapshot file, command-line switches and
//! environment variables (Env > CLI > File > Defaults), then writes the
//! merged result back to the snapshot.

pub mod error;
pub mod loader;
pub mod store;

pub use error::ConfigError;
pub use loader::{read_config, read_config_with_saver, ConfigLoader, LoadReport, LoadedConfig, Saver};
pub use store::FileStore;
