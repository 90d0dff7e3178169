//! Layered configuration loading.
//!
//! # Precedence (lowest to highest)
//!
//! 1. Compiled defaults from the caller's factory
//! 2. Snapshot file (`--config <PATH>`, default path from the caller)
//! 3. Command-line switches actually given
//! 4. Environment variables
//!
//! The merged result is written back to the snapshot after every layer has
//! been applied, so the file always matches the effective configuration.
//!
//! # Example
//!
//! ```rust,ignore
//! let loaded = ConfigLoader::new("my-service", "1.0.0", "my-service.json")
//!     .load_with(ServiceConfig::default)?;
//! println!("port = {}", loaded.port);
//! ```

use std::ffi::OsString;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use super::error::ConfigError;
use super::store::FileStore;
use crate::cli::{self, FlagRegistry};
use crate::env::{EnvBinder, EnvSource, ProcessEnv};
use crate::schema::{Record, Schema};

/// Builder for one configuration load.
pub struct ConfigLoader {
    app_name: String,
    version: String,
    default_path: PathBuf,
    args: Option<Vec<OsString>>,
    env: Box<dyn EnvSource>,
    persist: bool,
}

impl ConfigLoader {
    /// `app_name` and `version` feed the help banner; `default_path` is the
    /// snapshot used when `--config` is not given.
    pub fn new(
        app_name: impl Into<String>,
        version: impl Into<String>,
        default_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            version: version.into(),
            default_path: default_path.into(),
            args: None,
            env: Box::new(ProcessEnv),
            persist: true,
        }
    }

    /// Parse these arguments (program name first) instead of the process arguments.
    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Read variables from `source` instead of the process environment.
    pub fn env_source(mut self, source: impl EnvSource + 'static) -> Self {
        self.env = Box::new(source);
        self
    }

    /// Write the merged result back to the snapshot (default: true).
    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Load `T`, starting from its `Default` value.
    pub fn load<T: Schema + Default>(self) -> Result<LoadedConfig<T>, ConfigError> {
        self.load_with(T::default)
    }

    /// Load like [`ConfigLoader::try_load_with`], but print help, version or
    /// usage errors and exit the process the way a command-line parser does.
    pub fn load_with<T, F>(self, factory: F) -> Result<LoadedConfig<T>, ConfigError>
    where
        T: Schema,
        F: FnOnce() -> T,
    {
        match self.try_load_with(factory) {
            Err(ConfigError::Cli(err)) => err.exit(),
            other => other,
        }
    }

    /// Run every layer over the value produced by `factory`.
    ///
    /// Fails only on an invalid schema or a command-line error (including
    /// `--help` and `--version`). Problems with the file, single
    /// environment values, or the final save are collected in the report.
    pub fn try_load_with<T, F>(self, factory: F) -> Result<LoadedConfig<T>, ConfigError>
    where
        T: Schema,
        F: FnOnce() -> T,
    {
        let record = T::schema();
        record.validate()?;

        let mut config = factory();
        let mut report = LoadReport::default();

        let mut registry = FlagRegistry::new();
        let command = registry.register(
            &record,
            &config,
            cli::base_command(&self.app_name, &self.version, &self.default_path),
        );
        report.issues.extend(
            registry
                .undescribed()
                .iter()
                .map(|path| ConfigError::missing_description(path.to_string())),
        );

        let matches = match self.args {
            Some(args) => command.try_get_matches_from(args)?,
            None => command.try_get_matches()?,
        };

        let store = FileStore::new(cli::config_path(&matches, &self.default_path));
        match store.load(&record, &mut config) {
            Ok(issues) => {
                report.file_loaded = true;
                report.issues.extend(issues);
            }
            Err(err) => {
                error!(path = %store.path().display(), error = %err, "Config file skipped");
                report.issues.push(err);
            }
        }

        let applied = registry.apply_parsed(&record, &matches, &mut config);
        debug!(applied, "Command-line layer applied");

        let env_issues = EnvBinder::new(&*self.env).overlay(&record, &mut config);
        report.issues.extend(env_issues);

        let saver = Saver { store, record };
        if self.persist {
            if let Err(err) = saver.save(&config) {
                error!(path = %saver.path().display(), error = %err, "Save config");
                report.save_error = Some(err);
            }
        }

        info!(
            app = %self.app_name,
            path = %saver.path().display(),
            issues = report.issues.len(),
            "Configuration loaded"
        );
        Ok(LoadedConfig { config, saver, report })
    }
}

/// Writes a configuration back to the snapshot it was loaded from.
pub struct Saver<T> {
    store: FileStore,
    record: Record<T>,
}

impl<T> Saver<T> {
    pub fn save(&self, config: &T) -> Result<(), ConfigError> {
        self.store.save(&self.record, config)
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

impl<T> Clone for Saver<T> {
    fn clone(&self) -> Self {
        Self { store: self.store.clone(), record: self.record.clone() }
    }
}

/// Non-fatal problems met while loading.
#[derive(Debug, Default)]
pub struct LoadReport {
    issues: Vec<ConfigError>,
    save_error: Option<ConfigError>,
    file_loaded: bool,
}

impl LoadReport {
    /// Skipped sources and fields, in the order they were met.
    pub fn issues(&self) -> &[ConfigError] {
        &self.issues
    }

    /// Why the snapshot could not be written, if it could not.
    pub fn save_error(&self) -> Option<&ConfigError> {
        self.save_error.as_ref()
    }

    /// Whether the snapshot file was read and parsed.
    pub fn file_loaded(&self) -> bool {
        self.file_loaded
    }
}

/// A loaded configuration together with its saver and load report.
///
/// Dereferences to the configuration itself.
pub struct LoadedConfig<T> {
    config: T,
    saver: Saver<T>,
    report: LoadReport,
}

impl<T> LoadedConfig<T> {
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Persist the current value, e.g. after changing it at runtime.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.saver.save(&self.config)
    }

    pub fn saver(&self) -> &Saver<T> {
        &self.saver
    }

    pub fn into_inner(self) -> T {
        self.config
    }

    pub fn into_parts(self) -> (T, Saver<T>) {
        (self.config, self.saver)
    }
}

impl<T> Deref for LoadedConfig<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.config
    }
}

impl<T> DerefMut for LoadedConfig<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.config
    }
}

/// Load a configuration from the process arguments and environment.
///
/// Help and usage errors exit the process.
pub fn read_config<T, F>(
    factory: F,
    app_name: &str,
    version: &str,
    default_path: impl Into<PathBuf>,
) -> Result<T, ConfigError>
where
    T: Schema,
    F: FnOnce() -> T,
{
    read_config_with_saver(factory, app_name, version, default_path).map(|(config, _)| config)
}

/// Like [`read_config`], also returning a saver for later re-persistence.
pub fn read_config_with_saver<T, F>(
    factory: F,
    app_name: &str,
    version: &str,
    default_path: impl Into<PathBuf>,
) -> Result<(T, Saver<T>), ConfigError>
where
    T: Schema,
    F: FnOnce() -> T,
{
    let loaded = ConfigLoader::new(app_name, version, default_path).load_with(factory)?;
    Ok(loaded.into_parts())
}
