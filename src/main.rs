//! layercfg: demo service that materializes its configuration and prints it
//!
//! Run with `--help` to see the switches derived from `ServiceConfig`, set
//! e.g. `DATABASE.POOL_SIZE=8` to override from the environment, or pass
//! `--config <PATH>` to pick the snapshot file.

use anyhow::Result;
use clap::crate_version;
use layercfg::{print_config, ConfigLoader, Record, Schema};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const APP_NAME: &str = "layercfg";
const DEFAULT_CONFIG_PATH: &str = "layercfg.json";

#[derive(Debug, Clone)]
struct DatabaseConfig {
    url: String,
    pool_size: i64,
    password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost:5432/app".to_string(),
            pool_size: 4,
            password: String::new(),
        }
    }
}

impl Schema for DatabaseConfig {
    fn schema() -> Record<Self> {
        Record::<Self>::new()
            .leaf("Url", "url", Some("database connection url"), |c| &c.url, |c| &mut c.url)
            .leaf("PoolSize", "pool_size", Some("connection pool size"), |c| &c.pool_size, |c| {
                &mut c.pool_size
            })
            // Secrets come from the file or the environment only.
            .leaf("Password", "password", None, |c| &c.password, |c| &mut c.password)
    }
}

#[derive(Debug, Clone)]
struct ServiceConfig {
    name: String,
    port: i64,
    request_timeout_secs: f64,
    debug: bool,
    database: DatabaseConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "demo".to_string(),
            port: 8080,
            request_timeout_secs: 2.5,
            debug: false,
            database: DatabaseConfig::default(),
        }
    }
}

impl Schema for ServiceConfig {
    fn schema() -> Record<Self> {
        Record::<Self>::new()
            .leaf("Name", "name", Some("service name"), |c| &c.name, |c| &mut c.name)
            .leaf("Port", "port", Some("listen port"), |c| &c.port, |c| &mut c.port)
            .leaf(
                "RequestTimeoutSecs",
                "request_timeout_secs",
                Some("request timeout in seconds"),
                |c| &c.request_timeout_secs,
                |c| &mut c.request_timeout_secs,
            )
            .leaf("Debug", "debug", Some("enable debug endpoints"), |c| &c.debug, |c| &mut c.debug)
            .nested("Database", "database", |c| &c.database, |c| &mut c.database)
    }
}

fn main() -> Result<()> {
    // RUST_LOG in the environment takes precedence; otherwise only warnings and errors.
    let filter = EnvFilter::from_default_env().add_directive(Level::WARN.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let loaded = ConfigLoader::new(APP_NAME, crate_version!(), DEFAULT_CONFIG_PATH)
        .load_with(ServiceConfig::default)?;

    print_config(&mut std::io::stdout().lock(), &*loaded, APP_NAME, crate_version!())?;
    Ok(())
}
