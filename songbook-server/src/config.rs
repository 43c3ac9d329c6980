//! Configuration resolution for songbook-server
//!
//! Priority, highest first: command-line flag → environment variable →
//! TOML config file → compiled default. Flags and environment variables
//! are both handled by clap; the TOML file fills whatever they leave unset.

use clap::Parser;
use songbook_common::config::{
    default_database_path, TomlConfig, DEFAULT_BIND_ADDRESS, DEFAULT_LOG_LEVEL, DEFAULT_PORT,
};
use songbook_common::{Error, Result};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Command-line arguments for songbook-server
#[derive(Parser, Debug, Default)]
#[command(name = "songbook-server")]
#[command(about = "Song catalog service with metadata enrichment")]
#[command(version)]
pub struct Args {
    /// Path to TOML config file
    #[arg(short, long, env = "SONGBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "SONGBOOK_PORT")]
    pub port: Option<u16>,

    /// Address to bind to
    #[arg(short, long, env = "SONGBOOK_BIND")]
    pub bind: Option<String>,

    /// SQLite database file
    #[arg(short, long, env = "SONGBOOK_DATABASE")]
    pub database: Option<PathBuf>,

    /// Base URL of the song metadata provider
    #[arg(short, long, env = "SONGBOOK_METADATA_URL")]
    pub metadata_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SONGBOOK_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
    pub metadata_api_url: String,
    pub log_level: String,
}

impl Config {
    /// Merge arguments over the TOML file over compiled defaults
    pub fn resolve(args: Args, toml: TomlConfig) -> Result<Self> {
        let port = args.port.or(toml.port).unwrap_or(DEFAULT_PORT);

        let bind = args
            .bind
            .or(toml.bind_address)
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let ip: IpAddr = bind
            .parse()
            .map_err(|e| Error::Config(format!("Invalid bind address '{}': {}", bind, e)))?;

        let database_path = args
            .database
            .or(toml.database_path)
            .unwrap_or_else(default_database_path);

        let metadata_api_url = args
            .metadata_url
            .or(toml.metadata_api_url)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "Metadata provider URL not configured. Set one of:\n\
                     1. --metadata-url <URL>\n\
                     2. SONGBOOK_METADATA_URL=<URL>\n\
                     3. metadata_api_url = \"<URL>\" in config.toml"
                        .to_string(),
                )
            })?;

        let log_level = args
            .log_level
            .or(toml.logging.level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            bind_addr: SocketAddr::new(ip, port),
            database_path,
            metadata_api_url,
            log_level,
        })
    }

    /// Load the TOML file named by `args` (or the default location) and resolve
    pub fn load(args: Args) -> Result<Self> {
        let toml = match &args.config {
            Some(path) => TomlConfig::load(path)?,
            None => TomlConfig::load_default()?,
        };

        Self::resolve(args, toml)
    }
}
