use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Where the session keeps its three entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// One file per entry under `data_dir`.
    File,
    /// Nothing outlives the process.
    Memory,
}

impl StorageBackend {
    pub fn parse(value: &str) -> Result<StorageBackend> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            other => bail!("VITAE_STORAGE must be 'file' or 'memory', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default, so a bare `vitae` starts in the current directory.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub storage: StorageBackend,
    /// Directory holding the persisted document, theme and locale.
    pub data_dir: PathBuf,
    /// Where `SpoolCapture` drops capture requests.
    pub export_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let data_dir = PathBuf::from(env_or("VITAE_DATA_DIR", ".vitae"));
        let export_dir = std::env::var("VITAE_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("exports"));

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            storage: StorageBackend::parse(&env_or("VITAE_STORAGE", "file"))?,
            data_dir,
            export_dir,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
