use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::core::DEFAULT_PAGE_SIZE;
use crate::services::{ListingError, ListingSource};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Embedded,
    File,
    Remote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_source")]
    pub source: SourceKind,
    /// Used when `source = "file"`
    pub path: Option<PathBuf>,
    /// Used when `source = "remote"`
    pub url: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            source: default_source(),
            path: None,
            url: None,
            page_size: default_page_size(),
            cache_ttl_secs: default_cache_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_source() -> SourceKind { SourceKind::Embedded }
fn default_page_size() -> usize { DEFAULT_PAGE_SIZE }
fn default_cache_ttl_secs() -> u64 { 300 }
fn default_request_timeout_secs() -> u64 { 10 }

impl CatalogSettings {
    /// Build the configured [`ListingSource`]
    pub fn listing_source(&self) -> Result<ListingSource, ConfigError> {
        match self.source {
            SourceKind::Embedded => Ok(ListingSource::Embedded),
            SourceKind::File => self
                .path
                .clone()
                .map(ListingSource::File)
                .ok_or_else(|| ConfigError::Message("catalog.path is required when catalog.source = \"file\"".to_string())),
            SourceKind::Remote => {
                let url = self.url.clone().ok_or_else(|| {
                    ConfigError::Message("catalog.url is required when catalog.source = \"remote\"".to_string())
                })?;
                ListingSource::remote(url, Duration::from_secs(self.request_timeout_secs))
                    .map_err(|e: ListingError| ConfigError::Message(e.to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Json,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_storage_path(),
        }
    }
}

fn default_backend() -> StorageBackend { StorageBackend::Json }
fn default_storage_path() -> PathBuf { PathBuf::from("data/wishlist.json") }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CAR_FINDER__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. CAR_FINDER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CAR_FINDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings)?;
        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CAR_FINDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Short-form environment overrides
///
/// `LISTINGS_URL` switches the catalog to the remote source, `WISHLIST_PATH`
/// moves the JSON storage file.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("LISTINGS_URL") {
        builder = builder
            .set_override("catalog.source", "remote")?
            .set_override("catalog.url", url)?;
    }
    if let Ok(path) = env::var("WISHLIST_PATH") {
        builder = builder.set_override("storage.path", path)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.catalog.source, SourceKind::Embedded);
        assert_eq!(settings.catalog.page_size, 10);
        assert_eq!(settings.storage.backend, StorageBackend::Json);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "pretty");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9090

[catalog]
source = "file"
path = "fixtures/cars.json"
page_size = 20

[storage]
backend = "memory"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.catalog.page_size, 20);
        assert_eq!(settings.storage.backend, StorageBackend::Memory);
        assert!(matches!(
            settings.catalog.listing_source().unwrap(),
            ListingSource::File(p) if p == PathBuf::from("fixtures/cars.json")
        ));
    }

    #[test]
    fn test_file_source_requires_path() {
        let catalog = CatalogSettings {
            source: SourceKind::File,
            ..Default::default()
        };
        assert!(catalog.listing_source().is_err());
    }
}
