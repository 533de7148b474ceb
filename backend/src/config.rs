//! # Configuration
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! an optional YAML file named by `PESANTREN_CONFIG`, and individual
//! `PESANTREN_*` environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_PATH_ENV: &str = "PESANTREN_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origin: "http://localhost:8080".to_string(),
        }
    }
}

/// Which data set the stores start from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedMode {
    #[default]
    Sample,
    Empty,
}

impl FromStr for SeedMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sample" => Ok(SeedMode::Sample),
            "empty" => Ok(SeedMode::Empty),
            other => Err(anyhow::anyhow!("Unknown seed mode '{}', expected 'sample' or 'empty'", other)),
        }
    }
}

/// Where a future database would live. Loaded and logged only; storage stays in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub schema_path: String,
    pub migrations_path: String,
    /// Name of the environment variable holding the connection URL
    pub url_env: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            schema_path: "database/schema.sql".to_string(),
            migrations_path: "database/migrations".to_string(),
            url_env: "DATABASE_URL".to_string(),
        }
    }
}

impl DatabaseConfig {
    pub fn url(&self) -> Option<String> {
        std::env::var(&self.url_env).ok().filter(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_level: String,
    pub seed: SeedMode,
    pub database: DatabaseConfig,
    /// File the settings were read from, for logging once tracing is up
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Defaults, then the YAML file from `PESANTREN_CONFIG`, then env overrides
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(&path))?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = serde_yaml::from_str(&yaml)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.source = Some(path.to_path_buf());
        Ok(config.with_default_log_level())
    }

    /// `"defaults and environment"` or the path of the YAML file
    pub fn source_description(&self) -> String {
        match &self.source {
            Some(path) => path.display().to_string(),
            None => "defaults and environment".to_string(),
        }
    }

    /// Apply `PESANTREN_*` overrides looked up through `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = lookup("PESANTREN_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PESANTREN_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PESANTREN_PORT is not a valid port: '{}'", port))?;
        }
        if let Some(origin) = lookup("PESANTREN_CORS_ORIGIN") {
            self.server.cors_origin = origin;
        }
        if let Some(seed) = lookup("PESANTREN_SEED") {
            self.seed = seed.parse()?;
        }
        if let Some(level) = lookup("PESANTREN_LOG") {
            self.log_level = level;
        }
        *self = std::mem::take(self).with_default_log_level();
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn with_default_log_level(mut self) -> Self {
        if self.log_level.trim().is_empty() {
            self.log_level = "info".to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup(&[])).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.server.cors_origin, "http://localhost:8080");
        assert_eq!(config.seed, SeedMode::Sample);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.database.url_env, "DATABASE_URL");
        assert_eq!(config.source, None);
        assert_eq!(config.source_description(), "defaults and environment");
    }

    #[test]
    fn test_partial_yaml_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(
            file,
            "server:\n  port: 8088\nseed: empty\ndatabase:\n  schema_path: db/schema.sql\n"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.seed, SeedMode::Empty);
        assert_eq!(config.database.schema_path, "db/schema.sql");
        assert_eq!(config.database.migrations_path, "database/migrations");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.source.as_deref(), Some(file.path()));
        assert_eq!(config.source_description(), file.path().display().to_string());
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup(&[
                ("PESANTREN_HOST", "0.0.0.0"),
                ("PESANTREN_PORT", "9000"),
                ("PESANTREN_SEED", "EMPTY"),
                ("PESANTREN_LOG", "debug"),
            ]))
            .unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.seed, SeedMode::Empty);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_bad_values_are_errors() {
        let mut config = AppConfig::default();
        assert!(config.apply_overrides(lookup(&[("PESANTREN_PORT", "http")])).is_err());
        assert!(config.apply_overrides(lookup(&[("PESANTREN_SEED", "prod")])).is_err());

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "server: [not, a, map]").unwrap();
        assert!(AppConfig::from_file(file.path()).is_err());
        assert!(AppConfig::from_file(Path::new("/definitely/missing.yaml")).is_err());
    }
}
