//! Application configuration loading from config.toml.
//!
//! The file is optional. A missing file yields the defaults; a present but unreadable or
//! malformed one is a configuration error. `HOME_GARDEN_CONFIG` overrides the file location and
//! `DATABASE_URL` overrides the database location from the file.
//!
//! ```toml
//! database_url = "sqlite://data/home_garden.sqlite?mode=rwc"
//!
//! [display]
//! show_archived = false
//! first_weekday = "Sun"
//! max_calendar_colors = 3
//!
//! [links]
//! QA = "https://example.com/qa"
//! Contact = "https://example.com/contact"
//! ```

use crate::{
    config::{database, links::Links},
    core::model::DisplaySettings,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Contents of config.toml as written on disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Database URL; `DATABASE_URL` takes precedence
    pub database_url: Option<String>,
    /// Display preferences
    pub display: DisplaySettings,
    /// External links
    pub links: Links,
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub display: DisplaySettings,
    pub links: Links,
}

impl AppConfig {
    /// Applies the environment override and defaults to a parsed file.
    #[must_use]
    pub fn resolve(file: ConfigFile, env_database_url: Option<String>) -> Self {
        let database_url = env_database_url
            .or(file.database_url)
            .unwrap_or_else(|| database::DEFAULT_DATABASE_URL.to_string());
        Self {
            database_url,
            display: file.display,
            links: file.links,
        }
    }

    /// See [`Links::resolve_link`].
    #[must_use]
    pub fn resolve_link(&self, key: &str) -> Option<Url> {
        self.links.resolve_link(key)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::resolve(ConfigFile::default(), None)
    }
}

/// Parses a configuration file.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or is not valid TOML for [`ConfigFile`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ConfigFile> {
    let path = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    parse_config(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file {}: {e}", path.display()),
    })
}

fn parse_config(contents: &str) -> std::result::Result<ConfigFile, toml::de::Error> {
    toml::from_str(contents)
}

/// Loads the configuration from `HOME_GARDEN_CONFIG` (or [`DEFAULT_CONFIG_PATH`]) and the
/// environment.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path =
        std::env::var("HOME_GARDEN_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let file = load_config_or_default(&path)?;
    let config = AppConfig::resolve(file, database::get_database_url());
    info!(
        "Configuration ready (database: {}, {} link(s))",
        config.database_url,
        config.links.keys().len()
    );
    Ok(config)
}

/// Like [`load_config`], but a missing file yields [`ConfigFile::default`].
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<ConfigFile> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        info!("No config file at {}, using defaults", path.display());
        Ok(ConfigFile::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{config::links::QA, core::model::DEFAULT_MAX_COLORS};
    use chrono::Weekday;

    #[test]
    fn test_parse_full_config() {
        let file = parse_config(
            r#"
            database_url = "sqlite://garden.sqlite"

            [display]
            show_archived = true
            first_weekday = "Mon"
            max_calendar_colors = 4

            [links]
            QA = "https://example.com/qa"
            "#,
        )
        .unwrap();

        assert_eq!(file.database_url.as_deref(), Some("sqlite://garden.sqlite"));
        assert!(file.display.show_archived);
        assert_eq!(file.display.first_weekday, Weekday::Mon);
        assert_eq!(file.display.max_calendar_colors, 4);
        assert!(file.links.resolve_link(QA).is_some());
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let file = parse_config("[display]\nshow_archived = true\n").unwrap();
        assert!(file.display.show_archived);
        assert_eq!(file.display.first_weekday, Weekday::Sun);
        assert_eq!(file.display.max_calendar_colors, DEFAULT_MAX_COLORS);
        assert!(file.database_url.is_none());
        assert!(file.links.keys().is_empty());
    }

    #[test]
    fn test_parse_invalid_config() {
        assert!(parse_config("[display]\nshow_archived = \"maybe\"\n").is_err());
    }

    #[test]
    fn test_resolve_database_url_precedence() {
        let file = ConfigFile {
            database_url: Some("sqlite://file.sqlite".to_string()),
            ..ConfigFile::default()
        };

        let from_env = AppConfig::resolve(file.clone(), Some("sqlite://env.sqlite".to_string()));
        assert_eq!(from_env.database_url, "sqlite://env.sqlite");

        let from_file = AppConfig::resolve(file, None);
        assert_eq!(from_file.database_url, "sqlite://file.sqlite");

        assert_eq!(
            AppConfig::default().database_url,
            database::DEFAULT_DATABASE_URL
        );
    }

    #[test]
    fn test_load_app_configuration_without_file() {
        if std::env::var("HOME_GARDEN_CONFIG").is_ok() || Path::new(DEFAULT_CONFIG_PATH).exists() {
            return;
        }
        let config = load_app_configuration().unwrap();
        let expected = database::get_database_url()
            .unwrap_or_else(|| database::DEFAULT_DATABASE_URL.to_string());
        assert_eq!(config.database_url, expected);
        assert_eq!(config.display, DisplaySettings::default());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let file = load_config_or_default("definitely/not/here/config.toml").unwrap();
        assert!(file.database_url.is_none());
        assert!(!file.display.show_archived);
    }

    #[test]
    fn test_load_config_reports_config_error() {
        let err = load_config("definitely/not/here/config.toml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
