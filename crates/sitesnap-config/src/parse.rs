//! Configuration file parsing.
//!
//! Parses individual `.sitesnap.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// `[site]` section.
    pub site: Option<RawSiteSettings>,
    /// `[cms]` section.
    pub cms: Option<RawCmsSettings>,
    /// `[listing]` section.
    pub listing: Option<RawListingSettings>,
    /// `[search]` section.
    pub search: Option<RawSearchSettings>,
    /// `[server]` section.
    pub server: Option<RawServerSettings>,
}

/// Raw site settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSiteSettings {
    /// Site name.
    pub name: Option<String>,
    /// Absolute base URL.
    pub base_url: Option<String>,
    /// Default meta description.
    pub description: Option<String>,
    /// Open Graph image URL.
    pub og_image: Option<String>,
    /// Allowed screenshot hosts. Accepts a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub image_domains: Option<Vec<String>>,
}

/// Raw CMS settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCmsSettings {
    /// CMS base URL.
    pub url: Option<String>,
    /// Bearer token.
    pub token: Option<String>,
    /// Fixture file path, relative to the config file that sets it.
    pub fixture: Option<String>,
    /// Freshness window for cached responses, in seconds.
    pub stale_time_secs: Option<u64>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Raw listing settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawListingSettings {
    /// Items per page.
    pub page_size: Option<usize>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Match threshold.
    pub threshold: Option<f64>,
    /// Debounce window in milliseconds.
    pub debounce_ms: Option<u64>,
    /// Maximum edit distance per term.
    pub max_edits: Option<u8>,
    /// Maximum matches returned.
    pub limit: Option<usize>,
}

/// Raw server settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawServerSettings {
    /// Listen address.
    pub bind: Option<String>,
    /// Preview token.
    pub preview_secret: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
