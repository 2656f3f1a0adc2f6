//! Configuration system for sitesnap.
//!
//! sitesnap uses TOML configuration files named `.sitesnap.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.sitesnap.toml` files found, then loading `~/.sitesnap.toml` as the global config with lowest
//! precedence. `SITESNAP_CONFIG` replaces that walk with one named file. A handful of
//! `SITESNAP_*` environment variables are applied last, so deployments can inject secrets
//! without writing them to disk.

#![warn(missing_docs)]

mod discovery;
mod env;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    env as std_env,
    path::{Path, PathBuf},
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use env::{
    ENV_BIND, ENV_CMS_TOKEN, ENV_CMS_URL, ENV_CONFIG, ENV_FIXTURE, ENV_PREVIEW_SECRET,
    apply_env_overrides, pinned_config_path,
};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawCmsSettings, RawConfig, RawListingSettings, RawSearchSettings, RawServerSettings,
    RawSiteSettings, parse_config_file, parse_config_str,
};
pub use resolve::resolve_fixture_path;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for sitesnap.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.sitesnap.toml` files according to precedence rules and applying environment overrides.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Public site identity and metadata.
    pub site: SiteSettings,
    /// Where company data comes from.
    pub cms: CmsSettings,
    /// Listing page settings.
    pub listing: ListingSettings,
    /// Fuzzy search settings.
    pub search: SearchSettings,
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

/// The files [`Config::load`] reads for `cwd`, highest precedence first.
///
/// `SITESNAP_CONFIG` pins a single file in place of discovery.
pub fn config_files(cwd: &Path) -> Vec<PathBuf> {
    let pinned = pinned_config_path(|key| std_env::var(key).ok());
    discover_config_files(cwd, pinned.as_deref())
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sitesnap.toml` files.
    ///
    /// Files come from [`config_files`]; closest to `cwd` wins the merge. `SITESNAP_*`
    /// environment overrides apply last.
    ///
    /// Returns the defaults (plus environment overrides) if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = config_files(cwd);
        let mut config = Self::load_from_files(&config_files)?;
        apply_env_overrides(&mut config, |key| std_env::var(key).ok())?;
        Ok(config)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    /// Environment overrides are not applied.
    ///
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - No data source configured (neither a CMS URL nor a fixture file)
    /// - A CMS URL that is not http(s)
    /// - A fixture path that does not exist
    /// - A zero listing page size
    /// - A search threshold outside `0.0..=1.0`
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// Secrets (the CMS token and the preview secret) are never written out.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            site: &self.site,
            cms: &self.cms,
            listing: &self.listing,
            search: &self.search,
            server: &self.server,
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Public identity of the site, used for canonical URLs, meta tags and the sitemap.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Site name shown in titles and the header.
    pub name: String,
    /// Absolute base URL without trailing slash, e.g. `https://sitesnap.design`.
    pub base_url: String,
    /// Default meta description.
    pub description: String,
    /// Open Graph image URL.
    pub og_image: String,
    /// Hosts allowed to serve screenshots. Empty allows every host.
    pub image_domains: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: String::from("sitesnap.design"),
            base_url: String::new(),
            description: String::from(
                "Find your favorite sites in one place, then learn from the greats.",
            ),
            og_image: String::new(),
            image_domains: Vec::new(),
        }
    }
}

/// Where company records are read from.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CmsSettings {
    /// Base URL of the CMS, e.g. `https://cms.example.com`. `/api/companies` is appended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Bearer token sent with CMS requests.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// JSON fixture in the CMS response format, used instead of the CMS when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture: Option<PathBuf>,
    /// Seconds a cached response stays fresh.
    pub stale_time_secs: u64,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CmsSettings {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            fixture: None,
            stale_time_secs: 60 * 60 * 24,
            timeout_secs: 10,
        }
    }
}

/// Settings for paginated listings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingSettings {
    /// Items per listing page.
    pub page_size: usize,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self { page_size: 60 }
    }
}

/// Fuzzy search settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Match threshold in `0.0..=1.0`; lower is stricter.
    pub threshold: f64,
    /// Milliseconds of input silence before a live search runs.
    pub debounce_ms: u64,
    /// Maximum edit distance considered for a fuzzy term match.
    pub max_edits: u8,
    /// Maximum matches returned, unlimited when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            debounce_ms: 500,
            max_edits: 2,
            limit: None,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind: String,
    /// Token required by the preview endpoint. Preview mode is disabled when unset.
    #[serde(skip_serializing)]
    pub preview_secret: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: String::from("127.0.0.1:3000"),
            preview_secret: None,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Site settings.
    site: &'a SiteSettings,
    /// CMS settings.
    cms: &'a CmsSettings,
    /// Listing settings.
    listing: &'a ListingSettings,
    /// Search settings.
    search: &'a SearchSettings,
    /// Server settings.
    server: &'a ServerSettings,
}
