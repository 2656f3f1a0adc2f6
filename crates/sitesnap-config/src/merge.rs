//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    CmsSettings, Config, ConfigError, ListingSettings, SearchSettings, ServerSettings,
    SiteSettings,
    parse::{
        RawCmsSettings, RawConfig, RawListingSettings, RawSearchSettings, RawServerSettings,
        RawSiteSettings,
    },
    resolve::resolve_fixture_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory holding this config file, used to resolve relative paths.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For every field, the first config that defines it
/// wins. A relative `cms.fixture` resolves against the directory of the file that set it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let mut site = SiteSettings::default();
    let mut cms = CmsSettings::default();
    let mut listing = ListingSettings::default();
    let mut search = SearchSettings::default();
    let mut server = ServerSettings::default();

    // Lowest precedence first so closer configs overwrite.
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(ref v) = raw.site {
            apply_raw_site(&mut site, v);
        }
        if let Some(ref v) = raw.cms {
            apply_raw_cms(&mut cms, v, parsed.dir())?;
        }
        if let Some(ref v) = raw.listing {
            apply_raw_listing(&mut listing, v);
        }
        if let Some(ref v) = raw.search {
            apply_raw_search(&mut search, v);
        }
        if let Some(ref v) = raw.server {
            apply_raw_server(&mut server, v);
        }
    }

    let config_root = configs.first().map(|c| c.dir().to_path_buf());

    Ok(Config {
        site,
        cms,
        listing,
        search,
        server,
        config_root,
    })
}

/// Applies raw site settings to result.
fn apply_raw_site(result: &mut SiteSettings, raw: &RawSiteSettings) {
    if let Some(ref v) = raw.name {
        result.name = v.clone();
    }
    if let Some(ref v) = raw.base_url {
        result.base_url = v.trim_end_matches('/').to_string();
    }
    if let Some(ref v) = raw.description {
        result.description = v.clone();
    }
    if let Some(ref v) = raw.og_image {
        result.og_image = v.clone();
    }
    if let Some(ref v) = raw.image_domains {
        result.image_domains = v.clone();
    }
}

/// Applies raw CMS settings to result, resolving the fixture path against `config_dir`.
fn apply_raw_cms(
    result: &mut CmsSettings,
    raw: &RawCmsSettings,
    config_dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref v) = raw.url {
        result.url = Some(v.trim_end_matches('/').to_string());
    }
    if let Some(ref v) = raw.token {
        result.token = Some(v.clone());
    }
    if let Some(ref v) = raw.fixture {
        result.fixture = Some(resolve_fixture_path(v, config_dir)?);
    }
    if let Some(v) = raw.stale_time_secs {
        result.stale_time_secs = v;
    }
    if let Some(v) = raw.timeout_secs {
        result.timeout_secs = v;
    }
    Ok(())
}

/// Applies raw listing settings to result.
fn apply_raw_listing(result: &mut ListingSettings, raw: &RawListingSettings) {
    if let Some(v) = raw.page_size {
        result.page_size = v;
    }
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.threshold {
        result.threshold = v;
    }
    if let Some(v) = raw.debounce_ms {
        result.debounce_ms = v;
    }
    if let Some(v) = raw.max_edits {
        result.max_edits = v;
    }
    if let Some(v) = raw.limit {
        result.limit = Some(v);
    }
}

/// Applies raw server settings to result.
fn apply_raw_server(result: &mut ServerSettings, raw: &RawServerSettings) {
    if let Some(ref v) = raw.bind {
        result.bind = v.clone();
    }
    if let Some(ref v) = raw.preview_secret {
        result.preview_secret = Some(v.clone());
    }
}
