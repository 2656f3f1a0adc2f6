//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// Neither a CMS URL nor a fixture file is configured; every page will be empty.
    NoDataSource,
    /// The CMS URL is not an http(s) URL.
    InvalidCmsUrl {
        /// The configured URL.
        url: String,
    },
    /// The fixture file does not exist.
    FixtureMissing {
        /// The configured path.
        path: String,
    },
    /// Listing page size is zero.
    ZeroPageSize,
    /// Search threshold lies outside `0.0..=1.0`.
    ThresholdOutOfRange {
        /// The configured threshold.
        value: f64,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDataSource => {
                write!(f, "no data source configured: set cms.url or cms.fixture")
            }
            Self::InvalidCmsUrl { url } => write!(f, "cms url is not an http(s) url: {url}"),
            Self::FixtureMissing { path } => write!(f, "fixture file does not exist: {path}"),
            Self::ZeroPageSize => write!(f, "listing page_size is 0; listings will be empty"),
            Self::ThresholdOutOfRange { value } => {
                write!(f, "search threshold {value} is outside 0.0..=1.0")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    match (&config.cms.url, &config.cms.fixture) {
        (None, None) => warnings.push(ConfigWarning::NoDataSource),
        (_, Some(fixture)) if !fixture.is_file() => {
            warnings.push(ConfigWarning::FixtureMissing {
                path: fixture.display().to_string(),
            });
        }
        _ => {}
    }

    if let Some(url) = &config.cms.url
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        warnings.push(ConfigWarning::InvalidCmsUrl { url: url.clone() });
    }

    if config.listing.page_size == 0 {
        warnings.push(ConfigWarning::ZeroPageSize);
    }

    if !(0.0..=1.0).contains(&config.search.threshold) {
        warnings.push(ConfigWarning::ThresholdOutOfRange {
            value: config.search.threshold,
        });
    }

    warnings
}
