//! Environment variable overrides.
//!
//! Applied after file merging so deployments can supply secrets and endpoints without
//! writing them into a config file. Empty values are ignored.

use std::{net::SocketAddr, path::PathBuf};

use crate::{Config, ConfigError};

/// Overrides `cms.url`.
pub const ENV_CMS_URL: &str = "SITESNAP_CMS_URL";
/// Overrides `cms.token`.
pub const ENV_CMS_TOKEN: &str = "SITESNAP_CMS_TOKEN";
/// Overrides `cms.fixture`.
pub const ENV_FIXTURE: &str = "SITESNAP_FIXTURE";
/// Overrides `server.preview_secret`.
pub const ENV_PREVIEW_SECRET: &str = "SITESNAP_PREVIEW_SECRET";
/// Overrides `server.bind`.
pub const ENV_BIND: &str = "SITESNAP_BIND";
/// Names the one config file to load, replacing discovery.
pub const ENV_CONFIG: &str = "SITESNAP_CONFIG";

/// The config file pinned through `SITESNAP_CONFIG`, if any.
pub fn pinned_config_path<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(ENV_CONFIG)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

/// Applies `SITESNAP_*` overrides to `config` using `lookup` to read variables.
///
/// `lookup` is injected so callers and tests control the environment.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(url) = get(ENV_CMS_URL) {
        config.cms.url = Some(url.trim_end_matches('/').to_string());
    }
    if let Some(token) = get(ENV_CMS_TOKEN) {
        config.cms.token = Some(token);
    }
    if let Some(fixture) = get(ENV_FIXTURE) {
        config.cms.fixture = Some(PathBuf::from(fixture));
    }
    if let Some(secret) = get(ENV_PREVIEW_SECRET) {
        config.server.preview_secret = Some(secret);
    }
    if let Some(bind) = get(ENV_BIND) {
        if bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidEnv {
                name: ENV_BIND,
                value: bind,
            });
        }
        config.server.bind = bind;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_overrides_apply() {
        let vars = env_of(&[
            (ENV_CMS_URL, "https://cms.example/"),
            (ENV_CMS_TOKEN, "tok"),
            (ENV_PREVIEW_SECRET, "secret"),
            (ENV_BIND, "0.0.0.0:8080"),
            (ENV_FIXTURE, "/data/companies.json"),
        ]);
        let mut config = Config::default();
        apply_env_overrides(&mut config, |k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.cms.url.as_deref(), Some("https://cms.example"));
        assert_eq!(config.cms.token.as_deref(), Some("tok"));
        assert_eq!(config.server.preview_secret.as_deref(), Some("secret"));
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(
            config.cms.fixture,
            Some(PathBuf::from("/data/companies.json"))
        );
    }

    #[test]
    fn test_empty_values_ignored() {
        let vars = env_of(&[(ENV_CMS_TOKEN, "  "), (ENV_BIND, "")]);
        let mut config = Config::default();
        config.cms.token = Some("from-file".into());
        apply_env_overrides(&mut config, |k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.cms.token.as_deref(), Some("from-file"));
        assert_eq!(config.server.bind, "127.0.0.1:3000");
    }

    #[test]
    fn test_invalid_bind_rejected() {
        let vars = env_of(&[(ENV_BIND, "not-an-address")]);
        let mut config = Config::default();
        let err = apply_env_overrides(&mut config, |k| vars.get(k).cloned()).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidEnv { name, .. } if name == ENV_BIND));
    }

    #[test]
    fn test_pinned_config_path() {
        let vars = env_of(&[(ENV_CONFIG, "/etc/sitesnap.toml")]);
        let pinned = pinned_config_path(|k| vars.get(k).cloned());
        assert_eq!(pinned, Some(PathBuf::from("/etc/sitesnap.toml")));

        let blank = env_of(&[(ENV_CONFIG, " ")]);
        assert_eq!(pinned_config_path(|k| blank.get(k).cloned()), None);
    }
}
