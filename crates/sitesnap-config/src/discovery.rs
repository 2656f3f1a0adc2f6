//! Configuration file discovery.
//!
//! A deployed server usually pins one file through `SITESNAP_CONFIG`. Otherwise `.sitesnap.toml`
//! files are collected walking up from the working directory, and the global
//! `~/.sitesnap.toml` comes last.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".sitesnap.toml";

/// Lists the configuration files for `cwd`, highest precedence first.
///
/// A `pinned` file (relative paths resolve against `cwd`) is the only file returned, whether
/// or not it exists, so a mistyped path fails loudly at load time. Without one, every
/// `.sitesnap.toml` from `cwd` upward is returned, stopping after a file with `root = true`;
/// the global file follows unless such a root was found.
pub fn discover_config_files(cwd: &Path, pinned: Option<&Path>) -> Vec<PathBuf> {
    if let Some(pinned) = pinned {
        return vec![cwd.join(pinned)];
    }

    let mut configs = Vec::new();
    for dir in cwd.ancestors() {
        let path = dir.join(CONFIG_FILENAME);
        if !path.is_file() {
            continue;
        }
        let root = is_root_config(&path);
        configs.push(path);
        if root {
            return configs;
        }
    }

    if let Some(global) = global_config_path().filter(|global| global.is_file())
        && !configs.contains(&global)
    {
        configs.push(global);
    }
    configs
}

/// Returns the path to the global configuration file (`~/.sitesnap.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}
