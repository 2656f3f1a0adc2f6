//! State shared by every command.

use std::{env, path::PathBuf, process::ExitCode};

use sitesnap_cms::Cms;
use sitesnap_config::Config;
use tokio::runtime::{Builder, Runtime};

/// Working directory and configuration, resolved once per invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Effective configuration; defaults when no config file applies.
    pub config: Config,
}

impl CommandContext {
    /// Resolves the working directory and loads configuration from it.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = working_dir()?;
        let config = Config::load(&cwd).map_err(|e| {
            eprintln!("error: failed to load configuration: {e}");
            ExitCode::FAILURE
        })?;
        Ok(Self { cwd, config })
    }

    /// Resolves only the working directory.
    ///
    /// `init` uses this so it can replace a config file that no longer parses.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        Ok(Self {
            cwd: working_dir()?,
            config: Config::default(),
        })
    }

    /// Opens the configured data source.
    pub fn cms(&self) -> Result<Cms, ExitCode> {
        Cms::from_config(&self.config).map_err(|e| {
            eprintln!("error: {e}");
            eprintln!(
                "Run 'sitesnap init' to create a configuration file, then set a data source."
            );
            ExitCode::FAILURE
        })
    }

    /// Builds the runtime that async commands block on.
    pub fn runtime(&self) -> Result<Runtime, ExitCode> {
        Builder::new_multi_thread().enable_all().build().map_err(|e| {
            eprintln!("error: failed to start async runtime: {e}");
            ExitCode::FAILURE
        })
    }
}

/// The current directory, or a reported failure.
fn working_dir() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}
