//! Implementation of `sitesnap init`.

use std::{fs, path::PathBuf, process::ExitCode};

use sitesnap_config::{CONFIG_FILENAME, global_config_path, global_template, local_template};

use crate::cli::{args::InitCommand, context::CommandContext};

/// Where `init` writes, and which starter it writes there.
struct Target {
    /// Config file path.
    path: PathBuf,
    /// Whether this is `~/.sitesnap.toml`.
    global: bool,
}

impl Target {
    /// Picks the home config for `--global` or when run from the home directory, otherwise
    /// the working directory's.
    fn choose(ctx: &CommandContext, cmd: &InitCommand) -> Result<Self, ExitCode> {
        let home_config = global_config_path();
        let in_home = home_config
            .as_deref()
            .and_then(|p| p.parent())
            .is_some_and(|home| home == ctx.cwd);

        if !cmd.global && !in_home {
            return Ok(Self {
                path: ctx.cwd.join(CONFIG_FILENAME),
                global: false,
            });
        }
        home_config
            .map(|path| Self { path, global: true })
            .ok_or_else(|| {
                eprintln!("error: could not determine home directory");
                ExitCode::FAILURE
            })
    }
}

/// Writes a commented `.sitesnap.toml` starter.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let target = match Target::choose(ctx, cmd) {
        Ok(target) => target,
        Err(code) => return code,
    };

    if target.path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            target.path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = if target.global {
        global_template()
    } else {
        local_template()
    };
    if let Err(e) = fs::write(&target.path, template) {
        eprintln!("error: failed to write {}: {e}", target.path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", target.path.display());
    if !target.global {
        println!();
        println!("Set cms.url or cms.fixture, then run 'sitesnap check'.");
    }
    ExitCode::SUCCESS
}
