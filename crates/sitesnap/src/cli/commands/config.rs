//! Implementation of `sitesnap config`.

use std::process::ExitCode;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings. Secrets are never printed.
pub fn run(ctx: &CommandContext) -> ExitCode {
    print!("{}", ctx.config.settings_to_toml());
    ExitCode::SUCCESS
}
