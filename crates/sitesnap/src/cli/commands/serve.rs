//! Implementation of `sitesnap serve`.

use std::{process::ExitCode, sync::Arc};

use sitesnap_web::{AppState, serve};

use crate::cli::{args::ServeCommand, context::CommandContext};

/// Serves the site until interrupted.
pub fn run(ctx: &CommandContext, cmd: &ServeCommand) -> ExitCode {
    let cms = match ctx.cms() {
        Ok(cms) => cms,
        Err(code) => return code,
    };
    let runtime = match ctx.runtime() {
        Ok(runtime) => runtime,
        Err(code) => return code,
    };

    let bind = cmd.bind.as_deref().unwrap_or(&ctx.config.server.bind);
    let state = Arc::new(AppState::new(&ctx.config, cms));
    match runtime.block_on(serve(state, bind)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
