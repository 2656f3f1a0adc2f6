//! sitesnap: a showcase of company websites.
//!
//! Companies, their web pages and their industries are authored in a headless CMS. `sitesnap
//! serve` renders them as a browsable site with fuzzy search and a keyboard-driven screenshot
//! viewer; the other commands search, export the sitemap, and manage configuration from the
//! terminal.

#![warn(missing_docs)]

mod cli;

use std::process::ExitCode;

use cli::{CommandContext, args::parse_cli, commands, logging};

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init(cli.log_json);

    let ctx = if cli.command.needs_config() {
        CommandContext::load()
    } else {
        CommandContext::load_cwd_only()
    };
    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
