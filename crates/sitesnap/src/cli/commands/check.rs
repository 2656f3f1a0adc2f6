//! Implementation of `sitesnap check`.

use std::process::ExitCode;

use sitesnap_cms::{CompanyQuery, QueryKey};
use sitesnap_config::{ConfigWarning, config_files};

use crate::cli::context::CommandContext;

/// Shows configuration files and validation warnings, then queries the data source.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("No configuration files found.");
    } else {
        println!("Config files:");
        for path in &config_files {
            println!("   {}", path.display());
        }
    }
    println!();

    let warnings = ctx.config.validate();
    if !warnings.is_empty() {
        println!("Warnings ({}):", warnings.len());
        for w in &warnings {
            println!("   {w}");
        }
        println!();
        print_hints(&warnings);
        return ExitCode::FAILURE;
    }

    let cms = match ctx.cms() {
        Ok(cms) => cms,
        Err(code) => return code,
    };
    let runtime = match ctx.runtime() {
        Ok(runtime) => runtime,
        Err(code) => return code,
    };

    println!("Data source:");
    println!("   {}", cms.describe());
    match runtime.block_on(cms.fetch(QueryKey::Companies, &CompanyQuery::all())) {
        Ok(snapshot) => {
            println!("   {} published companies", snapshot.companies.len());
            println!();
            println!("No issues found.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!();
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::NoDataSource => {
                println!("Hint: add a [cms] section to .sitesnap.toml or set SITESNAP_FIXTURE");
            }
            ConfigWarning::FixtureMissing { .. } => {
                println!("Hint: fixture paths are resolved relative to the config file");
            }
            _ => {}
        }
    }
}
