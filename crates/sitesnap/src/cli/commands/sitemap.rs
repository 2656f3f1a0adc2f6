//! Implementation of `sitesnap sitemap`.

use std::process::ExitCode;

use sitesnap_cms::{CompanyQuery, QueryKey};
use sitesnap_web::build_sitemap;

use crate::cli::{args::SitemapCommand, context::CommandContext};

/// Prints the sitemap for the published snapshot.
pub fn run(ctx: &CommandContext, cmd: &SitemapCommand) -> ExitCode {
    let base_url = cmd.base_url.as_deref().unwrap_or(&ctx.config.site.base_url);
    if base_url.is_empty() {
        eprintln!("error: no base url: set site.base_url or pass --base-url");
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

    match runtime.block_on(cms.fetch(QueryKey::Companies, &CompanyQuery::all())) {
        Ok(snapshot) => {
            print!("{}", build_sitemap(base_url, &snapshot.companies));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
