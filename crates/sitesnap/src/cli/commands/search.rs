//! Implementation of `sitesnap search`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use sitesnap_cms::{CompanyQuery, QueryKey};
use sitesnap_search::{GroupedResults, SearchEngine, SearchKey, SearchOptions, search_grouped};
use tracing::debug;

use crate::cli::{args::SearchCommand, context::CommandContext};

/// JSON shape of a search run.
#[derive(Serialize)]
struct SearchOutput<'a> {
    /// The query as searched.
    query: &'a str,
    /// Grouped results.
    #[serde(flatten)]
    results: &'a GroupedResults,
}

/// Runs a grouped fuzzy search over the current snapshot.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let query = cmd.query.join(" ");
    if query.trim().is_empty() {
        eprintln!("error: empty query");
        return ExitCode::FAILURE;
    }

    let mut options = SearchOptions::from(&ctx.config.search);
    if let Some(limit) = cmd.limit {
        options.limit = Some(limit);
    }
    if let Some(threshold) = cmd.threshold {
        if !(0.0..=1.0).contains(&threshold) {
            eprintln!("error: threshold must be between 0.0 and 1.0");
            return ExitCode::FAILURE;
        }
        options.threshold = threshold;
    }

    let cms = match ctx.cms() {
        Ok(cms) => cms,
        Err(code) => return code,
    };
    let runtime = match ctx.runtime() {
        Ok(runtime) => runtime,
        Err(code) => return code,
    };

    let query_all = CompanyQuery::all().with_preview(cmd.preview);
    let snapshot = match runtime.block_on(cms.fetch(QueryKey::Companies, &query_all)) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    debug!(companies = snapshot.companies.len(), preview = cmd.preview, "snapshot loaded");
    let engine = SearchEngine::new(options);
    let results = search_grouped(&engine, &snapshot.companies, &query);

    if cmd.json {
        let output = SearchOutput {
            query: &query,
            results: &results,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize results: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    if results.is_empty() {
        println!("No results.");
        return ExitCode::SUCCESS;
    }

    println!("{}", results_table(&results));
    ExitCode::SUCCESS
}

/// Label of each result group.
fn group_label(key: SearchKey) -> &'static str {
    match key {
        SearchKey::Title => "Companies",
        SearchKey::Industry => "Industries",
        SearchKey::Pages => "Pages",
    }
}

/// Renders grouped results as a table.
fn results_table(results: &GroupedResults) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Group", "Match", "Count", "Link"]);

    for key in SearchKey::ALL {
        for entry in results.bucket(key) {
            table.add_row(vec![
                Cell::new(group_label(key)),
                Cell::new(&entry.value),
                Cell::new(entry.count),
                Cell::new(entry.href(key)),
            ]);
        }
    }
    table
}
