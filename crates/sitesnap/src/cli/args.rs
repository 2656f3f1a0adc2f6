//! Clap argument definitions for the `sitesnap` CLI.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sitesnap")]
#[command(about = "sitesnap - a showcase of company websites")]
#[command(version)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `sitesnap serve`.
#[derive(Args, Debug, Clone, Default)]
pub struct ServeCommand {
    /// Address to listen on [default: server.bind]
    #[arg(long)]
    pub bind: Option<String>,
}

/// Arguments for `sitesnap search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search terms, joined with spaces
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Maximum companies to match [default: search.limit]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Match threshold (0.0-1.0, lower is stricter) [default: 0.3]
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Include drafts
    #[arg(long)]
    pub preview: bool,
}

/// Arguments for `sitesnap sitemap`.
#[derive(Args, Debug, Clone, Default)]
pub struct SitemapCommand {
    /// Base URL for every location [default: site.base_url]
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Arguments for `sitesnap init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.sitesnap.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sitesnap` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Serve the site over HTTP
    Serve(ServeCommand),

    /// Fuzzy-search companies, industries and page names
    #[command(after_help = "\
Matches are grouped by the field they hit: company names, industries and page
names. Typos are tolerated up to the configured edit distance.

EXAMPLES:
  sitesnap search acme
  sitesnap search fintek --threshold 0.4
  sitesnap search pricing --json")]
    Search(SearchCommand),

    /// Print the sitemap XML
    Sitemap(SitemapCommand),

    /// Validate configuration and the data source
    Check,

    /// Show effective configuration settings
    Config,

    /// Initialize sitesnap configuration in current directory
    Init(InitCommand),
}

impl Commands {
    /// Whether the command needs the configuration loaded. `init` must work even when an
    /// existing config file is invalid.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Self::Init(_))
    }
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
