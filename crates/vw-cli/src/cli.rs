//! CLI argument definitions for `vw`

use crate::block_arg::BlockArg;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "vw",
    version,
    about = "VedaWeb reader core inspector",
    long_about = "Inspect layer catalogs, stanza render plans, persisted settings and \
                  structured search requests from JSON files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(long = "log-format", value_enum, default_value = "compact", global = true)]
    pub log_format: LogFormatArg,

    /// Reader configuration (TOML)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Compact,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the render plan of a stanza
    Render(RenderArgs),

    /// Print the merged settings record
    Settings(SettingsArgs),

    /// Build a search request through the query builder
    Query(QueryArgs),
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Layer catalog JSON
    #[arg(long, value_name = "PATH")]
    pub catalog: PathBuf,

    /// Stanza document JSON
    #[arg(long, value_name = "PATH")]
    pub document: PathBuf,

    /// Condensed reading view
    #[arg(long)]
    pub condensed: bool,

    /// Show a layer (repeatable)
    #[arg(long = "show", value_name = "ID")]
    pub show: Vec<String>,

    /// Hide a layer (repeatable)
    #[arg(long = "hide", value_name = "ID")]
    pub hide: Vec<String>,
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Settings blob
    #[arg(long, value_name = "PATH")]
    pub path: PathBuf,

    /// Layer catalog JSON, to include per-category flags
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Attribute domains JSON (`{"casus": ["nom", ...], ...}`)
    #[arg(long, value_name = "PATH")]
    pub domains: PathBuf,

    /// Restrict to a book (0 = all)
    #[arg(long, default_value_t = 0)]
    pub book: u32,

    /// Restrict to a hymn of the book (0 = all)
    #[arg(long, default_value_t = 0)]
    pub hymn: u32,

    /// Transliteration of the terms (defaults to the configured scheme)
    #[arg(long)]
    pub transliteration: Option<String>,

    /// Search block `term:name=value,name=value` (repeatable)
    #[arg(long = "block", value_name = "BLOCK")]
    pub blocks: Vec<BlockArg>,

    /// Free-text search instead of blocks
    #[arg(long, conflicts_with = "blocks")]
    pub smart: Option<String>,
}
