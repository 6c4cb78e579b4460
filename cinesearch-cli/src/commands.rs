//! Command enum definitions

use std::path::PathBuf;

use crate::args::*;
use crate::output::OutputFormat;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cinesearch")]
#[command(about = "Movie search with relevance reranking", long_about = None)]
#[command(version = cinesearch::VERSION)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Search a JSON array of movie records instead of Meilisearch
    #[arg(long, global = true, value_name = "FILE")]
    pub fixture: Option<PathBuf>,

    /// Output format - use json for tool integration
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub output: OutputFormat,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for movies and print the reranked results
    #[command(
        alias = "s",
        long_about = r#"
Search the movie index and rerank the candidates by relevance.

A trailing year in the query (1900-2099) is treated as a release year hint:
movies released that year rank higher, neighbouring years slightly higher.

EXAMPLES:
  # Title search
  cinesearch search "the dark knight"

  # With a year hint
  cinesearch search "dark knight 2012" --limit 3

  # Against a local fixture file, as JSON
  cinesearch --fixture movies.json --output json search inception
"#
    )]
    Search(SearchArgs),

    /// Check that the search index is reachable
    Health,

    /// Print the effective configuration
    Config,

    /// Display version information
    Version,

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}
