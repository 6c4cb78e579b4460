pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use context::CinesearchCliContext;
pub use output::{
    CliColors, OutputFormat, format_error, format_info, format_success, format_warning,
    output_error, render_config, render_search_results,
};
