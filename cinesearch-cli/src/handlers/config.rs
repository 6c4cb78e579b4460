use cinesearch::config::CinesearchConfig;

use crate::output::{OutputFormat, print_json, redacted_config, render_config};

/// Print the effective configuration. The API key is never shown.
pub fn handle_config_command(config: &CinesearchConfig, output_format: OutputFormat) {
    match output_format {
        OutputFormat::Json => print_json(&redacted_config(config)),
        OutputFormat::Table => print!("{}", render_config(config)),
    }
}
