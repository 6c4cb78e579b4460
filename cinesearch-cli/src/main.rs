use clap::{CommandFactory, Parser};
use tracing::Level;

use cinesearch::prelude::*;
use cinesearch_cli::handlers::{
    handle_config_command, handle_health_command, handle_search_command,
};
use cinesearch_cli::{Cli, CinesearchCliContext, Commands, OutputFormat, output_error};

#[tokio::main]
async fn main() {
    let cli_args = Cli::parse();
    let output_format = cli_args.output;

    // Initialize logging based on verbosity and quiet mode. JSON output keeps
    // stdout clean, so logs always go to stderr.
    let log_level = if cli_args.quiet {
        Level::ERROR
    } else if cli_args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli_args).await {
        output_error(&e, output_format);
        std::process::exit(1);
    }
}

async fn run(cli_args: Cli) -> Result<()> {
    let output_format = cli_args.output;
    let config_file = cli_args.config.as_deref();

    match cli_args.command {
        Commands::Version => {
            if output_format == OutputFormat::Json {
                cinesearch_cli::output::print_json(&serde_json::json!({
                    "version": cinesearch::VERSION,
                    "similarity_version": cinesearch::search::SIMILARITY_VERSION,
                }));
            } else {
                println!("Cinesearch CLI v{}", cinesearch::VERSION);
            }
        }

        Commands::Completions(args) => {
            let mut command = Cli::command();
            clap_complete::generate(
                clap_complete::Shell::from(args.shell),
                &mut command,
                "cinesearch",
                &mut std::io::stdout(),
            );
        }

        Commands::Config => {
            let config = CinesearchCliContext::load_config(config_file)?;
            handle_config_command(&config, output_format);
        }

        Commands::Search(args) => {
            let ctx = CinesearchCliContext::new(config_file, cli_args.fixture.as_deref())?;
            handle_search_command(args, &ctx, output_format).await?;
        }

        Commands::Health => {
            let ctx = CinesearchCliContext::new(config_file, cli_args.fixture.as_deref())?;
            handle_health_command(&ctx, output_format).await?;
        }
    }

    Ok(())
}
