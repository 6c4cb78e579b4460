use clap::{Arg, ArgAction, Command, ValueHint};
use std::path::PathBuf;

/// CLI arguments for cinesearch-server
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub config_file: Option<PathBuf>,
    pub cors_origins: Option<Vec<String>>,
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse() -> Self {
        let matches = Self::command().get_matches();

        // Handle special help for environment variables
        if matches.get_flag("help_env") {
            Self::print_env_help();
            std::process::exit(0);
        }

        Self {
            port: matches.get_one::<u16>("port").copied(),
            config_file: matches.get_one::<PathBuf>("config").cloned(),
            cors_origins: matches
                .get_many::<String>("cors_origin")
                .map(|values| values.cloned().collect()),
            log_level: matches.get_one::<String>("log_level").cloned(),
        }
    }

    fn command() -> Command {
        Command::new("cinesearch-server")
            .version(cinesearch::VERSION)
            .author("Cinesearch Contributors")
            .about("HTTP API server for Cinesearch movie search reranking")
            .long_about(
                r#"Cinesearch Server forwards movie searches to a Meilisearch index, reranks
the over-fetched candidates with a multi-signal relevance score and returns
the best matches as JSON.

The server can be configured through command line arguments, environment
variables or a configuration file. Command line arguments take precedence
over environment variables.

Examples:
  cinesearch-server --port 8080
  cinesearch-server --config cinesearch.toml --log-level debug
  cinesearch-server --cors-origin https://www.themoviedb.org"#,
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("Port to listen on")
                    .long_help(
                        "Port number for the HTTP server to listen on.
Environment variable: CINESEARCH_PORT",
                    )
                    .value_hint(ValueHint::Other)
                    .value_parser(clap::value_parser!(u16)),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .long_help(
                        "Path to a TOML, YAML or JSON configuration file. Values are
merged with CINESEARCH_* and MEILI_* environment variables.
Environment variable: CINESEARCH_CONFIG_FILE",
                    )
                    .value_hint(ValueHint::FilePath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("cors_origin")
                    .long("cors-origin")
                    .value_name("ORIGIN")
                    .help("Allowed CORS origin (repeatable)")
                    .long_help(
                        "Restrict cross-origin requests to the given origins. When no
origin is configured every origin is allowed.
Environment variable: CINESEARCH_CORS_ORIGINS (comma separated)",
                    )
                    .value_hint(ValueHint::Url)
                    .action(ArgAction::Append),
            )
            .arg(
                Arg::new("log_level")
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Logging level")
                    .long_help(
                        "Set the logging level. Valid values: error, warn, info, debug, trace
Environment variable: RUST_LOG",
                    )
                    .value_parser(["error", "warn", "info", "debug", "trace"]),
            )
            .arg(
                Arg::new("help_env")
                    .long("help-env")
                    .help("Show all environment variables")
                    .long_help(
                        "Display a comprehensive list of all environment variables
that can be used to configure the server.",
                    )
                    .action(ArgAction::SetTrue),
            )
    }

    /// Print comprehensive environment variable help
    fn print_env_help() {
        println!("Cinesearch Server Environment Variables");
        println!("=======================================");
        println!();
        println!("Server Configuration:");
        println!("  CINESEARCH_PORT                 - Server port (default: 8000)");
        println!("  CINESEARCH_CONFIG_FILE          - Path to config file");
        println!("  CINESEARCH_CORS_ORIGINS         - Comma separated allowed origins (default: any)");
        println!();
        println!("Search Index:");
        println!("  CINESEARCH_INDEX__HOST          - Meilisearch URL (default: http://127.0.0.1:7700)");
        println!("  CINESEARCH_INDEX__API_KEY       - Meilisearch API key");
        println!("  CINESEARCH_INDEX__INDEX_NAME    - Index name (default: movies)");
        println!("  CINESEARCH_INDEX__TIMEOUT       - Request timeout, e.g. 10s (default: 10s)");
        println!();
        println!("Meilisearch (legacy names, override the CINESEARCH_INDEX__* values):");
        println!("  MEILI_HOST                      - Meilisearch URL");
        println!("  MEILI_MASTER_KEY                - Meilisearch API key");
        println!("  MEILI_INDEX_NAME                - Index name");
        println!();
        println!("Search:");
        println!("  CINESEARCH_SEARCH__DEFAULT_LIMIT - Results when no limit is given (default: 10)");
        println!("  CINESEARCH_SCORING__<WEIGHT>    - Override a scoring weight, e.g.");
        println!("                                    CINESEARCH_SCORING__POPULARITY_WEIGHT=0.25");
        println!();
        println!("Logging:");
        println!(
            "  RUST_LOG                        - Logging level (error, warn, info, debug, trace)"
        );
        println!();
        println!("Any of these may also be set in a .env file in the working directory;");
        println!("variables already present in the environment take precedence over it.");
        println!();
        println!("Note: Command line arguments take precedence over environment variables.");
        println!("Use --help for CLI argument documentation.");
    }
}
