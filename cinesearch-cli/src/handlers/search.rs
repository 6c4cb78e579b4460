use cinesearch::prelude::*;
use tracing::debug;

use crate::args::SearchArgs;
use crate::context::CinesearchCliContext;
use crate::output::{OutputFormat, format_warning, print_json, render_search_results};

/// Run a reranked search, falling back to the configured default limit.
pub async fn run_search(ctx: &CinesearchCliContext, args: &SearchArgs) -> Result<SearchResponse> {
    let limit = args.limit.unwrap_or(ctx.config.search.default_limit);
    debug!(query = %args.query, limit, offline = ctx.offline, "Running search");

    ctx.reranker.rerank_search(&args.query, limit).await
}

pub async fn handle_search_command(
    args: SearchArgs,
    ctx: &CinesearchCliContext,
    output_format: OutputFormat,
) -> Result<()> {
    let response = run_search(ctx, &args).await?;

    match output_format {
        OutputFormat::Json => print_json(&response),
        OutputFormat::Table => {
            if ctx.offline {
                println!("{}", format_warning("Searching fixture records, not Meilisearch"));
            }
            print!("{}", render_search_results(&response));
        }
    }

    Ok(())
}
