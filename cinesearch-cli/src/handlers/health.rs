use cinesearch::prelude::*;
use serde_json::json;

use crate::context::CinesearchCliContext;
use crate::output::{OutputFormat, format_success, print_json};

pub async fn handle_health_command(
    ctx: &CinesearchCliContext,
    output_format: OutputFormat,
) -> Result<()> {
    ctx.reranker.health().await?;

    let source = if ctx.offline {
        "fixture".to_string()
    } else {
        format!("{} (index '{}')", ctx.config.index.host, ctx.config.index.index_name)
    };

    match output_format {
        OutputFormat::Json => print_json(&json!({
            "status": "ok",
            "meilisearch": "ok",
            "source": source,
        })),
        OutputFormat::Table => {
            println!("{}", format_success(&format!("Search index healthy: {}", source)))
        }
    }

    Ok(())
}
