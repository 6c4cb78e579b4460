//! # Rerank Demo
//!
//! Runs a few queries against a small in-memory catalog and prints the
//! reranked results together with each signal of the winning score.
//!
//! Run with: cargo run --example rerank_demo

use cinesearch::config::{LogFormat, LogLevel, LoggingConfig};
use cinesearch::logging;
use cinesearch::prelude::*;
use cinesearch::search::parse_query;
use std::sync::Arc;

fn catalog() -> Vec<MovieRecord> {
    vec![
        MovieRecord::new(155, "The Dark Knight")
            .with_overview("Batman raises the stakes in his war on crime.")
            .with_release_date("2008-07-16")
            .with_popularity(123.2)
            .with_votes(8.5, 32000),
        MovieRecord::new(49026, "The Dark Knight Rises")
            .with_overview("Following the death of Harvey Dent, Batman assumes responsibility for Dent's crimes.")
            .with_release_date("2012-07-16")
            .with_popularity(76.4)
            .with_votes(7.8, 22000),
        MovieRecord::new(27205, "Inception")
            .with_overview("Cobb, a skilled thief who commits corporate espionage by infiltrating the subconscious of his targets.")
            .with_release_date("2010-07-15")
            .with_popularity(83.9)
            .with_votes(8.4, 35000),
        MovieRecord::new(64956, "Inception: The Cobol Job")
            .with_overview("A motion comic prequel to Inception.")
            .with_release_date("2010-12-07")
            .with_popularity(4.1)
            .with_votes(6.8, 400),
        MovieRecord::new(129, "Spirited Away")
            .with_original_title("Sen to Chihiro no Kamikakushi")
            .with_overview("A young girl wanders into a world ruled by gods, witches and spirits.")
            .with_release_date("2001-07-20")
            .with_popularity(98.1)
            .with_votes(8.5, 16000),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init(&LoggingConfig {
        level: LogLevel::Info,
        format: LogFormat::Default,
        file: None,
        stdout: true,
    })?;

    println!("Cinesearch Rerank Demo");
    println!("======================");

    let reranker = Reranker::new(Arc::new(InMemoryIndex::new(catalog())), ScoringConfig::default())?;

    for query in ["dark knight 2012", "inception", "sen to chihiro", "2010"] {
        let response = reranker.rerank_search(query, 3).await?;
        println!("\nQuery: {:?} ({} candidates)", response.query, response.total_hits);

        for (i, movie) in response.results.iter().enumerate() {
            println!(
                "   {}. {} ({})",
                i + 1,
                movie.title,
                movie.release_date.as_deref().unwrap_or("unknown")
            );
        }

        // Explain the winner
        let parsed = parse_query(query)?;
        if let Some(top) = response.results.first()
            && let Some(record) = catalog().into_iter().find(|r| r.id == top.id)
        {
            let b = reranker.calculator().breakdown(&record, &parsed);
            println!(
                "   top score {:.3}: title {:.2}, overlap {:.2}, title bonus {:.2}, overview {:.2}, popularity {:.3}, votes {:.3}, year {:.2}",
                b.total,
                b.title_similarity,
                b.token_overlap,
                b.strong_title_bonus(),
                b.overview_partial,
                b.popularity_component,
                b.vote_component,
                b.year_component
            );
        }
    }

    Ok(())
}
