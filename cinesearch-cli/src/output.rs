use cinesearch::CinesearchError;
use cinesearch::config::CinesearchConfig;
use cinesearch::models::SearchResponse;
use colored::*;
use serde::Serialize;
use serde_json::json;

/// Output format for command results
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn primary() -> Color {
        Color::White
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }
}

/// Print an error in the requested format: a JSON object on stderr, or a
/// colored message.
pub fn output_error(error: &CinesearchError, output_format: OutputFormat) {
    if output_format == OutputFormat::Json {
        let (code, details) = match error {
            CinesearchError::EmptyQuery => ("EMPTY_QUERY", None),
            CinesearchError::InvalidLimit { limit, min, max } => (
                "INVALID_LIMIT",
                Some(json!({ "limit": limit, "min": min, "max": max })),
            ),
            CinesearchError::IndexUnavailable(_) => (
                "INDEX_UNAVAILABLE",
                Some(json!({
                    "hint": "Check MEILI_HOST / CINESEARCH_INDEX__HOST, or use --fixture for offline searches"
                })),
            ),
            CinesearchError::IndexQueryError(_) => ("INDEX_QUERY_ERROR", None),
            CinesearchError::Configuration(_) => ("CONFIGURATION_ERROR", None),
            CinesearchError::Logging(_) => ("LOGGING_ERROR", None),
            CinesearchError::Other(_) => ("OTHER_ERROR", None),
        };

        let mut error_response = json!({
            "error": true,
            "code": code,
            "message": error.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if let Some(details) = details {
            error_response["details"] = details;
        }

        eprintln!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("{}", format_error(&error.to_string()));
    }
}

/// Print a serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn format_success(msg: &str) -> String {
    format!(
        "{} {}",
        "✓".color(CliColors::success()).bold(),
        msg.color(CliColors::success())
    )
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

/// Render reranked results as a table
pub fn render_search_results(response: &SearchResponse) -> String {
    let mut out = String::new();

    if response.results.is_empty() {
        out.push_str(&format_info(&format!(
            "No movies found for \"{}\".",
            response.query
        )));
        out.push('\n');
        return out;
    }

    out.push_str(&format_info(&format!(
        "Top {} of {} matches for \"{}\":",
        response.results.len(),
        response.total_hits,
        response.query
    )));
    out.push_str("\n\n");

    out.push_str(&format!(
        "{:>3}  {:<8} {:<45} {:<10} {:>6} {:>9}\n",
        "#".color(CliColors::muted()).bold(),
        "ID".color(CliColors::muted()).bold(),
        "Title".color(CliColors::muted()).bold(),
        "Released".color(CliColors::muted()).bold(),
        "Rating".color(CliColors::muted()).bold(),
        "Votes".color(CliColors::muted()).bold()
    ));
    out.push_str(&format!("{}\n", "─".repeat(86).color(CliColors::muted())));

    for (rank, movie) in response.results.iter().enumerate() {
        let rating = movie
            .vote_average
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "-".to_string());
        let votes = movie
            .vote_count
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());

        out.push_str(&format!(
            "{:>3}  {:<8} {:<45} {:<10} {:>6} {:>9}\n",
            (rank + 1).to_string().color(CliColors::accent()),
            movie.id.to_string().color(CliColors::muted()),
            truncate(&movie.title, 45).color(CliColors::primary()).bold(),
            movie.release_date.as_deref().unwrap_or("-"),
            rating,
            votes
        ));
    }

    out
}

/// Configuration with secrets masked, for display
pub fn redacted_config(config: &CinesearchConfig) -> CinesearchConfig {
    let mut config = config.clone();
    if config.index.api_key.is_some() {
        config.index.api_key = Some("<redacted>".to_string());
    }
    config
}

/// Render the effective configuration as labelled sections
pub fn render_config(config: &CinesearchConfig) -> String {
    let config = redacted_config(config);
    let label = |name: &str| format!("  {:<26}", name).color(CliColors::muted()).to_string();
    let heading = |name: &str| format!("{}\n", name.color(CliColors::accent()).bold());

    let mut out = String::new();

    out.push_str(&heading("Index"));
    out.push_str(&format!("{}{}\n", label("host"), config.index.host));
    out.push_str(&format!(
        "{}{}\n",
        label("api_key"),
        config.index.api_key.as_deref().unwrap_or("(none)")
    ));
    out.push_str(&format!("{}{}\n", label("index_name"), config.index.index_name));
    out.push_str(&format!("{}{:?}\n", label("timeout"), config.index.timeout));

    out.push_str(&heading("Search"));
    out.push_str(&format!(
        "{}{}\n",
        label("default_limit"),
        config.search.default_limit
    ));

    out.push_str(&heading("Scoring"));
    if let Ok(serde_json::Value::Object(weights)) = serde_json::to_value(&config.scoring) {
        for (name, value) in weights {
            out.push_str(&format!("{}{}\n", label(&name), value));
        }
    }

    out.push_str(&heading("Logging"));
    out.push_str(&format!("{}{}\n", label("level"), config.logging.level));
    out.push_str(&format!("{}{:?}\n", label("format"), config.logging.format));
    out.push_str(&format!(
        "{}{}\n",
        label("file"),
        config
            .logging
            .file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    ));
    out.push_str(&format!("{}{}\n", label("stdout"), config.logging.stdout));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("Amélie", 10), "Amélie");
        assert_eq!(truncate("千と千尋の神隠し", 6), "千と千...");
        assert_eq!(truncate("abcdef", 6), "abcdef");
    }

    #[test]
    fn test_redacted_config_masks_api_key() {
        let mut config = CinesearchConfig::default();
        config.index.api_key = Some("masterKey".to_string());

        let redacted = redacted_config(&config);
        assert_eq!(redacted.index.api_key.as_deref(), Some("<redacted>"));
        assert!(!render_config(&config).contains("masterKey"));

        assert!(redacted_config(&CinesearchConfig::default()).index.api_key.is_none());
    }
}
