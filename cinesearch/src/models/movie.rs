//! Movie record and public result types.
//!
//! [`MovieRecord`] mirrors a document stored in the external index. Every field
//! except `id` is optional on the wire; absent keys deserialize to `None` (or an
//! empty value) rather than failing, and the scoring code treats them as neutral.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A movie document as returned by the search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Unique key (TMDb movie id)
    pub id: i64,

    /// Display title; may be empty for records that only carry an original title
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Title in the original language
    #[serde(default)]
    pub original_title: Option<String>,

    /// Plot summary
    #[serde(default)]
    pub overview: Option<String>,

    /// Release date in ISO format (`YYYY-MM-DD`)
    #[serde(default)]
    pub release_date: Option<String>,

    /// Calendar year of `release_date`
    #[serde(default)]
    pub release_year: Option<i32>,

    /// Popularity as reported by the catalog (>= 0)
    #[serde(default)]
    pub popularity: Option<f64>,

    /// Average audience rating (0-10)
    #[serde(default)]
    pub vote_average: Option<f64>,

    /// Number of audience votes
    #[serde(default)]
    pub vote_count: Option<i64>,

    /// ISO 639-1 language code
    #[serde(default)]
    pub original_language: Option<String>,

    /// Catalog genre identifiers
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<i64>,

    /// Poster image path relative to the catalog's image CDN
    #[serde(default)]
    pub poster_path: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl MovieRecord {
    /// Create a record with only an id and a title set.
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            original_title: None,
            overview: None,
            release_date: None,
            release_year: None,
            popularity: None,
            vote_average: None,
            vote_count: None,
            original_language: None,
            genre_ids: Vec::new(),
            poster_path: None,
        }
    }

    /// Set the original-language title
    pub fn with_original_title(mut self, original_title: impl Into<String>) -> Self {
        self.original_title = Some(original_title.into());
        self
    }

    /// Set the overview text
    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }

    /// Set the release date and derive `release_year` from it when it parses
    pub fn with_release_date(mut self, release_date: impl Into<String>) -> Self {
        let release_date = release_date.into();
        self.release_year = year_from_date(&release_date);
        self.release_date = Some(release_date);
        self
    }

    /// Set the release year without a full date
    pub fn with_release_year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self
    }

    /// Set the popularity
    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = Some(popularity);
        self
    }

    /// Set the rating average and vote count
    pub fn with_votes(mut self, vote_average: f64, vote_count: i64) -> Self {
        self.vote_average = Some(vote_average);
        self.vote_count = Some(vote_count);
        self
    }

    /// Set the poster path
    pub fn with_poster_path(mut self, poster_path: impl Into<String>) -> Self {
        self.poster_path = Some(poster_path.into());
        self
    }

    /// The title shown to users: `title` when present, else `original_title`.
    pub fn display_title(&self) -> &str {
        if !self.title.trim().is_empty() {
            return &self.title;
        }
        self.original_title.as_deref().unwrap_or("")
    }

    /// `release_year`, falling back to the year encoded in `release_date`.
    pub fn effective_release_year(&self) -> Option<i32> {
        self.release_year
            .or_else(|| self.release_date.as_deref().and_then(year_from_date))
    }
}

/// Extract the calendar year from an ISO date, tolerating partial dates like `"1999"`.
fn year_from_date(date: &str) -> Option<i32> {
    let date = date.trim();
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(parsed.year());
    }
    let prefix = date.get(..4)?;
    if prefix.chars().all(|c| c.is_ascii_digit()) {
        prefix.parse().ok()
    } else {
        None
    }
}

/// Public projection of a ranked record. The internal score is never included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieResult {
    pub id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub poster_path: Option<String>,
}

impl From<MovieRecord> for MovieResult {
    fn from(record: MovieRecord) -> Self {
        let title = record.display_title().to_string();
        Self {
            id: record.id,
            title,
            overview: record.overview,
            release_date: record.release_date,
            popularity: record.popularity,
            vote_average: record.vote_average,
            vote_count: record.vote_count,
            poster_path: record.poster_path,
        }
    }
}

/// Response of a reranked search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query exactly as submitted
    pub query: String,

    /// The index's estimated total before reranking and truncation
    pub total_hits: u64,

    /// Ranked results, best first
    pub results: Vec<MovieResult>,
}

impl SearchResponse {
    /// Assemble a response from ranked records.
    pub fn assemble(query: &str, total_hits: u64, ranked: Vec<MovieRecord>) -> Self {
        Self {
            query: query.to_string(),
            total_hits,
            results: ranked.into_iter().map(MovieResult::from).collect(),
        }
    }
}
