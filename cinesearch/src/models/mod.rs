//! Data models for movie records and search responses.

pub mod movie;

pub use movie::{MovieRecord, MovieResult, SearchResponse};
