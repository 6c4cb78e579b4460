//! Core reranking pipeline

pub mod reranker;

pub use reranker::{MAX_LIMIT, MIN_LIMIT, Reranker, candidate_pool_size, validate_limit};
