//! Cinesearch HTTP server.
//!
//! Exposes the reranking pipeline over `GET /search` and reports index
//! connectivity on `GET /health`. OpenAPI documentation is served at `/docs`.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod state;

pub use api::create_router;
pub use error::ServerError;
pub use state::AppState;
