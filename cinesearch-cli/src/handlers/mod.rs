//! Command handlers for the Cinesearch CLI

pub mod config;
pub mod health;
pub mod search;

pub use config::handle_config_command;
pub use health::handle_health_command;
pub use search::{handle_search_command, run_search};
