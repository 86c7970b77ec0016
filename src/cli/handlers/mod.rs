//! Command handlers for CLI operations
//!
//! Each handler owns the merged settings for one subcommand.

pub mod migrate;
pub mod serve;
pub mod web;

pub use migrate::MigrateCommandHandler;
pub use serve::ServeCommandHandler;
pub use web::WebCommandHandler;
