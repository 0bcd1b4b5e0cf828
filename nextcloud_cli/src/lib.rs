//! Command line front end for the Nextcloud MCP server.

pub mod cli;
pub mod config;
mod errors;
pub mod logging;

pub use errors::CliError;
