//! MCP server for a Nextcloud account.
//!
//! Tool modules contribute their tools to a [`ToolCatalog`]; the server
//! lists the catalog and routes `tools/call` requests through it. Every
//! call runs the same pipeline: argument validation against the declared
//! input shape, the module's handler, and a uniform result envelope.

pub mod catalog;
mod errors;
pub mod pipeline;
mod server;
pub mod tools;

pub use catalog::{Dispatch, ToolCatalog, ToolModule, ToolSpec};
pub use errors::ToolError;
pub use pipeline::{ToolCallResult, Validate, ValidationError};
pub use server::{NextcloudMcpServer, ServerError};
