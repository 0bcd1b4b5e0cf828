//! MCP server handler backed by the tool catalog.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::http::{Method, header};
use axum::routing::get;
use log::{debug, info};
use nextcloud_dav::NextcloudClient;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt, model::*,
    service::RequestContext, transport::stdio,
};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};

use crate::catalog::{Dispatch, ToolCatalog};
use crate::tools;

/// Error type for MCP server operations.
#[derive(Debug)]
pub enum ServerError {
    /// MCP protocol error
    Mcp(String),
    /// Failure binding or serving the network transport
    Io(std::io::Error),
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Io(err)
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::Mcp(msg) => write!(f, "MCP error: {}", msg),
            ServerError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for ServerError {}

/// MCP server exposing a Nextcloud account.
///
/// Holds no per-call state; clones share the same catalog.
#[derive(Clone)]
pub struct NextcloudMcpServer {
    catalog: Arc<ToolCatalog>,
}

impl NextcloudMcpServer {
    /// Create a server with every Nextcloud tool registered.
    pub fn new(client: NextcloudClient) -> Self {
        Self::with_catalog(tools::default_catalog(Arc::new(client)))
    }

    pub fn with_catalog(catalog: ToolCatalog) -> Self {
        debug!(
            "Creating MCP server with {} tools",
            catalog.list_tools().len()
        );
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Routes one call through the catalog.
    ///
    /// Tool failures come back as error results carrying the envelope; only
    /// an unknown tool name is a protocol error.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        match self.catalog.call(name, arguments).await {
            Dispatch::Completed(result) => Ok(result.into_call_result()),
            Dispatch::UnknownTool(name) => {
                debug!("Unknown tool requested: {}", name);
                Err(McpError::invalid_params(
                    format!("Unknown tool: {}", name),
                    None,
                ))
            }
        }
    }

    /// Run the server over stdin/stdout.
    pub async fn serve_stdio(self) -> Result<(), ServerError> {
        info!("Starting MCP server on stdio");
        let service = self
            .serve(stdio())
            .await
            .map_err(|e| ServerError::Mcp(format!("Failed to start server: {}", e)))?;
        service
            .waiting()
            .await
            .map_err(|e| ServerError::Mcp(format!("Server error: {}", e)))?;
        Ok(())
    }

    /// Router with the streamable HTTP endpoint at `/mcp` and `/health`.
    ///
    /// Any origin may call it; preflight requests are answered by the CORS
    /// layer without reaching the MCP service.
    pub fn http_router(self) -> Router {
        let service = StreamableHttpService::new(
            move || Ok(self.clone()),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig::default(),
        );
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        Router::new()
            .route("/health", get(health))
            .nest_service("/mcp", service)
            .layer(cors)
    }

    /// Run the server over streamable HTTP.
    pub async fn serve_http(self, host: &str, port: u16) -> Result<(), ServerError> {
        let listener = tokio::net::TcpListener::bind((host, port)).await?;
        info!(
            "MCP server listening on http://{}/mcp",
            listener.local_addr()?
        );
        axum::serve(listener, self.http_router()).await?;
        Ok(())
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

impl ServerHandler for NextcloudMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Nextcloud MCP server. Use the nextcloud_* tools to list, read, upload, delete \
                 and share files, to manage calendar events and to manage contacts."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = self.catalog.list_tools();
        debug!("Listing {} tools", tools.len());
        Ok(ListToolsResult {
            tools,
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Calling tool: {}", request.name);
        self.dispatch(&request.name, request.arguments).await
    }
}
