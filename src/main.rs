//! MCP server exposing Webex rooms, messages, memberships and people as tools
//!
//! Speaks MCP over stdio. Configuration comes from `WEBEX_*` environment
//! variables (see `config.rs`); logs go to stderr.

use std::sync::Arc;

use anyhow::Context;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam, ServerCapabilities,
    ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::transport::stdio;
use rmcp::{Error as McpError, RoleServer, ServerHandler, ServiceExt};
use tracing::info;

mod config;
mod constants;
mod error;
mod logging;
mod registry;
mod support;
mod tool_definitions;
mod tool_generator;
mod webex_tools;

use config::WebexConfig;
use registry::ToolRegistry;
use support::serialization::tool_result_to_call_result;
use tool_generator::InvocationRequest;
use webex_tools::support::{WebexApi, WebexHttpClient};

#[derive(Clone)]
/// MCP service exposing the Webex tool registry over the protocol.
pub struct WebexMcpService {
    registry: Arc<ToolRegistry>,
    client:   Arc<dyn WebexApi>,
}

impl WebexMcpService {
    fn new(registry: ToolRegistry, client: Arc<dyn WebexApi>) -> Self {
        Self {
            registry: Arc::new(registry),
            client,
        }
    }
}

impl ServerHandler for WebexMcpService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(constants::WEBEX_MCP_INFO.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(self.registry.list_tools())
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result = tool_generator::invoke(
            &self.registry,
            self.client.as_ref(),
            InvocationRequest::from(request),
        )
        .await;
        Ok(tool_result_to_call_result(&result))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = WebexConfig::from_env().context("failed to load configuration")?;
    let _log_guard = logging::init(&config)?;

    info!(config = %config.summary(), "Starting Webex MCP server");

    let registry = ToolRegistry::with_catalog(&config.tool_defaults())
        .context("failed to build tool catalog")?;
    let client = WebexHttpClient::new(&config).context("failed to create Webex client")?;

    let service = WebexMcpService::new(registry, Arc::new(client));
    let server = service.serve(stdio()).await?;
    server.waiting().await?;

    info!("Webex MCP server stopped");
    Ok(())
}
