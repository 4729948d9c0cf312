//! MCP Server implementation for Brave Search

use std::sync::Arc;

use mcp_common::{
    async_trait, resource_not_found, EmbeddableError, EmbeddableMcp, EmbeddableResult, McpError,
    ResultExt,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        AnnotateAble, CallToolResult, ListResourcesResult, PaginatedRequestParam, RawResource,
        ReadResourceRequestParam, ReadResourceResult, Resource, ResourceContents,
        ServerCapabilities, ServerInfo, SetLevelRequestParam, Tool,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, Peer, RoleServer,
};
use serde_json::{json, Value};

use crate::api::{BraveApi, BraveClient};
use crate::config::{Config, SearchConfig};
use crate::handlers;
use crate::images::{image_uri, title_from_uri, ImageRegistry};
use crate::notify::{ClientNotifier, LogLevelFilter, PeerNotifier, SilentNotifier};
use crate::params::*;

const INSTRUCTIONS: &str = "Brave Search MCP server. Provides web, news, video and image \
     search plus local business lookups through the Brave Search API. Images returned by \
     brave_image_search stay readable as brave-image:// resources.";

/// The Brave Search MCP Server
#[derive(Clone)]
pub struct BraveSearchMcpServer {
    api: Arc<dyn BraveApi>,
    images: ImageRegistry,
    search: SearchConfig,
    log_filter: LogLevelFilter,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl BraveSearchMcpServer {
    /// Build a server talking to the Brave Search API over HTTP
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = BraveClient::new(&config.brave, config.api_key()?)?
            .with_max_image_bytes(config.images.max_image_bytes);
        Ok(Self::with_api(Arc::new(client), config))
    }

    /// Build a server over any [`BraveApi`] implementation
    pub fn with_api(api: Arc<dyn BraveApi>, config: &Config) -> Self {
        Self {
            api,
            images: ImageRegistry::new(config.images.cache_capacity),
            search: config.search.clone(),
            log_filter: LogLevelFilter::default(),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Performs a web search using the Brave Search API. Use it for general queries, \
                       articles and online content. Supports pagination through offset and a \
                       freshness filter. At most 20 results per request."
    )]
    async fn brave_web_search(
        &self,
        peer: Peer<RoleServer>,
        Parameters(params): Parameters<WebSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.web_search(params, &self.peer_notifier(peer)).await
    }

    #[tool(
        description = "Searches for images using the Brave Search API and returns up to 3 of them. \
                       Each image is also exposed as a brave-image://<title> resource."
    )]
    async fn brave_image_search(
        &self,
        peer: Peer<RoleServer>,
        Parameters(params): Parameters<ImageSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.image_search(params, &self.peer_notifier(peer)).await
    }

    #[tool(
        description = "Searches news articles using the Brave Search API. Use it for current events \
                       and breaking news. Results include the article age."
    )]
    async fn brave_news_search(
        &self,
        peer: Peer<RoleServer>,
        Parameters(params): Parameters<NewsSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.news_search(params, &self.peer_notifier(peer)).await
    }

    #[tool(
        description = "Searches videos using the Brave Search API. Results include duration, \
                       view count and creator when known."
    )]
    async fn brave_video_search(
        &self,
        peer: Peer<RoleServer>,
        Parameters(params): Parameters<VideoSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.video_search(params, &self.peer_notifier(peer)).await
    }

    #[tool(
        description = "Searches for local businesses and places (restaurants, shops, services) \
                       using the Brave Local Search API. Returns name, address, phone, rating, \
                       opening hours and a description per place. Use it when the query mentions \
                       a location or 'near me'. Falls back to web search when no places are found."
    )]
    async fn brave_local_search(
        &self,
        peer: Peer<RoleServer>,
        Parameters(params): Parameters<LocalSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.local_search(params, &self.peer_notifier(peer)).await
    }

    fn peer_notifier(&self, peer: Peer<RoleServer>) -> PeerNotifier {
        PeerNotifier::new(peer, self.log_filter.clone())
    }

    async fn web_search(
        &self,
        params: WebSearchParams,
        notifier: &dyn ClientNotifier,
    ) -> Result<CallToolResult, McpError> {
        handlers::web_search(self.api.as_ref(), notifier, params, self.search.default_count).await
    }

    async fn image_search(
        &self,
        params: ImageSearchParams,
        notifier: &dyn ClientNotifier,
    ) -> Result<CallToolResult, McpError> {
        handlers::image_search(self.api.as_ref(), notifier, &self.images, params).await
    }

    async fn news_search(
        &self,
        params: NewsSearchParams,
        notifier: &dyn ClientNotifier,
    ) -> Result<CallToolResult, McpError> {
        handlers::news_search(self.api.as_ref(), notifier, params, self.search.default_count).await
    }

    async fn video_search(
        &self,
        params: VideoSearchParams,
        notifier: &dyn ClientNotifier,
    ) -> Result<CallToolResult, McpError> {
        handlers::video_search(self.api.as_ref(), notifier, params, self.search.default_count)
            .await
    }

    async fn local_search(
        &self,
        params: LocalSearchParams,
        notifier: &dyn ClientNotifier,
    ) -> Result<CallToolResult, McpError> {
        handlers::local_search(
            self.api.as_ref(),
            notifier,
            params,
            self.search.local_default_count,
            &self.search.local_settings(),
        )
        .await
    }

    /// One resource per cached image, oldest first
    pub async fn image_resources(&self) -> Vec<Resource> {
        self.images
            .list()
            .await
            .into_iter()
            .map(|(title, mime_type)| {
                let mut resource = RawResource::new(image_uri(&title), title);
                resource.mime_type = Some(mime_type);
                resource.no_annotation()
            })
            .collect()
    }

    /// Contents of a `brave-image://` resource
    pub async fn read_image(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        let Some(title) = title_from_uri(uri) else {
            return Err(resource_not_found(uri));
        };
        let Some(image) = self.images.get(title).await else {
            tracing::debug!(uri, "Image resource not cached");
            return Err(resource_not_found(uri));
        };

        let contents: ResourceContents = serde_json::from_value(json!({
            "uri": uri,
            "mimeType": image.mime_type,
            "blob": image.data,
        }))
        .to_mcp_err()?;

        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for BraveSearchMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder()
                .enable_logging()
                .enable_resources()
                .enable_resources_list_changed()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(
            self.image_resources().await,
        ))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        self.read_image(&request.uri).await
    }

    async fn set_level(
        &self,
        request: SetLevelRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<(), McpError> {
        tracing::debug!(level = ?request.level, "Client set log level");
        self.log_filter.set(&request.level);
        Ok(())
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for BraveSearchMcpServer {
    fn server_name(&self) -> &str {
        "brave-search"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "brave_web_search" => {
                let params: WebSearchParams = serde_json::from_value(params)?;
                self.web_search(params, &SilentNotifier)
                    .await
                    .map_err(Into::into)
            }

            "brave_image_search" => {
                let params: ImageSearchParams = serde_json::from_value(params)?;
                self.image_search(params, &SilentNotifier)
                    .await
                    .map_err(Into::into)
            }

            "brave_news_search" => {
                let params: NewsSearchParams = serde_json::from_value(params)?;
                self.news_search(params, &SilentNotifier)
                    .await
                    .map_err(Into::into)
            }

            "brave_video_search" => {
                let params: VideoSearchParams = serde_json::from_value(params)?;
                self.video_search(params, &SilentNotifier)
                    .await
                    .map_err(Into::into)
            }

            "brave_local_search" => {
                let params: LocalSearchParams = serde_json::from_value(params)?;
                self.local_search(params, &SilentNotifier)
                    .await
                    .map_err(Into::into)
            }

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}
