//! Brave Search tool handler implementations
//!
//! Each handler validates its parameters, calls the API and renders the
//! answer. Bad parameters are protocol errors; upstream failures become
//! error-content results so the model can read them.

use base64::Engine;
use mcp_common::{multi_success, text_error, text_success, CallToolResult, Content, McpResult};
use rmcp::model::LoggingLevel;

use crate::api::{BraveApi, BraveError, NewsSearchRequest, WebSearchRequest};
use crate::format::{format_news_results, format_video_results};
use crate::images::{CachedImage, ImageRegistry};
use crate::local::{self, LocalSearchSettings};
use crate::notify::ClientNotifier;
use crate::params::*;

/// Log an upstream failure and turn it into an error-content result
async fn upstream_failure(
    notifier: &dyn ClientNotifier,
    tool: &str,
    err: BraveError,
) -> CallToolResult {
    tracing::error!(tool, error = %err, "Brave API call failed");
    let message = err.to_string();
    notifier
        .log(LoggingLevel::Error, format!("{tool}: {message}"))
        .await;
    text_error(message)
}

pub async fn web_search(
    api: &dyn BraveApi,
    notifier: &dyn ClientNotifier,
    params: WebSearchParams,
    default_count: u32,
) -> McpResult<CallToolResult> {
    let (query, count) = params.validate(default_count)?;
    let request = WebSearchRequest::new(query, count, params.offset.unwrap_or(0))
        .with_freshness(params.freshness);

    match local::web_search_text(api, &request).await {
        Ok(text) => Ok(text_success(text)),
        Err(e) => Ok(upstream_failure(notifier, "brave_web_search", e).await),
    }
}

pub async fn news_search(
    api: &dyn BraveApi,
    notifier: &dyn ClientNotifier,
    params: NewsSearchParams,
    default_count: u32,
) -> McpResult<CallToolResult> {
    let (query, count) = params.validate(default_count)?;
    let request = NewsSearchRequest {
        query: query.to_string(),
        count,
        freshness: params.freshness,
    };

    match api.news_search(&request).await {
        Ok(response) => Ok(text_success(format_news_results(query, &response.results))),
        Err(e) => Ok(upstream_failure(notifier, "brave_news_search", e).await),
    }
}

pub async fn video_search(
    api: &dyn BraveApi,
    notifier: &dyn ClientNotifier,
    params: VideoSearchParams,
    default_count: u32,
) -> McpResult<CallToolResult> {
    let (query, count) = params.validate(default_count)?;

    match api.video_search(query, count).await {
        Ok(response) => Ok(text_success(format_video_results(query, &response.results))),
        Err(e) => Ok(upstream_failure(notifier, "brave_video_search", e).await),
    }
}

pub async fn local_search(
    api: &dyn BraveApi,
    notifier: &dyn ClientNotifier,
    params: LocalSearchParams,
    default_count: u32,
    settings: &LocalSearchSettings,
) -> McpResult<CallToolResult> {
    let (query, count) = params.validate(default_count)?;

    match local::local_search(api, notifier, query, count, settings).await {
        Ok(text) => Ok(text_success(text)),
        Err(e) => Ok(upstream_failure(notifier, "brave_local_search", e).await),
    }
}

/// Search images, download them and keep them for `brave-image://` reads
pub async fn image_search(
    api: &dyn BraveApi,
    notifier: &dyn ClientNotifier,
    images: &ImageRegistry,
    params: ImageSearchParams,
) -> McpResult<CallToolResult> {
    let (term, count) = params.validate()?;

    let response = match api.image_search(term, count).await {
        Ok(response) => response,
        Err(e) => return Ok(upstream_failure(notifier, "brave_image_search", e).await),
    };

    if response.results.is_empty() {
        return Ok(text_success(format!("No image results found for \"{term}\"")));
    }

    let mut contents = Vec::new();
    let mut failures = 0usize;

    for result in response.results.iter().take(count as usize) {
        let Some(url) = result.image_url() else {
            tracing::warn!(title = %result.title, "Image result has no image URL, skipping");
            failures += 1;
            continue;
        };

        let fetched = match api.fetch_image(url).await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!(url, error = %e, "Failed to download image, skipping");
                failures += 1;
                continue;
            }
        };

        let data = base64::engine::general_purpose::STANDARD.encode(&fetched.bytes);
        let title = if result.title.is_empty() {
            url.to_string()
        } else {
            result.title.clone()
        };

        images
            .insert(
                title,
                CachedImage {
                    mime_type: fetched.mime_type.clone(),
                    data: data.clone(),
                },
            )
            .await;
        contents.push(Content::image(data, fetched.mime_type));
    }

    if contents.is_empty() {
        tracing::error!(term, failures, "No image could be downloaded");
        return Ok(text_error(format!(
            "Failed to download any of the {failures} image results for \"{term}\""
        )));
    }

    tracing::debug!(term, returned = contents.len(), failures, "Image search complete");
    notifier.resource_list_changed().await;
    Ok(multi_success(contents))
}
