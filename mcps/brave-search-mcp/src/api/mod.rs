//! Brave Search API access
//!
//! [`BraveApi`] is the seam between the tools and the upstream service.
//! [`client::BraveClient`] implements it over HTTP; tests substitute a
//! recording double.

use async_trait::async_trait;
use thiserror::Error;

pub mod client;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use client::BraveClient;
pub use types::*;

/// Hard upper bound on ids per `/local/pois` or `/local/descriptions` call
pub const MAX_IDS_PER_CALL: usize = 20;

/// Default cap on a single image download
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Errors raised while talking to the Brave Search API
#[derive(Error, Debug)]
pub enum BraveError {
    /// The API answered with a non-2xx status
    #[error("Error fetching {endpoint} Status:{status} Status Text:{status_text}")]
    Status {
        /// Endpoint path, e.g. `/local/pois`
        endpoint: String,
        status: u16,
        status_text: String,
    },

    /// The request could not be sent or the body could not be read/decoded
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// A batched lookup was asked for more ids than one call accepts
    #[error("{endpoint} accepts at most {max} ids per call, got {count}")]
    TooManyIds {
        endpoint: String,
        count: usize,
        max: usize,
    },

    /// `/local/pois` returned a different number of records than ids requested
    #[error("POI response has {returned} records for {requested} requested ids; cannot attach ids by position")]
    MisalignedPois { requested: usize, returned: usize },

    /// A downloaded image exceeded the configured size limit
    #[error("image at {url} is too large: {size} bytes (max: {max} bytes)")]
    ImageTooLarge { url: String, size: usize, max: usize },

    /// The base URL or an endpoint could not be parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Result type alias for Brave API operations
pub type BraveResult<T> = Result<T, BraveError>;

/// Operations offered by the Brave Search API
#[async_trait]
pub trait BraveApi: Send + Sync {
    /// `/web/search`, optionally filtered to location results
    async fn web_search(&self, request: &WebSearchRequest) -> BraveResult<WebSearchResponse>;

    /// `/news/search`
    async fn news_search(&self, request: &NewsSearchRequest) -> BraveResult<NewsSearchResponse>;

    /// `/videos/search` with strict safe search
    async fn video_search(&self, query: &str, count: u32) -> BraveResult<VideoSearchResponse>;

    /// `/images/search` with strict safe search
    async fn image_search(&self, query: &str, count: u32) -> BraveResult<ImageSearchResponse>;

    /// `/local/pois` for at most [`MAX_IDS_PER_CALL`] ids
    async fn local_pois(&self, ids: &[LocationId]) -> BraveResult<PoiResponse>;

    /// `/local/descriptions` for at most [`MAX_IDS_PER_CALL`] ids
    async fn local_descriptions(&self, ids: &[LocationId]) -> BraveResult<DescriptionsResponse>;

    /// Download an image referenced by a search result
    async fn fetch_image(&self, url: &str) -> BraveResult<FetchedImage>;
}
