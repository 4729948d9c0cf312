//! HTTP implementation of [`BraveApi`]
//!
//! See: https://api-dashboard.search.brave.com/app/documentation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use url::Url;

use super::{
    BraveApi, BraveError, BraveResult, DescriptionsResponse, FetchedImage, ImageSearchResponse,
    LocationId, NewsSearchRequest, NewsSearchResponse, PoiResponse, VideoSearchResponse,
    WebSearchRequest, WebSearchResponse, DEFAULT_MAX_IMAGE_BYTES, MAX_IDS_PER_CALL,
};
use crate::config::BraveConfig;

const SUBSCRIPTION_TOKEN_HEADER: &str = "X-Subscription-Token";
const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Brave Search API client
pub struct BraveClient {
    client: Client,
    base_url: Url,
    api_key: String,
    max_image_bytes: usize,
}

impl BraveClient {
    pub fn new(config: &BraveConfig, api_key: &str) -> BraveResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .build()
            .map_err(BraveError::ClientBuild)?;

        // A trailing slash keeps the version segment when joining endpoints
        let base_url = Url::parse(&format!("{}/", config.base_url.trim_end_matches('/')))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        })
    }

    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    fn endpoint_url(&self, endpoint: &str) -> BraveResult<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> BraveResult<T> {
        let url = self.endpoint_url(endpoint)?;
        tracing::debug!(%url, ?query, "Calling Brave Search API");

        let transport = |source| BraveError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .header(SUBSCRIPTION_TOKEN_HEADER, &self.api_key)
            .query(query)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BraveError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        response.json::<T>().await.map_err(transport)
    }

    fn id_query(endpoint: &str, ids: &[LocationId]) -> BraveResult<Vec<(&'static str, String)>> {
        if ids.len() > MAX_IDS_PER_CALL {
            return Err(BraveError::TooManyIds {
                endpoint: endpoint.to_string(),
                count: ids.len(),
                max: MAX_IDS_PER_CALL,
            });
        }
        Ok(ids.iter().map(|id| ("ids", id.to_string())).collect())
    }
}

#[async_trait]
impl BraveApi for BraveClient {
    async fn web_search(&self, request: &WebSearchRequest) -> BraveResult<WebSearchResponse> {
        let mut query = vec![
            ("q", request.query.clone()),
            ("count", request.count.to_string()),
            ("offset", request.offset.to_string()),
            ("safesearch", "strict".to_string()),
        ];
        if let Some(freshness) = request.freshness {
            query.push(("freshness", freshness.as_str().to_string()));
        }
        if let Some(filter) = request.result_filter {
            query.push(("result_filter", filter.to_string()));
        }

        self.get_json("/web/search", &query).await
    }

    async fn news_search(&self, request: &NewsSearchRequest) -> BraveResult<NewsSearchResponse> {
        let mut query = vec![
            ("q", request.query.clone()),
            ("count", request.count.to_string()),
        ];
        if let Some(freshness) = request.freshness {
            query.push(("freshness", freshness.as_str().to_string()));
        }

        self.get_json("/news/search", &query).await
    }

    async fn video_search(&self, query: &str, count: u32) -> BraveResult<VideoSearchResponse> {
        let query = [
            ("q", query.to_string()),
            ("count", count.to_string()),
            ("safesearch", "strict".to_string()),
        ];
        self.get_json("/videos/search", &query).await
    }

    async fn image_search(&self, query: &str, count: u32) -> BraveResult<ImageSearchResponse> {
        let query = [
            ("q", query.to_string()),
            ("count", count.to_string()),
            ("safesearch", "strict".to_string()),
        ];
        self.get_json("/images/search", &query).await
    }

    async fn local_pois(&self, ids: &[LocationId]) -> BraveResult<PoiResponse> {
        let query = Self::id_query("/local/pois", ids)?;
        self.get_json("/local/pois", &query).await
    }

    async fn local_descriptions(&self, ids: &[LocationId]) -> BraveResult<DescriptionsResponse> {
        let query = Self::id_query("/local/descriptions", ids)?;
        self.get_json("/local/descriptions", &query).await
    }

    async fn fetch_image(&self, url: &str) -> BraveResult<FetchedImage> {
        let transport = |source| BraveError::Transport {
            endpoint: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BraveError::Status {
                endpoint: url.to_string(),
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        if let Some(len) = response.content_length() {
            if len as usize > self.max_image_bytes {
                return Err(BraveError::ImageTooLarge {
                    url: url.to_string(),
                    size: len as usize,
                    max: self.max_image_bytes,
                });
            }
        }

        let mime_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .filter(|v| v.starts_with("image/"))
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());

        let bytes = response.bytes().await.map_err(transport)?;
        if bytes.len() > self.max_image_bytes {
            return Err(BraveError::ImageTooLarge {
                url: url.to_string(),
                size: bytes.len(),
                max: self.max_image_bytes,
            });
        }

        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            mime_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> BraveClient {
        let config = BraveConfig {
            base_url: base_url.to_string(),
            ..BraveConfig::default()
        };
        BraveClient::new(&config, "key").unwrap()
    }

    #[test]
    fn test_endpoint_keeps_version_segment() {
        for base in [
            "https://api.search.brave.com/res/v1",
            "https://api.search.brave.com/res/v1/",
        ] {
            let url = client(base).endpoint_url("/local/pois").unwrap();
            assert_eq!(url.as_str(), "https://api.search.brave.com/res/v1/local/pois");
        }
    }

    #[test]
    fn test_id_query_repeats_key() {
        let ids = vec![LocationId::from("a"), LocationId::from("b")];
        let query = BraveClient::id_query("/local/pois", &ids).unwrap();
        assert_eq!(query, vec![("ids", "a".to_string()), ("ids", "b".to_string())]);
    }

    #[test]
    fn test_id_query_rejects_oversized_batch() {
        let ids: Vec<LocationId> = (0..=MAX_IDS_PER_CALL)
            .map(|i| LocationId(format!("id-{i}")))
            .collect();
        let err = BraveClient::id_query("/local/descriptions", &ids).unwrap_err();
        assert!(matches!(err, BraveError::TooManyIds { count: 21, max: 20, .. }));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = BraveConfig {
            base_url: "not a url".to_string(),
            ..BraveConfig::default()
        };
        assert!(matches!(
            BraveClient::new(&config, "key"),
            Err(BraveError::InvalidUrl(_))
        ));
    }
}
