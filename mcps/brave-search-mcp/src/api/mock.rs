//! Recording test double for [`BraveApi`]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use super::*;

/// One call received by [`MockApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Web(WebSearchRequest),
    News(NewsSearchRequest),
    Video { query: String, count: u32 },
    Images { query: String, count: u32 },
    Pois(Vec<LocationId>),
    Descriptions(Vec<LocationId>),
    FetchImage(String),
}

/// Canned Brave API
///
/// - location searches return `location_ids`
/// - plain web searches return `web_results`
/// - `/local/pois` returns one record titled `Place <id>` per requested id,
///   minus `poi_shortfall` records from the end
/// - `/local/descriptions` answers in reverse request order and skips ids in
///   `missing_descriptions`
#[derive(Default)]
pub struct MockApi {
    pub location_ids: Vec<String>,
    pub web_results: Vec<WebResult>,
    pub news_results: Vec<NewsResult>,
    pub video_results: Vec<VideoResult>,
    pub image_results: Vec<ImageResult>,
    pub missing_descriptions: HashSet<String>,
    pub poi_shortfall: usize,
    pub fail_pois_with: Option<u16>,
    pub fail_web_with: Option<u16>,
    pub failing_image_urls: HashSet<String>,
    pub(crate) calls: Mutex<Vec<ApiCall>>,
}

impl MockApi {
    pub fn with_locations(count: usize) -> Self {
        Self {
            location_ids: (0..count).map(|i| format!("loc-{i}")).collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn poi_calls(&self) -> Vec<Vec<LocationId>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::Pois(ids) => Some(ids),
                _ => None,
            })
            .collect()
    }

    pub fn description_calls(&self) -> Vec<Vec<LocationId>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::Descriptions(ids) => Some(ids),
                _ => None,
            })
            .collect()
    }

    pub fn web_calls(&self) -> Vec<WebSearchRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::Web(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn status_error(endpoint: &str, status: u16) -> BraveError {
        BraveError::Status {
            endpoint: endpoint.to_string(),
            status,
            status_text: "Mock Failure".to_string(),
        }
    }
}

pub fn web_result(title: &str) -> WebResult {
    WebResult {
        title: title.to_string(),
        url: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
        description: Some(format!("About {title}")),
    }
}

#[async_trait]
impl BraveApi for MockApi {
    async fn web_search(&self, request: &WebSearchRequest) -> BraveResult<WebSearchResponse> {
        self.record(ApiCall::Web(request.clone()));
        if let Some(status) = self.fail_web_with {
            return Err(Self::status_error("/web/search", status));
        }

        if request.result_filter == Some("locations") {
            let results = self
                .location_ids
                .iter()
                .map(|id| LocationResult {
                    id: LocationId(id.clone()),
                })
                .collect();
            return Ok(WebSearchResponse {
                web: None,
                locations: Some(ResultList { results }),
            });
        }

        Ok(WebSearchResponse {
            web: Some(ResultList {
                results: self.web_results.clone(),
            }),
            locations: None,
        })
    }

    async fn news_search(&self, request: &NewsSearchRequest) -> BraveResult<NewsSearchResponse> {
        self.record(ApiCall::News(request.clone()));
        Ok(NewsSearchResponse {
            results: self.news_results.clone(),
        })
    }

    async fn video_search(&self, query: &str, count: u32) -> BraveResult<VideoSearchResponse> {
        self.record(ApiCall::Video {
            query: query.to_string(),
            count,
        });
        Ok(VideoSearchResponse {
            results: self.video_results.clone(),
        })
    }

    async fn image_search(&self, query: &str, count: u32) -> BraveResult<ImageSearchResponse> {
        self.record(ApiCall::Images {
            query: query.to_string(),
            count,
        });
        Ok(ImageSearchResponse {
            results: self.image_results.clone(),
        })
    }

    async fn local_pois(&self, ids: &[LocationId]) -> BraveResult<PoiResponse> {
        self.record(ApiCall::Pois(ids.to_vec()));
        if let Some(status) = self.fail_pois_with {
            return Err(Self::status_error("/local/pois", status));
        }

        let returned = ids.len().saturating_sub(self.poi_shortfall);
        let results = ids[..returned]
            .iter()
            .map(|id| PoiRecord {
                title: Some(format!("Place {id}")),
                ..PoiRecord::default()
            })
            .collect();
        Ok(PoiResponse { results })
    }

    async fn local_descriptions(&self, ids: &[LocationId]) -> BraveResult<DescriptionsResponse> {
        self.record(ApiCall::Descriptions(ids.to_vec()));
        let results = ids
            .iter()
            .rev()
            .filter(|id| !self.missing_descriptions.contains(id.as_str()))
            .map(|id| PoiDescription {
                id: id.clone(),
                description: Some(format!("Description of {id}")),
            })
            .collect();
        Ok(DescriptionsResponse { results })
    }

    async fn fetch_image(&self, url: &str) -> BraveResult<FetchedImage> {
        self.record(ApiCall::FetchImage(url.to_string()));
        if self.failing_image_urls.contains(url) {
            return Err(Self::status_error(url, 404));
        }
        Ok(FetchedImage {
            bytes: url.as_bytes().to_vec(),
            mime_type: "image/jpeg".to_string(),
        })
    }
}
