//! Brave Search API request and response types
//!
//! Response types only model the fields the formatters read. Optional fields
//! are decoded leniently: a value of the wrong shape becomes `None` instead of
//! failing the whole response, so one malformed record degrades to
//! placeholders rather than an error.

use std::fmt;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Decode an optional field, treating a malformed value as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// ============================================================================
// Requests
// ============================================================================

/// Freshness filter accepted by the web and news endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    /// Discovered within the last 24 hours
    Pd,
    /// Discovered within the last 7 days
    Pw,
    /// Discovered within the last 31 days
    Pm,
    /// Discovered within the last 365 days
    Py,
}

impl Freshness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Freshness::Pd => "pd",
            Freshness::Pw => "pw",
            Freshness::Pm => "pm",
            Freshness::Py => "py",
        }
    }
}

/// A `/web/search` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSearchRequest {
    pub query: String,
    pub count: u32,
    pub offset: u32,
    pub freshness: Option<Freshness>,
    /// Restricts the response to one result type, e.g. `locations`
    pub result_filter: Option<&'static str>,
}

impl WebSearchRequest {
    pub fn new(query: impl Into<String>, count: u32, offset: u32) -> Self {
        Self {
            query: query.into(),
            count,
            offset,
            freshness: None,
            result_filter: None,
        }
    }

    /// A search that only asks for location results
    pub fn locations(query: impl Into<String>, count: u32) -> Self {
        Self {
            result_filter: Some("locations"),
            ..Self::new(query, count, 0)
        }
    }

    pub fn with_freshness(mut self, freshness: Option<Freshness>) -> Self {
        self.freshness = freshness;
        self
    }
}

/// A `/news/search` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSearchRequest {
    pub query: String,
    pub count: u32,
    pub freshness: Option<Freshness>,
}

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque identifier of a location result
///
/// The only valid key for the batched POI and description lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(id: &str) -> Self {
        LocationId(id.to_string())
    }
}

// ============================================================================
// Web search
// ============================================================================

/// A list wrapper used by several response sections
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ResultList<T> {
    #[serde(default)]
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebSearchResponse {
    #[serde(default)]
    pub web: Option<ResultList<WebResult>>,
    #[serde(default)]
    pub locations: Option<ResultList<LocationResult>>,
}

impl WebSearchResponse {
    /// Ids of the location results, in response order
    pub fn location_ids(&self) -> Vec<LocationId> {
        self.locations
            .as_ref()
            .map(|l| l.results.iter().map(|r| r.id.clone()).collect())
            .unwrap_or_default()
    }

    pub fn web_results(&self) -> &[WebResult] {
        self.web.as_ref().map(|w| w.results.as_slice()).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationResult {
    pub id: LocationId,
}

// ============================================================================
// News
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsSearchResponse {
    #[serde(default)]
    pub results: Vec<NewsResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub age: Option<String>,
}

// ============================================================================
// Videos
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoSearchResponse {
    #[serde(default)]
    pub results: Vec<VideoResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub age: Option<String>,
    #[serde(default)]
    pub video: VideoData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoData {
    #[serde(default, deserialize_with = "lenient")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub views: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub creator: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub requires_subscription: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub tags: Option<Vec<String>>,
}

// ============================================================================
// Images
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageSearchResponse {
    #[serde(default)]
    pub results: Vec<ImageResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "lenient")]
    pub properties: Option<ImageProperties>,
}

impl ImageResult {
    /// Direct URL of the full-size image
    pub fn image_url(&self) -> Option<&str> {
        self.properties.as_ref().and_then(|p| p.url.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageProperties {
    #[serde(default)]
    pub url: Option<String>,
}

/// Raw bytes of a downloaded image
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

// ============================================================================
// Local POIs
// ============================================================================

/// Response of `/local/pois`
///
/// Records do not carry their id; they come back in request order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoiResponse {
    #[serde(default)]
    pub results: Vec<PoiRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoiRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub serves_cuisine: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub postal_address: Option<PostalAddress>,
    #[serde(default, deserialize_with = "lenient")]
    pub contact: Option<Contact>,
    #[serde(default, deserialize_with = "lenient")]
    pub price_range: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<Rating>,
    #[serde(default, deserialize_with = "lenient")]
    pub opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostalAddress {
    #[serde(rename = "displayAddress", default, deserialize_with = "lenient")]
    pub display_address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "lenient")]
    pub telephone: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rating {
    #[serde(rename = "ratingValue", default, deserialize_with = "lenient")]
    pub rating_value: Option<f64>,
    #[serde(rename = "reviewCount", default, deserialize_with = "lenient")]
    pub review_count: Option<u64>,
}

/// Weekly schedule of a POI
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpeningHours {
    /// Today's intervals
    #[serde(default)]
    pub current_day: Vec<DaySlot>,
    /// One entry per open day, each holding that day's intervals
    #[serde(default)]
    pub days: Vec<Vec<DaySlot>>,
}

/// One opening interval on one day
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DaySlot {
    #[serde(default)]
    pub abbr_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub opens: Option<String>,
    #[serde(default)]
    pub closes: Option<String>,
}

/// Response of `/local/descriptions`, independently ordered
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DescriptionsResponse {
    #[serde(default)]
    pub results: Vec<PoiDescription>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoiDescription {
    pub id: LocationId,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}
