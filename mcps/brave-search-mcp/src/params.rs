//! Parameter types for Brave Search MCP tools

use mcp_common::{invalid_params, McpError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::Freshness;

/// Upper bound for `count` on the web, news, video and local tools
pub const MAX_COUNT: u32 = 20;
/// Upper bound for `count` on the image tool
pub const MAX_IMAGE_COUNT: u32 = 3;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchParams {
    #[schemars(description = "Search query (max 400 chars, 50 words)")]
    pub query: String,

    #[schemars(description = "Number of results (1-20, default 10)")]
    #[serde(default)]
    pub count: Option<u32>,

    #[schemars(description = "Pagination offset (default 0)")]
    #[serde(default)]
    pub offset: Option<u32>,

    #[schemars(
        description = "Restrict results by age: pd (24 hours), pw (7 days), pm (31 days), py (365 days)"
    )]
    #[serde(default)]
    pub freshness: Option<Freshness>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct NewsSearchParams {
    #[schemars(description = "News search query")]
    pub query: String,

    #[schemars(description = "Number of results (1-20, default 10)")]
    #[serde(default)]
    pub count: Option<u32>,

    #[schemars(
        description = "Restrict results by age: pd (24 hours), pw (7 days), pm (31 days), py (365 days)"
    )]
    #[serde(default)]
    pub freshness: Option<Freshness>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct VideoSearchParams {
    #[schemars(description = "Video search query")]
    pub query: String,

    #[schemars(description = "Number of results (1-20, default 10)")]
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ImageSearchParams {
    #[schemars(description = "The term to search the internet for images of")]
    #[serde(rename = "searchTerm")]
    pub search_term: String,

    #[schemars(description = "Number of images to return (1-3, default 1)")]
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LocalSearchParams {
    #[schemars(description = "Local search query (e.g. 'pizza near Central Park')")]
    pub query: String,

    #[schemars(description = "Number of results (1-20, default 10)")]
    #[serde(default)]
    pub count: Option<u32>,
}

fn require_query<'a>(field: &str, value: &'a str) -> Result<&'a str, McpError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid_params(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}

fn resolve_count(count: Option<u32>, default: u32, max: u32) -> Result<u32, McpError> {
    match count {
        None => Ok(default),
        Some(n) if (1..=max).contains(&n) => Ok(n),
        Some(n) => Err(invalid_params(format!(
            "count must be between 1 and {max}, got {n}"
        ))),
    }
}

impl WebSearchParams {
    /// Validated query and count, filling in `default_count`
    pub fn validate(&self, default_count: u32) -> Result<(&str, u32), McpError> {
        Ok((
            require_query("query", &self.query)?,
            resolve_count(self.count, default_count, MAX_COUNT)?,
        ))
    }
}

impl NewsSearchParams {
    pub fn validate(&self, default_count: u32) -> Result<(&str, u32), McpError> {
        Ok((
            require_query("query", &self.query)?,
            resolve_count(self.count, default_count, MAX_COUNT)?,
        ))
    }
}

impl VideoSearchParams {
    pub fn validate(&self, default_count: u32) -> Result<(&str, u32), McpError> {
        Ok((
            require_query("query", &self.query)?,
            resolve_count(self.count, default_count, MAX_COUNT)?,
        ))
    }
}

impl ImageSearchParams {
    pub fn validate(&self) -> Result<(&str, u32), McpError> {
        Ok((
            require_query("searchTerm", &self.search_term)?,
            resolve_count(self.count, 1, MAX_IMAGE_COUNT)?,
        ))
    }
}

impl LocalSearchParams {
    pub fn validate(&self, default_count: u32) -> Result<(&str, u32), McpError> {
        Ok((
            require_query("query", &self.query)?,
            resolve_count(self.count, default_count, MAX_COUNT)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_applied() {
        let params: LocalSearchParams =
            serde_json::from_value(json!({"query": "pizza near Central Park"})).unwrap();
        assert_eq!(params.validate(10).unwrap(), ("pizza near Central Park", 10));
    }

    #[test]
    fn test_count_bounds() {
        let params = WebSearchParams {
            query: "rust".into(),
            count: Some(21),
            offset: None,
            freshness: None,
        };
        assert!(params.validate(10).is_err());

        let params = WebSearchParams {
            count: Some(0),
            ..params
        };
        assert!(params.validate(10).is_err());

        let params = WebSearchParams {
            count: Some(20),
            ..params
        };
        assert_eq!(params.validate(10).unwrap().1, 20);
    }

    #[test]
    fn test_blank_query_rejected() {
        let params = VideoSearchParams {
            query: "   ".into(),
            count: None,
        };
        let err = params.validate(10).unwrap_err();
        assert!(err.message.contains("query must not be empty"));
    }

    #[test]
    fn test_image_params_use_camel_case_term() {
        let params: ImageSearchParams =
            serde_json::from_value(json!({"searchTerm": "golden gate", "count": 3})).unwrap();
        assert_eq!(params.validate().unwrap(), ("golden gate", 3));

        let too_many: ImageSearchParams =
            serde_json::from_value(json!({"searchTerm": "golden gate", "count": 4})).unwrap();
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_freshness_parses_lowercase() {
        let params: NewsSearchParams =
            serde_json::from_value(json!({"query": "elections", "freshness": "pw"})).unwrap();
        assert_eq!(params.freshness, Some(Freshness::Pw));

        let bad = serde_json::from_value::<NewsSearchParams>(
            json!({"query": "elections", "freshness": "weekly"}),
        );
        assert!(bad.is_err());
    }
}
