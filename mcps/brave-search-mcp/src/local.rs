//! Local (POI) search aggregation
//!
//! A location-filtered web search yields location ids. Those ids are looked
//! up in two batched endpoints, POI data and POI descriptions, and the two
//! answers are merged into one text block per place. When the location
//! search yields nothing, the query is answered by a plain web search.

use std::collections::HashMap;

use rmcp::model::LoggingLevel;
use serde::{Deserialize, Serialize};

use crate::api::{
    BraveApi, BraveError, BraveResult, LocationId, PoiDescription, PoiRecord, WebSearchRequest,
    MAX_IDS_PER_CALL,
};
use crate::format::{format_poi, format_web_results, BLOCK_SEPARATOR};
use crate::notify::ClientNotifier;

/// How location ids are selected for the batched lookups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// Keep only the first `count` ids, in batches of at most the batch size
    TruncateToCount,
    /// Look up every returned id, in batches of at most the batch size
    #[default]
    ChunkAll,
}

/// Settings of the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSearchSettings {
    pub policy: IdPolicy,
    /// Ids per batched call, `1..=MAX_IDS_PER_CALL`
    pub batch_size: usize,
}

impl Default for LocalSearchSettings {
    fn default() -> Self {
        Self {
            policy: IdPolicy::default(),
            batch_size: MAX_IDS_PER_CALL,
        }
    }
}

/// A POI record joined with its description, if one was returned
#[derive(Debug, Clone)]
pub struct MergedPoiView {
    pub id: LocationId,
    pub record: PoiRecord,
    pub description: Option<String>,
}

/// Search for places matching `query`, falling back to web search
pub async fn local_search(
    api: &dyn BraveApi,
    notifier: &dyn ClientNotifier,
    query: &str,
    count: u32,
    settings: &LocalSearchSettings,
) -> BraveResult<String> {
    let response = api
        .web_search(&WebSearchRequest::locations(query, count))
        .await?;
    let ids = response.location_ids();

    if ids.is_empty() {
        tracing::info!(
            query,
            "No location results, falling back to web search (local search requires a Pro plan)"
        );
        notifier
            .log(
                LoggingLevel::Info,
                format!("No location results for \"{query}\", falling back to web search"),
            )
            .await;
        return web_search_text(api, &WebSearchRequest::new(query, count, 0)).await;
    }

    let total = ids.len();
    let groups = select_id_groups(ids, count, settings);
    tracing::debug!(
        query,
        total,
        used = groups.iter().map(Vec::len).sum::<usize>(),
        batches = groups.len(),
        "Resolved location ids"
    );

    let mut blocks = Vec::new();
    for group in &groups {
        let (pois, descriptions) =
            tokio::try_join!(api.local_pois(group), api.local_descriptions(group))?;

        let located = attach_ids(group, pois.results)?;
        blocks.extend(merge(located, descriptions.results).iter().map(format_poi));
    }

    Ok(blocks.join(BLOCK_SEPARATOR))
}

/// Run a plain web search and render it
pub async fn web_search_text(api: &dyn BraveApi, request: &WebSearchRequest) -> BraveResult<String> {
    let response = api.web_search(request).await?;
    Ok(format_web_results(&request.query, response.web_results()))
}

/// Split location ids into the batches sent to the POI endpoints
pub fn select_id_groups(
    mut ids: Vec<LocationId>,
    count: u32,
    settings: &LocalSearchSettings,
) -> Vec<Vec<LocationId>> {
    let batch_size = settings.batch_size.clamp(1, MAX_IDS_PER_CALL);

    if settings.policy == IdPolicy::TruncateToCount {
        ids.truncate(count as usize);
    }

    ids.chunks(batch_size).map(<[LocationId]>::to_vec).collect()
}

/// Pair POI records with the ids they were requested for
///
/// `/local/pois` does not echo ids back; records are assumed to follow the
/// request order. A length mismatch means that assumption broke, so it is an
/// error rather than a silent misalignment.
pub fn attach_ids(
    ids: &[LocationId],
    records: Vec<PoiRecord>,
) -> BraveResult<Vec<(LocationId, PoiRecord)>> {
    if ids.len() != records.len() {
        return Err(BraveError::MisalignedPois {
            requested: ids.len(),
            returned: records.len(),
        });
    }

    Ok(ids.iter().cloned().zip(records).collect())
}

/// Join located POI records with descriptions by id, keeping POI order
pub fn merge(
    located: Vec<(LocationId, PoiRecord)>,
    descriptions: Vec<PoiDescription>,
) -> Vec<MergedPoiView> {
    let mut by_id: HashMap<LocationId, Option<String>> = descriptions
        .into_iter()
        .map(|d| (d.id, d.description))
        .collect();

    located
        .into_iter()
        .map(|(id, record)| {
            let description = by_id.remove(&id).flatten();
            MergedPoiView {
                id,
                record,
                description,
            }
        })
        .collect()
}
