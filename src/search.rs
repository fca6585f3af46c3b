//! Request-style entry point
//!
//! A [`SearchRequest`] carries the same parameters a web front end would send
//! (`search`, `location`, `distance`, ...). [`run_search`] executes each
//! request as its own tokio task, so a long multi-page crawl never holds up
//! another caller. Crawls share only the read-only HTTP client.

use crate::crawler::{Coordinator, ProgressSink};
use crate::output::ListingCollection;
use crate::query::{SearchSpec, DEFAULT_RADIUS};
use crate::Result;
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

fn default_distance() -> u32 {
    DEFAULT_RADIUS
}

/// A numeric request value as sent by JSON bodies or form/query strings
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

/// Reads an optional number that may arrive as text; `""` means absent
fn empty_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse().map(Some).map_err(serde::de::Error::custom)
            }
        }
    }
}

/// Reads the search radius; absent or `""` falls back to the default
fn distance_or_default<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(empty_as_none(deserializer)?.unwrap_or(DEFAULT_RADIUS))
}

/// Parameters of one search request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchRequest {
    /// Free-text query
    pub search: String,

    /// Location the distance is measured from
    #[serde(default)]
    pub location: Option<String>,

    /// Search radius in kilometres
    #[serde(default = "default_distance", deserialize_with = "distance_or_default")]
    pub distance: u32,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_price: Option<u64>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_price: Option<u64>,

    /// Site-specific ordering code
    #[serde(default, deserialize_with = "empty_as_none")]
    pub order: Option<u32>,

    /// Maximum number of listings to return
    #[serde(default, deserialize_with = "empty_as_none")]
    pub results_limit: Option<u64>,

    /// Number of results to skip
    #[serde(default, deserialize_with = "empty_as_none")]
    pub start: Option<u64>,
}

impl SearchRequest {
    /// Creates a request for `search` with every optional parameter absent
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            location: None,
            distance: DEFAULT_RADIUS,
            min_price: None,
            max_price: None,
            order: None,
            results_limit: None,
            start: None,
        }
    }

    /// Converts the request into the crawler's search description
    pub fn into_spec(self) -> SearchSpec {
        SearchSpec {
            query: self.search,
            location: self.location,
            radius: self.distance,
            min_price: self.min_price,
            max_price: self.max_price,
            order: self.order,
            start: self.start,
            limit: self.results_limit,
        }
    }
}

/// Runs one search on its own task and returns the collected listings
///
/// # Errors
///
/// Transport and parse failures of the crawl are returned unchanged. A crawl
/// task that panics surfaces as `ScoutError::Task`.
pub async fn run_search(
    coordinator: &Coordinator,
    request: SearchRequest,
    progress: Arc<dyn ProgressSink>,
) -> Result<ListingCollection> {
    let coordinator = coordinator.clone();
    let spec = request.into_spec();

    let handle = tokio::spawn(async move { coordinator.crawl(&spec, progress.as_ref()).await });

    handle.await?
}

/// Runs one search and returns the listings encoded as JSON
pub async fn search_json(
    coordinator: &Coordinator,
    request: SearchRequest,
    progress: Arc<dyn ProgressSink>,
    pretty: bool,
) -> Result<String> {
    run_search(coordinator, request, progress)
        .await?
        .to_json(pretty)
}
