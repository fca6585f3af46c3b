//! Crawler coordinator - main crawl orchestration logic
//!
//! A crawl runs in three phases:
//!
//! 1. **Discover** - fetch the first results page without an offset and read
//!    the total result count. Any failure here aborts the crawl, since there
//!    is no pagination plan without it.
//! 2. **Page** - fetch each planned page at `start + index * PAGE_SIZE` and
//!    extract its listings in document order, stopping the moment the target
//!    is reached, even in the middle of a page.
//! 3. **Stop** - the target is reached or the planned pages run out. A page
//!    that holds fewer listings than expected is tolerated.
//!
//! Fetches are strictly sequential; each page depends on how much has been
//! collected so far.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::parser::{listing_containers, parse_document, parse_result_count};
use crate::crawler::progress::ProgressSink;
use crate::extract::extract_listing;
use crate::output::ListingCollection;
use crate::query::{build_search_url, SearchSpec};
use crate::ScoutError;
use reqwest::Client;
use url::Url;

/// Number of listings the site puts on one results page
pub const PAGE_SIZE: u64 = 20;

/// Pagination plan derived from the discovered total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlPlan {
    /// Total number of results the site reports
    pub total_results: u64,

    /// Offset of the first collected result
    pub start: u64,

    /// Number of listings the crawl will collect at most
    pub target: u64,

    /// Number of pages to fetch after discovery
    pub pages: u64,
}

impl CrawlPlan {
    /// Plans a crawl over `total_results` starting at `start`, capped by `limit`
    ///
    /// A limit above what is available is clamped; a limit or total of zero
    /// yields a plan with no pages.
    ///
    /// # Example
    ///
    /// ```
    /// use bazos_scout::crawler::CrawlPlan;
    ///
    /// let plan = CrawlPlan::new(45, 0, None);
    /// assert_eq!(plan.pages, 3);
    ///
    /// let plan = CrawlPlan::new(45, 0, Some(10));
    /// assert_eq!((plan.target, plan.pages), (10, 1));
    /// ```
    pub fn new(total_results: u64, start: u64, limit: Option<u64>) -> Self {
        let available = total_results.saturating_sub(start);
        let target = limit.map_or(available, |limit| limit.min(available));
        let pages = target.div_ceil(PAGE_SIZE);

        Self {
            total_results,
            start,
            target,
            pages,
        }
    }

    /// Result offset requested for the page at `index`
    pub fn page_offset(&self, index: u64) -> u64 {
        self.start + index * PAGE_SIZE
    }
}

/// Drives one search across all of its results pages
#[derive(Debug, Clone)]
pub struct Coordinator {
    client: Client,
    search_url: Url,
}

impl Coordinator {
    /// Creates a coordinator from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Client built and search URL parsed
    /// * `Err(ScoutError)` - Invalid search URL or client construction failure
    pub fn new(config: &Config) -> Result<Self, ScoutError> {
        let search_url = Url::parse(&config.site.search_url).map_err(|e| {
            crate::ConfigError::InvalidUrl(format!(
                "Invalid search_url '{}': {}",
                config.site.search_url, e
            ))
        })?;
        let client = build_http_client(config)?;

        Ok(Self::with_client(client, search_url))
    }

    /// Creates a coordinator around an existing client
    pub fn with_client(client: Client, search_url: Url) -> Self {
        Self { client, search_url }
    }

    /// Runs a complete crawl for `spec`
    ///
    /// # Returns
    ///
    /// * `Ok(ListingCollection)` - Every collected listing, in discovery order
    /// * `Err(ScoutError)` - A transport or parse failure on any fetch; no
    ///   partial result is returned
    pub async fn crawl(
        &self,
        spec: &SearchSpec,
        progress: &dyn ProgressSink,
    ) -> Result<ListingCollection, ScoutError> {
        tracing::info!("Starting crawl for '{}'", spec.query);

        let total_results = self.discover(spec).await?;
        let plan = CrawlPlan::new(total_results, spec.start_offset(), spec.limit);
        tracing::info!(
            "Discovered {} results, collecting {} over {} pages",
            plan.total_results,
            plan.target,
            plan.pages
        );

        progress.begin(plan.target);
        let mut collection = ListingCollection::new();

        for index in 0..plan.pages {
            let offset = plan.page_offset(index);
            let url = build_search_url(&self.search_url, spec, Some(offset));
            tracing::info!("Fetching page {}/{} (offset {})", index + 1, plan.pages, offset);

            let body = fetch_page(&self.client, url.as_str()).await?;
            let found = collect_page(&body, plan.target, &mut collection, progress);

            if (collection.len() as u64) >= plan.target {
                tracing::debug!("Target of {} listings reached", plan.target);
                break;
            }
            if found < PAGE_SIZE as usize {
                tracing::debug!(
                    "Page at offset {} held only {} listings",
                    offset,
                    found
                );
            }
        }

        tracing::info!("Crawl completed: {} listings collected", collection.len());
        Ok(collection)
    }

    /// Fetches the unpaged search and reads the total result count
    async fn discover(&self, spec: &SearchSpec) -> Result<u64, ScoutError> {
        let url = build_search_url(&self.search_url, spec, None);
        tracing::debug!("Discovering result count via {}", url);

        let body = fetch_page(&self.client, url.as_str()).await?;
        Ok(parse_result_count(&body, url.as_str())?)
    }
}

/// Extracts listings from one page body into `collection`
///
/// Stops before the first container that would exceed `target`. Returns the
/// number of listing containers the page held.
fn collect_page(
    body: &str,
    target: u64,
    collection: &mut ListingCollection,
    progress: &dyn ProgressSink,
) -> usize {
    let document = parse_document(body);
    let containers = listing_containers(&document);

    for container in &containers {
        if (collection.len() as u64) >= target {
            break;
        }
        collection.push(extract_listing(container));
        progress.advance();
    }

    containers.len()
}
