//! Crawler module for results page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of results pages
//! - Result count discovery and listing container lookup
//! - Progress reporting
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod progress;

pub use coordinator::{Coordinator, CrawlPlan, PAGE_SIZE};
pub use fetcher::{build_http_client, fetch_page, user_agent};
pub use parser::{listing_containers, parse_document, parse_result_count};
pub use progress::{LogProgress, NoProgress, ProgressSink};

use crate::config::Config;
use crate::output::ListingCollection;
use crate::query::SearchSpec;
use crate::ScoutError;

/// Runs a complete crawl operation
///
/// This is the simplest entry point for a single search. It will:
/// 1. Build the HTTP client from `config`
/// 2. Discover the total result count
/// 3. Fetch the planned pages and extract their listings
///
/// # Example
///
/// ```no_run
/// use bazos_scout::config::Config;
/// use bazos_scout::crawler::crawl;
/// use bazos_scout::query::SearchSpec;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut spec = SearchSpec::new("Ryzen");
/// spec.limit = Some(40);
/// let listings = crawl(&Config::default(), &spec).await?;
/// println!("{}", listings.to_json(true)?);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config, spec: &SearchSpec) -> Result<ListingCollection, ScoutError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.crawl(spec, &NoProgress).await
}
