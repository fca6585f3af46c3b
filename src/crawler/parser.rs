//! Results page parser
//!
//! This module reads the two things the crawler needs from a search results
//! page:
//! - the total result count shown in the page header
//! - the listing containers, in document order
//!
//! `scraper::Html` is not `Send`, so parsed documents are created and dropped
//! inside synchronous code and never held across an `.await`.

use crate::ParseError;
use scraper::{ElementRef, Html, Selector};

/// Header whose text ends with the total number of results
const RESULT_COUNT: &str = "div.inzeratynadpis";

/// One listing on the results page
const LISTING_CONTAINER: &str = "div.inzeraty.inzeratyflex";

/// Parses a results page body into a document
pub fn parse_document(body: &str) -> Html {
    Html::parse_document(body)
}

/// Reads the total result count from a results page
///
/// The count is the last whitespace-delimited token of the first
/// `div.inzeratynadpis` (e.g. `Zobrazeno 1-20 inzerátů z 237`). No other
/// format is attempted.
///
/// # Arguments
///
/// * `body` - The page HTML
/// * `url` - The page URL, for error reporting
///
/// # Returns
///
/// * `Ok(u64)` - The total number of results the site reports
/// * `Err(ParseError)` - The header is missing or does not end in a number
///
/// # Example
///
/// ```
/// use bazos_scout::crawler::parse_result_count;
///
/// let html = r#"<div class="inzeratynadpis">Zobrazeno 1-20 inzerátů z 237</div>"#;
/// assert_eq!(parse_result_count(html, "https://www.bazos.cz/search.php").unwrap(), 237);
/// ```
pub fn parse_result_count(body: &str, url: &str) -> Result<u64, ParseError> {
    let document = parse_document(body);

    let header = Selector::parse(RESULT_COUNT)
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|element| element.text().collect::<String>())
        })
        .ok_or_else(|| ParseError::MissingResultCount {
            url: url.to_string(),
        })?;

    let token = header.split_whitespace().last().unwrap_or_default();

    token.parse().map_err(|_| ParseError::InvalidResultCount {
        url: url.to_string(),
        text: header.trim().to_string(),
    })
}

/// All listing containers of a parsed page, in document order
pub fn listing_containers(document: &Html) -> Vec<ElementRef<'_>> {
    match Selector::parse(LISTING_CONTAINER) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}
