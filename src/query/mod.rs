//! Search query construction
//!
//! This module maps a [`SearchSpec`] onto the fixed request parameters of the
//! bazos.cz search form. The parameter names are dictated by the site and must
//! stay byte-for-byte identical:
//!
//! | Field       | Parameter   | When sent                  |
//! |-------------|-------------|----------------------------|
//! | query       | `hledat`    | non-empty                  |
//! | -           | `rubriky`   | always (`www`)             |
//! | location    | `hlokalita` | present and non-empty      |
//! | radius      | `humkreis`  | non-zero                   |
//! | min price   | `cenaod`    | present and non-zero       |
//! | max price   | `cenado`    | present and non-zero       |
//! | order       | `order`     | present and non-zero       |
//! | -           | `kitx`      | always (`ano`)             |
//! | offset      | `crz`       | present                    |
//! | -           | `Submit`    | always (`Hledat`)          |
//!
//! Omitting a parameter instead of sending it empty or zero keeps the site's
//! own defaults in effect.

use url::Url;

/// Search radius in kilometres used when the caller does not pick one
pub const DEFAULT_RADIUS: u32 = 25;

/// An immutable description of one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    /// Free-text query
    pub query: String,

    /// Location name or postal code the radius is measured from
    pub location: Option<String>,

    /// Search radius in kilometres
    pub radius: u32,

    /// Lower price bound
    pub min_price: Option<u64>,

    /// Upper price bound (not checked against `min_price`)
    pub max_price: Option<u64>,

    /// Site-specific ordering code
    pub order: Option<u32>,

    /// Number of results to skip before the first collected listing
    pub start: Option<u64>,

    /// Upper bound on the number of listings to collect
    pub limit: Option<u64>,
}

impl SearchSpec {
    /// Creates a spec for `query` with every optional field absent
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: None,
            radius: DEFAULT_RADIUS,
            min_price: None,
            max_price: None,
            order: None,
            start: None,
            limit: None,
        }
    }

    /// Offset of the first result this search collects
    pub fn start_offset(&self) -> u64 {
        self.start.unwrap_or(0)
    }

    /// Ordered request parameters for this spec at the given offset
    ///
    /// `offset` is `None` for the discovery request, which must not carry a
    /// `crz` parameter at all.
    pub fn query_pairs(&self, offset: Option<u64>) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(10);

        if !self.query.is_empty() {
            pairs.push(("hledat", self.query.clone()));
        }
        pairs.push(("rubriky", "www".to_string()));
        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            pairs.push(("hlokalita", location.to_string()));
        }
        if self.radius != 0 {
            pairs.push(("humkreis", self.radius.to_string()));
        }
        if let Some(min_price) = self.min_price.filter(|p| *p != 0) {
            pairs.push(("cenaod", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price.filter(|p| *p != 0) {
            pairs.push(("cenado", max_price.to_string()));
        }
        if let Some(order) = self.order.filter(|o| *o != 0) {
            pairs.push(("order", order.to_string()));
        }
        pairs.push(("kitx", "ano".to_string()));
        if let Some(offset) = offset {
            pairs.push(("crz", offset.to_string()));
        }
        pairs.push(("Submit", "Hledat".to_string()));

        pairs
    }
}

/// Builds the full search URL for `spec` at `offset`
///
/// Any query string already present on `base` is discarded. The result is
/// form-urlencoded, so spaces become `+`.
///
/// # Example
///
/// ```
/// use bazos_scout::query::{build_search_url, SearchSpec};
/// use url::Url;
///
/// let base = Url::parse("https://www.bazos.cz/search.php").unwrap();
/// let url = build_search_url(&base, &SearchSpec::new("Ryzen 5"), Some(20));
/// assert_eq!(
///     url.as_str(),
///     "https://www.bazos.cz/search.php?hledat=Ryzen+5&rubriky=www&humkreis=25&kitx=ano&crz=20&Submit=Hledat"
/// );
/// ```
pub fn build_search_url(base: &Url, spec: &SearchSpec, offset: Option<u64>) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.query_pairs_mut().extend_pairs(spec.query_pairs(offset));
    url
}
