use crate::output::listing::{FieldValue, Listing, ListingField};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Ordered result of one crawl
///
/// Listings keep crawl discovery order: page order first, then document order
/// within a page. Only the crawl that owns the collection appends to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingCollection {
    listings: Vec<Listing>,
}

impl ListingCollection {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listing at the end
    pub fn push(&mut self, listing: Listing) {
        self.listings.push(listing);
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Listing> {
        self.listings.iter()
    }

    pub fn as_slice(&self) -> &[Listing] {
        &self.listings
    }

    /// Projects the collection to its structured wire form
    ///
    /// Each listing becomes an object whose keys follow the field declaration
    /// order.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(&self.listings)?)
    }

    /// Encodes the collection as JSON
    ///
    /// Non-ASCII text is written literally. `pretty` indents with two spaces.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(&self.listings)?
        } else {
            serde_json::to_string(&self.listings)?
        };
        Ok(json)
    }

    /// Decodes a collection previously produced by [`to_json`](Self::to_json)
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// One field across every listing, in collection order
    pub fn field(&self, field: ListingField) -> Vec<FieldValue> {
        self.listings.iter().map(|l| l.get(field)).collect()
    }
}

impl From<Vec<Listing>> for ListingCollection {
    fn from(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

impl IntoIterator for ListingCollection {
    type Item = Listing;
    type IntoIter = std::vec::IntoIter<Listing>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.into_iter()
    }
}

impl<'a> IntoIterator for &'a ListingCollection {
    type Item = &'a Listing;
    type IntoIter = std::slice::Iter<'a, Listing>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.iter()
    }
}
