//! Extracted listings and their wire form
//!
//! This module owns the [`Listing`] record and the ordered
//! [`ListingCollection`] a crawl produces. The wire form is a JSON array of
//! objects carrying exactly the nine listing fields in declaration order, with
//! `""` and `0` standing in for fields that were not found.

mod collection;
mod listing;

pub use collection::ListingCollection;
pub use listing::{FieldValue, Listing, ListingField};
