//! Defensive extraction of listings from results markup
//!
//! - `node`: the abstract node-query capability and its `scraper` binding
//! - `fields`: total per-field extractors with empty/zero sentinels
//! - `listing`: composition of the field extractors into a [`Listing`]
//!
//! [`Listing`]: crate::output::Listing

pub mod fields;
mod listing;
mod node;

pub use listing::extract_listing;
pub use node::Node;
