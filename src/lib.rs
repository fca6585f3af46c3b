//! Bazos-Scout: a classified-ad search harvester
//!
//! This crate turns a structured search into a sequence of paginated requests
//! against the bazos.cz search endpoint, extracts every listing defensively and
//! returns them as an ordered, serializable collection.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod query;
pub mod search;

use thiserror::Error;

/// Main error type for Bazos-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown listing field: {0}")]
    UnknownField(String),

    #[error("Crawl task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ScoutError {
    /// Returns true if the error came from the network layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns true if a fetched page could not be understood
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

/// Failures of the fetch capability
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Failures turning a fetched body into a usable results page
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Response from {url} is not valid UTF-8")]
    Encoding { url: String },

    #[error("Result count indicator not found on {url}")]
    MissingResultCount { url: String },

    #[error("Result count indicator on {url} is not a number: '{text}'")]
    InvalidResultCount { url: String, text: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Bazos-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlPlan, PAGE_SIZE};
pub use output::{FieldValue, Listing, ListingCollection, ListingField};
pub use query::SearchSpec;
pub use search::{run_search, search_json, SearchRequest};
