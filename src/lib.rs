//! poemhunter: download poems from poemhunter.com
//!
//! This crate resolves an author (or the site's top-ranked poets), walks their
//! paginated poem listings, and writes every poem to a plain text file using a
//! bounded pool of concurrent downloads.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for poemhunter operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("No poet found matching '{query}'")]
    NotFound { query: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failure of a single HTTP GET
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },
}

impl FetchError {
    /// URL of the request that failed
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Connect { url, .. }
            | Self::Status { url, .. }
            | Self::Transport { url, .. } => url,
        }
    }
}

/// The page did not have the structure the extractor expects
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("HTML parse error for {url}: missing {what}")]
    MissingElement { what: &'static str, url: String },

    #[error("Poem page {url} has an empty body")]
    EmptyPoem { url: String },

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Cannot build '{path}' from {base}")]
    Join { base: String, path: String },
}

/// Result type alias for poemhunter operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::ScraperConfig;
pub use model::{
    DownloadFailure, DownloadReport, ListingPage, PoemContent, PoemReference, PoetReference,
};
