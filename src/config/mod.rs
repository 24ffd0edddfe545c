//! Configuration module for poemhunter
//!
//! The tool reads no configuration files: a [`ScraperConfig`] starts from
//! [`Default`] and the command line overrides individual fields before the
//! result is checked with [`validate`].
//!
//! # Example
//!
//! ```
//! use poemhunter::config::{validate, ScraperConfig};
//!
//! let mut config = ScraperConfig::default();
//! config.download.concurrency = 4;
//! validate(&config).unwrap();
//! ```

mod types;
mod validation;

pub use types::{
    DownloadConfig, HttpConfig, ScraperConfig, SiteConfig, DEFAULT_BASE_URL, DEFAULT_CONCURRENCY,
    MAX_CONCURRENCY,
};
pub use validation::validate;
