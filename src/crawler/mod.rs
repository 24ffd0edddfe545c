//! Crawler module for fetching and processing the site's pages
//!
//! This module contains the scraping pipeline, including:
//! - HTTP fetching
//! - HTML extraction for search, listing, ranking and poem pages
//! - Poet resolution (by name or by rank)
//! - Listing pagination
//! - Bounded concurrent downloads
//! - Overall coordination of the two command flows

mod coordinator;
mod dispatcher;
mod fetcher;
mod parser;
mod resolver;
mod walker;

pub use coordinator::Coordinator;
pub use dispatcher::Dispatcher;
pub use fetcher::{build_http_client, fetch_page};
pub use parser::{
    extract, markup, parse_poem, parse_poem_listing, parse_search_result, parse_top_poets,
    Extracted, PageKind,
};
pub use resolver::{resolve_poet, resolve_top_poets};
pub use walker::collect_poems;
