//! In-memory data passed between the scraping stages
//!
//! Nothing here is persisted: each value is produced by one stage, consumed by
//! the next and dropped.

mod poem;
mod poet;
mod report;

pub use poem::{PoemContent, PoemReference};
pub use poet::PoetReference;
pub use report::{DownloadFailure, DownloadReport, RunStatistics};

use url::Url;

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage<T> {
    /// Entries in the order the site shows them
    pub items: Vec<T>,

    /// Resolved "next page" link, if the page declares one
    pub next: Option<Url>,
}
