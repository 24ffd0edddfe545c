//! Resolving which poets to download
//!
//! A single author is found through the site search; the most popular poets
//! come from the site's ranking, which is paginated like a poem listing.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::{parse_search_result, parse_top_poets};
use crate::crawler::walker::walk_listing;
use crate::model::PoetReference;
use crate::url::Site;
use crate::ScrapeError;
use reqwest::Client;

/// Finds an author's page through the site search
///
/// The first poet in the search results is taken as the match.
///
/// # Errors
///
/// * `ScrapeError::InvalidInput` - `name` is blank
/// * `ScrapeError::NotFound` - the search returned no poet
/// * `ScrapeError::Fetch` / `ScrapeError::Parse` - the search page could not be read
pub async fn resolve_poet(
    client: &Client,
    site: &Site,
    name: &str,
) -> Result<PoetReference, ScrapeError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ScrapeError::InvalidInput(
            "author name cannot be empty".to_string(),
        ));
    }

    let search_url = site.search_url(name)?;
    tracing::debug!(query = name, url = %search_url, "Searching for poet");

    let html = fetch_page(client, &search_url).await?;
    let poet = parse_search_result(&html, &search_url)?.ok_or_else(|| ScrapeError::NotFound {
        query: name.to_string(),
    })?;

    tracing::info!(query = name, poet = %poet.name, url = %poet.url, "Resolved poet");
    Ok(poet)
}

/// Returns up to `count` poets in the site's ranking order
///
/// Fewer than `count` poets are returned when the ranking runs out; that is
/// not an error.
///
/// # Errors
///
/// * `ScrapeError::InvalidInput` - `count` is zero
/// * `ScrapeError::Fetch` / `ScrapeError::Parse` - the first ranking page could not be read
pub async fn resolve_top_poets(
    client: &Client,
    site: &Site,
    count: usize,
) -> Result<Vec<PoetReference>, ScrapeError> {
    if count == 0 {
        return Err(ScrapeError::InvalidInput(
            "number of poets must be at least 1".to_string(),
        ));
    }

    let first_page = site.top_poets_url()?;
    let poets = walk_listing(client, first_page, parse_top_poets, Some(count)).await?;

    if poets.len() < count {
        tracing::warn!(
            requested = count,
            found = poets.len(),
            "Ranking has fewer poets than requested"
        );
    }
    tracing::info!(poets = poets.len(), "Resolved top poets");

    Ok(poets)
}
