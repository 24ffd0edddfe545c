//! Paginated listing walks
//!
//! Both a poet's poem listing and the poet ranking are split over numbered
//! pages with a "next" link. [`walk_listing`] follows those pages and stops on
//! the first of:
//!
//! 1. a page that adds no new entries
//! 2. a page without a next link
//! 3. a next link pointing at a page already visited
//! 4. the requested number of entries being reached
//!
//! Rule 1 is the one relied on; a site that keeps serving its last page for
//! any page number still terminates.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::parse_poem_listing;
use crate::model::{ListingPage, PoemReference, PoetReference};
use crate::url::{dedup_key, poem_listing_url};
use crate::{ParseError, ScrapeError};
use reqwest::Client;
use std::collections::HashSet;
use url::Url;

/// Entries of a listing page, identified by the URL they link to
pub(crate) trait Listed {
    fn link(&self) -> &Url;
}

impl Listed for PoemReference {
    fn link(&self) -> &Url {
        &self.url
    }
}

impl Listed for PoetReference {
    fn link(&self) -> &Url {
        &self.url
    }
}

type PageParser<T> = fn(&str, &Url) -> Result<ListingPage<T>, ParseError>;

/// Collects every poem listed for a poet
///
/// Starts at the poet's first listing page and follows pagination. The result
/// keeps the site's order with repeated links removed.
///
/// # Errors
///
/// Fails if the first listing page cannot be fetched or parsed. Failures on
/// later pages end the walk early with a warning and keep what was found.
pub async fn collect_poems(
    client: &Client,
    poet: &PoetReference,
) -> Result<Vec<PoemReference>, ScrapeError> {
    let first_page = poem_listing_url(&poet.url)?;
    tracing::debug!(poet = %poet.name, url = %first_page, "Walking poem listing");

    let poems = walk_listing(client, first_page, parse_poem_listing, None).await?;

    tracing::info!(poet = %poet.name, poems = poems.len(), "Collected poem links");
    Ok(poems)
}

/// Follows a paginated listing and returns its distinct entries in order
///
/// With `limit`, stops as soon as that many distinct entries are collected.
pub(crate) async fn walk_listing<T: Listed>(
    client: &Client,
    first_page: Url,
    parse: PageParser<T>,
    limit: Option<usize>,
) -> Result<Vec<T>, ScrapeError> {
    let mut items: Vec<T> = Vec::new();
    let mut seen_items: HashSet<String> = HashSet::new();
    let mut visited_pages: HashSet<String> = HashSet::new();
    let mut next_page = Some(first_page);
    let mut page_no = 0usize;

    let is_full = |count: usize| limit.is_some_and(|n| count >= n);

    while let Some(page_url) = next_page.take() {
        if !visited_pages.insert(dedup_key(&page_url)) {
            tracing::debug!(url = %page_url, "Next link points at a visited page");
            break;
        }
        page_no += 1;

        let listing = match fetch_listing(client, &page_url, parse).await {
            Ok(listing) => listing,
            Err(e) if page_no == 1 => return Err(e),
            Err(e) => {
                tracing::warn!(page = page_no, url = %page_url, error = %e, "Stopping pagination");
                break;
            }
        };

        let before = items.len();
        for item in listing.items {
            if is_full(items.len()) {
                break;
            }
            if seen_items.insert(dedup_key(item.link())) {
                items.push(item);
            }
        }
        let added = items.len() - before;

        tracing::debug!(page = page_no, added, total = items.len(), "Listing page read");

        if added == 0 || is_full(items.len()) {
            break;
        }
        next_page = listing.next;
    }

    Ok(items)
}

async fn fetch_listing<T>(
    client: &Client,
    page_url: &Url,
    parse: PageParser<T>,
) -> Result<ListingPage<T>, ScrapeError> {
    let html = fetch_page(client, page_url).await?;
    Ok(parse(&html, page_url)?)
}
