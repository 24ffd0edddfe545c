//! URL handling module for poemhunter
//!
//! Everything that knows how the site lays out its URLs lives here: the
//! search, top-poets and listing templates, href resolution, and the key used
//! to tell two links to the same page apart.

mod normalize;
mod resolve;

pub use normalize::dedup_key;
pub use resolve::resolve_href;

use crate::{UrlError, UrlResult};
use url::Url;

/// Path of the site's search page
const SEARCH_PATH: &str = "/search/";

/// First page of the site's poet ranking
const TOP_POETS_PATH: &str = "/poets/top/page-1";

/// First page of a poet's poem listing, relative to the poet's page
const POEM_LISTING_PATH: &str = "poems/page-1";

/// URL templates for one site
#[derive(Debug, Clone)]
pub struct Site {
    base_url: Url,
}

impl Site {
    /// Creates a site rooted at `base_url`
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Search page listing poets that match `query`
    ///
    /// # Examples
    ///
    /// ```
    /// use poemhunter::url::Site;
    /// use url::Url;
    ///
    /// let site = Site::new(Url::parse("https://www.poemhunter.com").unwrap());
    /// let url = site.search_url("Robert Frost").unwrap();
    /// assert_eq!(url.as_str(), "https://www.poemhunter.com/search/?q=Robert+Frost");
    /// ```
    pub fn search_url(&self, query: &str) -> UrlResult<Url> {
        let mut url = join(&self.base_url, SEARCH_PATH)?;
        url.query_pairs_mut().append_pair("q", query.trim());
        Ok(url)
    }

    /// First page of the poet ranking
    pub fn top_poets_url(&self) -> UrlResult<Url> {
        join(&self.base_url, TOP_POETS_PATH)
    }
}

/// First page of the poem listing hanging off a poet's page
///
/// The poet URL is treated as a directory, so `.../robert-frost` and
/// `.../robert-frost/` both give `.../robert-frost/poems/page-1`.
pub fn poem_listing_url(poet_url: &Url) -> UrlResult<Url> {
    let mut dir = poet_url.clone();
    dir.set_query(None);
    dir.set_fragment(None);
    if !dir.path().ends_with('/') {
        let path = format!("{}/", dir.path());
        dir.set_path(&path);
    }
    join(&dir, POEM_LISTING_PATH)
}

fn join(base: &Url, path: &str) -> UrlResult<Url> {
    base.join(path).map_err(|_| UrlError::Join {
        base: base.to_string(),
        path: path.to_string(),
    })
}
