use std::time::Duration;
use url::Url;

/// Site the scraper talks to unless told otherwise
pub const DEFAULT_BASE_URL: &str = "https://www.poemhunter.com";

/// Poem downloads in flight at once
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Upper bound accepted for `--concurrency`
pub const MAX_CONCURRENCY: usize = 32;

/// Main configuration structure for poemhunter
#[derive(Debug, Clone, Default)]
pub struct ScraperConfig {
    pub site: SiteConfig,
    pub http: HttpConfig,
    pub download: DownloadConfig,
}

/// Which site to scrape
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Root URL every search, listing and poem URL is built from
    pub base_url: Url,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Total time allowed for one request
    pub request_timeout: Duration,

    /// Time allowed to establish a connection
    pub connect_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            // Browser-like prefix; the site turns away bare client identifiers.
            user_agent: format!(
                "Mozilla/5.0 (compatible; poemhunter/{})",
                env!("CARGO_PKG_VERSION")
            ),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Download dispatcher settings
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Maximum number of poems fetched and written concurrently
    pub concurrency: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}
