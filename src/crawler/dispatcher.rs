//! Bounded concurrent poem downloads
//!
//! Every poem becomes a task in a [`JoinSet`]; a shared semaphore caps how
//! many of them fetch and write at once. Outcomes travel back through the
//! join handles and are tallied by the caller once every task has finished,
//! so workers share no counters.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::parse_poem;
use crate::model::{DownloadFailure, DownloadReport, PoemReference};
use crate::output::{ensure_dir, write_poem};
use crate::ScrapeError;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Downloads poems into a directory with bounded concurrency
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: Client,
    concurrency: usize,
}

impl Dispatcher {
    /// Creates a dispatcher allowing `concurrency` downloads in flight
    ///
    /// A concurrency of zero is treated as one.
    pub fn new(client: Client, concurrency: usize) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Fetches every poem and writes it to `dir`
    ///
    /// # Per-poem Flow
    ///
    /// 1. Fetch the poem page
    /// 2. Extract title and body
    /// 3. Write the body to `<dir>/<sanitized title>.txt`, replacing any existing file
    ///
    /// A failure at any step is logged with the poem's title and URL, recorded
    /// in the report, and does not affect the other poems.
    ///
    /// # Returns
    ///
    /// * `Ok(DownloadReport)` - Every poem was attempted
    /// * `Err(ScrapeError::Io)` - The output directory could not be created
    pub async fn download_all(
        &self,
        poems: Vec<PoemReference>,
        dir: &Path,
    ) -> Result<DownloadReport, ScrapeError> {
        ensure_dir(dir).await?;

        let total = poems.len();
        tracing::info!(
            poems = total,
            dir = %dir.display(),
            concurrency = self.concurrency,
            "Downloading poems"
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let dir: Arc<PathBuf> = Arc::new(dir.to_path_buf());
        let mut tasks = JoinSet::new();

        for (index, poem) in poems.iter().cloned().enumerate() {
            let client = self.client.clone();
            let semaphore = Arc::clone(&semaphore);
            let dir = Arc::clone(&dir);

            tasks.spawn(async move {
                let outcome = match semaphore.acquire_owned().await {
                    Ok(_permit) => download_poem(&client, &poem, &dir).await,
                    Err(e) => Err(ScrapeError::InvalidInput(format!(
                        "download slot unavailable: {e}"
                    ))),
                };
                (index, outcome)
            });
        }

        let mut report = DownloadReport::default();
        let mut finished = vec![false; total];

        while let Some(joined) = tasks.join_next().await {
            let (index, outcome) = match joined {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(error = %e, "Download task did not complete");
                    continue;
                }
            };
            finished[index] = true;
            let poem = &poems[index];

            match outcome {
                Ok(path) => {
                    report.succeeded += 1;
                    tracing::info!(path = %path.display(), "\"{}\" saved", poem.title);
                }
                Err(e) => {
                    tracing::warn!(title = %poem.title, url = %poem.url, error = %e, "Could not save poem");
                    report.failures.push(failure(poem, e.to_string()));
                }
            }
        }

        // Tasks that panicked never reported back.
        for (poem, _) in poems.iter().zip(&finished).filter(|(_, done)| !**done) {
            report
                .failures
                .push(failure(poem, "download task panicked".to_string()));
        }

        report.failures.sort_by(|a, b| a.title.cmp(&b.title));

        tracing::info!(
            saved = report.succeeded,
            failed = report.failed(),
            dir = %dir.display(),
            "Downloads finished"
        );
        Ok(report)
    }
}

/// Fetches, extracts and writes a single poem
async fn download_poem(
    client: &Client,
    poem: &PoemReference,
    dir: &Path,
) -> Result<PathBuf, ScrapeError> {
    let html = fetch_page(client, &poem.url).await?;
    let content = parse_poem(&html, &poem.url)?;
    write_poem(dir, &content).await
}

fn failure(poem: &PoemReference, reason: String) -> DownloadFailure {
    DownloadFailure {
        title: poem.title.clone(),
        url: poem.url.clone(),
        reason,
    }
}
