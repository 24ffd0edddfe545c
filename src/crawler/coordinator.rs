//! Harvest coordinator - ties the scraping stages together
//!
//! This module contains the two top-level flows:
//! - poet: resolve one author, walk their listing, download their poems
//! - top: resolve the ranking, then walk and download each poet in rank order
//!
//! Resolution failures abort the flow. Once poems are being downloaded,
//! failures are recorded in [`RunStatistics`] and the flow carries on.

use crate::config::{validate, ScraperConfig};
use crate::crawler::dispatcher::Dispatcher;
use crate::crawler::resolver::{resolve_poet, resolve_top_poets};
use crate::crawler::walker::collect_poems;
use crate::crawler::build_http_client;
use crate::model::{PoetReference, RunStatistics};
use crate::output::{poet_dir, poet_target_dir};
use crate::url::Site;
use crate::ScrapeError;
use reqwest::Client;
use std::path::Path;

/// Main harvest coordinator structure
#[derive(Debug, Clone)]
pub struct Coordinator {
    client: Client,
    site: Site,
    dispatcher: Dispatcher,
}

impl Coordinator {
    /// Creates a coordinator from a configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Configuration valid and HTTP client built
    /// * `Err(ScrapeError)` - Invalid configuration or client setup failure
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        validate(config)?;

        let client = build_http_client(&config.http)?;
        let dispatcher = Dispatcher::new(client.clone(), config.download.concurrency);

        Ok(Self {
            client,
            site: Site::new(config.site.base_url.clone()),
            dispatcher,
        })
    }

    /// Downloads every poem by `author`
    ///
    /// Poems go to `output_dir/<poet name>/`, or straight into `output_dir`
    /// when its name already contains the poet's name.
    ///
    /// # Errors
    ///
    /// Fails when the author cannot be resolved, the first listing page cannot
    /// be read, or the output directory cannot be created. Individual poem
    /// failures are reported in the returned statistics instead.
    pub async fn harvest_poet(
        &self,
        author: &str,
        output_dir: &Path,
    ) -> Result<RunStatistics, ScrapeError> {
        let poet = resolve_poet(&self.client, &self.site, author).await?;

        let dir = poet_target_dir(output_dir, &poet.name);
        let mut stats = RunStatistics::default();
        self.harvest_into(&poet, &dir, &mut stats).await?;
        Ok(stats)
    }

    /// Downloads the poems of the `count` highest-ranked poets
    ///
    /// Each poet gets a subdirectory of `output_dir` named after them. A poet
    /// whose listing cannot be read is skipped and noted in the statistics.
    ///
    /// # Errors
    ///
    /// Fails when the ranking cannot be read or `count` is zero.
    pub async fn harvest_top(
        &self,
        count: usize,
        output_dir: &Path,
    ) -> Result<RunStatistics, ScrapeError> {
        let poets = resolve_top_poets(&self.client, &self.site, count).await?;

        let mut stats = RunStatistics::default();
        for (rank, poet) in poets.iter().enumerate() {
            tracing::info!(rank = rank + 1, poet = %poet.name, "Harvesting poet");

            let dir = poet_dir(output_dir, &poet.name);
            if let Err(e) = self.harvest_into(poet, &dir, &mut stats).await {
                tracing::error!(poet = %poet.name, url = %poet.url, error = %e, "Skipping poet");
                stats.skip_poet(poet.name.clone(), e.to_string());
            }
        }

        Ok(stats)
    }

    async fn harvest_into(
        &self,
        poet: &PoetReference,
        dir: &Path,
        stats: &mut RunStatistics,
    ) -> Result<(), ScrapeError> {
        let poems = collect_poems(&self.client, poet).await?;
        if poems.is_empty() {
            tracing::warn!(poet = %poet.name, "No poems listed");
        }

        let report = self.dispatcher.download_all(poems, dir).await?;
        stats.record(report);
        Ok(())
    }
}
