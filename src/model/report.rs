use std::fmt;
use url::Url;

/// A poem that could not be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFailure {
    pub title: String,
    pub url: Url,

    /// Human-readable cause (fetch, parse or write error)
    pub reason: String,
}

impl fmt::Display for DownloadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" <{}>: {}", self.title, self.url, self.reason)
    }
}

/// Outcome of one dispatcher run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// Number of poems written to disk
    pub succeeded: usize,

    /// Poems that were skipped, with the reason
    pub failures: Vec<DownloadFailure>,
}

impl DownloadReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed()
    }
}

/// Totals over every poet processed by one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub poets: usize,
    pub poems_found: usize,
    pub saved: usize,
    pub failures: Vec<DownloadFailure>,

    /// Poets whose listing could not be read, with the reason
    pub skipped_poets: Vec<(String, String)>,
}

impl RunStatistics {
    /// Folds one poet's dispatcher report into the totals
    pub fn record(&mut self, report: DownloadReport) {
        self.poets += 1;
        self.poems_found += report.total();
        self.saved += report.succeeded;
        self.failures.extend(report.failures);
    }

    /// Notes a poet whose poems could not be listed
    pub fn skip_poet(&mut self, name: impl Into<String>, reason: impl Into<String>) {
        self.skipped_poets.push((name.into(), reason.into()));
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}
