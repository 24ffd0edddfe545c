use url::Url;

/// A link to a single poem, as found on a poet's listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemReference {
    /// Title shown in the listing
    pub title: String,

    /// Absolute URL of the poem page
    pub url: Url,
}

impl PoemReference {
    pub fn new(title: impl Into<String>, url: Url) -> Self {
        Self {
            title: title.into(),
            url,
        }
    }
}

/// Title and text extracted from a poem page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemContent {
    pub title: String,

    /// Poem text, one line per verse, ending with a single newline
    pub body: String,
}

impl PoemContent {
    /// Number of non-blank lines in the body
    pub fn verse_count(&self) -> usize {
        self.body.lines().filter(|l| !l.trim().is_empty()).count()
    }
}
