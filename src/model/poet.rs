use url::Url;

/// A poet's home page on the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoetReference {
    pub name: String,

    /// Absolute URL of the poet's page; listings hang off this URL
    pub url: Url,
}

impl PoetReference {
    pub fn new(name: impl Into<String>, url: Url) -> Self {
        Self {
            name: name.into(),
            url,
        }
    }
}
