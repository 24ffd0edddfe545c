//! HTML extraction for the four kinds of page the scraper reads
//!
//! All knowledge of the site's markup is confined to this module. Callers ask
//! for a [`PageKind`] and get structured values back; when the site changes
//! its HTML, the selectors in [`markup`] are the only thing to update.
//!
//! Missing structural elements are reported as [`ParseError`] so an error
//! page or a redesigned page is never mistaken for an empty one.

use crate::model::{ListingPage, PoemContent, PoemReference, PoetReference};
use crate::url::resolve_href;
use crate::ParseError;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// CSS selectors for the site's current markup
pub mod markup {
    /// Block wrapping all search hits; present even when nothing matched
    pub const SEARCH_RESULTS: &str = ".search-results";
    /// Link to a poet's page inside the search hits
    pub const SEARCH_POET_LINK: &str = ".search-results .poet a[href]";

    /// Table of a poet's poems on a listing page
    pub const POEM_TABLE: &str = "table.poems";
    /// Poem title links; the second column holds the title
    pub const POEM_LINK: &str = "table.poems tbody tr td:nth-child(2) a[href]";

    /// Table of ranked poets
    pub const POET_TABLE: &str = "table.poets";
    /// Poet name links; the second column holds the name
    pub const POET_LINK: &str = "table.poets tbody tr td:nth-child(2) a[href]";

    /// Pagination link to the following page
    pub const NEXT_PAGE: &str = ".next a[href]";

    pub const POEM_TITLE: &str = ".poem-title";
    pub const POEM_BODY: &str = ".poem-body";
    pub const POEM_PARAGRAPH: &str = "p";
}

/// Which kind of page is being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Results of a poet search
    PoetSearchResult,
    /// One page of a poet's poem listing
    PoetListing,
    /// A single poem
    Poem,
    /// One page of the poet ranking
    TopPoets,
}

/// Structured fields pulled out of a page, one variant per [`PageKind`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    /// First poet in the search results, if any matched
    PoetSearchResult(Option<PoetReference>),
    PoetListing(ListingPage<PoemReference>),
    Poem(PoemContent),
    TopPoets(ListingPage<PoetReference>),
}

/// Extracts the fields for `kind` from a page
///
/// # Arguments
///
/// * `kind` - Which extraction rules to apply
/// * `html` - The page body
/// * `page_url` - URL the page was fetched from; relative links resolve against it
///
/// # Example
///
/// ```
/// use poemhunter::crawler::{extract, Extracted, PageKind};
/// use url::Url;
///
/// let html = r#"<div class="search-results"><div class="poet">
///     <a href="/robert-frost/">Robert Frost</a></div></div>"#;
/// let page = Url::parse("https://www.poemhunter.com/search/?q=frost").unwrap();
///
/// match extract(PageKind::PoetSearchResult, html, &page).unwrap() {
///     Extracted::PoetSearchResult(Some(poet)) => assert_eq!(poet.name, "Robert Frost"),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn extract(kind: PageKind, html: &str, page_url: &Url) -> Result<Extracted, ParseError> {
    Ok(match kind {
        PageKind::PoetSearchResult => {
            Extracted::PoetSearchResult(parse_search_result(html, page_url)?)
        }
        PageKind::PoetListing => Extracted::PoetListing(parse_poem_listing(html, page_url)?),
        PageKind::Poem => Extracted::Poem(parse_poem(html, page_url)?),
        PageKind::TopPoets => Extracted::TopPoets(parse_top_poets(html, page_url)?),
    })
}

/// Returns the first poet linked from a search results page
///
/// `Ok(None)` means the search ran but found nobody; a page without the
/// results block at all is a [`ParseError`].
pub fn parse_search_result(
    html: &str,
    page_url: &Url,
) -> Result<Option<PoetReference>, ParseError> {
    let document = Html::parse_document(html);

    require(&document, markup::SEARCH_RESULTS, "search results", page_url)?;

    let link_selector = selector(markup::SEARCH_POET_LINK)?;
    let poet = document.select(&link_selector).find_map(|a| {
        let url = resolve_href(a.value().attr("href")?, page_url)?;
        Some(PoetReference::new(link_text(a, &url), url))
    });

    Ok(poet)
}

/// Parses one page of a poet's poem listing
pub fn parse_poem_listing(
    html: &str,
    page_url: &Url,
) -> Result<ListingPage<PoemReference>, ParseError> {
    parse_listing(
        html,
        page_url,
        (markup::POEM_TABLE, "poem listing table"),
        markup::POEM_LINK,
        |title, url| PoemReference::new(title, url),
    )
}

/// Parses one page of the poet ranking
pub fn parse_top_poets(
    html: &str,
    page_url: &Url,
) -> Result<ListingPage<PoetReference>, ParseError> {
    parse_listing(
        html,
        page_url,
        (markup::POET_TABLE, "poet ranking table"),
        markup::POET_LINK,
        |name, url| PoetReference::new(name, url),
    )
}

/// Parses a poem page into its title and text
///
/// # Body Rules
///
/// - `<br>` ends a line
/// - consecutive `<p>` elements are separated by one blank line
/// - whitespace inside a line is collapsed to single spaces
/// - runs of blank lines collapse to one; leading and trailing blanks are dropped
/// - the body ends with exactly one `\n`
pub fn parse_poem(html: &str, page_url: &Url) -> Result<PoemContent, ParseError> {
    let document = Html::parse_document(html);

    let title_selector = selector(markup::POEM_TITLE)?;
    let title = document
        .select(&title_selector)
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .find(|t| !t.is_empty())
        .ok_or_else(|| missing("poem title", page_url))?;

    let body_selector = selector(markup::POEM_BODY)?;
    let container = document
        .select(&body_selector)
        .next()
        .ok_or_else(|| missing("poem body", page_url))?;

    let paragraph_selector = selector(markup::POEM_PARAGRAPH)?;
    let paragraphs: Vec<ElementRef> = container.select(&paragraph_selector).collect();

    let mut lines = Vec::new();
    if paragraphs.is_empty() {
        lines.extend(element_lines(container));
    } else {
        for paragraph in paragraphs {
            lines.push(String::new());
            lines.extend(element_lines(paragraph));
        }
    }

    let body = join_lines(lines);
    if body.is_empty() {
        return Err(ParseError::EmptyPoem {
            url: page_url.to_string(),
        });
    }

    Ok(PoemContent { title, body })
}

fn parse_listing<T>(
    html: &str,
    page_url: &Url,
    (container, what): (&str, &'static str),
    link: &str,
    make: impl Fn(String, Url) -> T,
) -> Result<ListingPage<T>, ParseError> {
    let document = Html::parse_document(html);

    require(&document, container, what, page_url)?;

    let link_selector = selector(link)?;
    let items = document
        .select(&link_selector)
        .filter_map(|a| {
            let url = resolve_href(a.value().attr("href")?, page_url)?;
            Some(make(link_text(a, &url), url))
        })
        .collect();

    let next_selector = selector(markup::NEXT_PAGE)?;
    let next = document
        .select(&next_selector)
        .find_map(|a| resolve_href(a.value().attr("href")?, page_url));

    Ok(ListingPage { items, next })
}

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::InvalidSelector(css.to_string()))
}

fn require(
    document: &Html,
    css: &str,
    what: &'static str,
    page_url: &Url,
) -> Result<(), ParseError> {
    let sel = selector(css)?;
    if document.select(&sel).next().is_none() {
        return Err(missing(what, page_url));
    }
    Ok(())
}

fn missing(what: &'static str, page_url: &Url) -> ParseError {
    ParseError::MissingElement {
        what,
        url: page_url.to_string(),
    }
}

/// Visible text of a link, falling back to its last path segment
fn link_text(a: ElementRef, url: &Url) -> String {
    let text = collapse_whitespace(&a.text().collect::<String>());
    if !text.is_empty() {
        return text;
    }

    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(|slug| slug.replace('-', " "))
        .unwrap_or_else(|| url.to_string())
}

/// Splits an element's text into lines at `<br>`
fn element_lines(element: ElementRef) -> Vec<String> {
    let mut lines = vec![String::new()];

    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => {
                let in_script = node
                    .parent()
                    .and_then(|parent| parent.value().as_element())
                    .is_some_and(|e| matches!(e.name(), "script" | "style"));
                if in_script {
                    continue;
                }
                if let Some(line) = lines.last_mut() {
                    line.push_str(text);
                }
            }
            Node::Element(e) if e.name() == "br" => lines.push(String::new()),
            _ => {}
        }
    }

    lines.iter().map(|l| collapse_whitespace(l)).collect()
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    for line in lines {
        let blank = line.is_empty();
        let previous_blank = out.last().map_or(true, |l: &String| l.is_empty());
        if blank && previous_blank {
            continue;
        }
        out.push(line);
    }

    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }

    if out.is_empty() {
        return String::new();
    }

    let mut body = out.join("\n");
    body.push('\n');
    body
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
