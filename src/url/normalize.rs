use url::Url;

/// Tracking query parameters that never change which page is served
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "mc_eid", "ref", "source"];

/// Key identifying the page a URL points at
///
/// Two links with the same key are treated as the same poem or poet. The key
/// is derived from the URL by:
///
/// 1. Lowercasing the host
/// 2. Removing dot segments, duplicate slashes and the trailing slash
/// 3. Dropping the fragment
/// 4. Dropping tracking query parameters and sorting the rest
///
/// The URL that gets fetched is left untouched.
///
/// # Examples
///
/// ```
/// use poemhunter::url::dedup_key;
/// use url::Url;
///
/// let a = Url::parse("https://www.poemhunter.com/poem/the-road-not-taken/").unwrap();
/// let b = Url::parse("https://WWW.poemhunter.com/poem/the-road-not-taken#comments").unwrap();
/// assert_eq!(dedup_key(&a), dedup_key(&b));
/// ```
pub fn dedup_key(url: &Url) -> String {
    let mut key = url.clone();

    if let Some(host) = url.host_str() {
        let lower = host.to_lowercase();
        if lower != host {
            // Only fails for cannot-be-a-base URLs, which have no host anyway.
            let _ = key.set_host(Some(&lower));
        }
    }

    key.set_path(&normalize_path(url.path()));
    key.set_fragment(None);

    if url.query().is_some() {
        let params = filter_and_sort_query_params(url);
        if params.is_empty() {
            key.set_query(None);
        } else {
            key.query_pairs_mut().clear().extend_pairs(params);
        }
    }

    key.into()
}

/// Normalizes a URL path by removing dot segments and trailing slashes
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    format!("/{}", segments.join("/"))
}

/// Filters out tracking parameters and sorts remaining query parameters
fn filter_and_sort_query_params(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    params.sort();
    params
}

fn is_tracking_param(key: &str) -> bool {
    TRACKING_PARAMS.contains(&key) || key.starts_with("utm_")
}
