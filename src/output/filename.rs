//! Filename sanitization for poem titles and poet names

/// Extension given to every poem file
pub const POEM_EXTENSION: &str = "txt";

/// Longest file name most filesystems accept, in bytes
const NAME_MAX: usize = 255;

/// Characters that are path separators or reserved on common filesystems
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Device names Windows refuses as file stems
const WINDOWS_DEVICES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Used when nothing printable is left of a title
const FALLBACK_NAME: &str = "untitled";

/// Sanitizes a title into a single path component
///
/// - Replaces path separators, reserved characters and control characters with `_`
/// - Turns any whitespace (tabs, newlines) into a space
/// - Collapses runs of `_` and runs of spaces
/// - Trims leading/trailing spaces, dots and underscores
/// - Prefixes Windows device names with `_`
/// - Limits length to leave room for the `.txt` extension
///
/// Distinct titles can map to the same name (`"A/B"` and `"A:B"`); the later
/// file then replaces the earlier one.
///
/// # Examples
///
/// ```
/// use poemhunter::output::sanitize_filename;
///
/// assert_eq!(
///     sanitize_filename("Ode: To a Nightingale / Part 1"),
///     "Ode_ To a Nightingale _ Part 1"
/// );
/// ```
pub fn sanitize_filename(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut prev_underscore = false;
    let mut prev_space = false;

    for c in title.chars() {
        if c.is_whitespace() {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else if c == '_' || c.is_control() || RESERVED.contains(&c) {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
            prev_space = false;
        } else {
            out.push(c);
            prev_underscore = false;
            prev_space = false;
        }
    }

    let max_stem = NAME_MAX - POEM_EXTENSION.len() - 1;
    let mut name = trim_edges(&out).to_string();
    if name.len() > max_stem {
        let mut take = max_stem;
        while !name.is_char_boundary(take) {
            take -= 1;
        }
        name.truncate(take);
        name = trim_edges(&name).to_string();
    }

    if name.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    let stem = name.split('.').next().unwrap_or_default();
    if WINDOWS_DEVICES
        .iter()
        .any(|device| device.eq_ignore_ascii_case(stem))
    {
        name.insert(0, '_');
    }

    name
}

/// File name a poem with this title is written to
pub fn poem_filename(title: &str) -> String {
    format!("{}.{}", sanitize_filename(title), POEM_EXTENSION)
}

fn trim_edges(s: &str) -> &str {
    s.trim_matches(|c: char| c == ' ' || c == '.' || c == '_')
}
