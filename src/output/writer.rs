use crate::model::PoemContent;
use crate::output::filename::{poem_filename, sanitize_filename};
use crate::ScrapeError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static PART_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Creates the output directory and any missing parents
///
/// Succeeds if the directory already exists.
pub async fn ensure_dir(dir: &Path) -> Result<(), ScrapeError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ScrapeError::Io {
            path: dir.to_path_buf(),
            source,
        })
}

/// Subdirectory of `root` holding one poet's poems
pub fn poet_dir(root: &Path, poet_name: &str) -> PathBuf {
    root.join(sanitize_filename(poet_name))
}

/// Directory a single poet's poems go to
///
/// `root` itself when its name already mentions the poet (case-insensitive),
/// otherwise the poet's subdirectory of `root`.
pub fn poet_target_dir(root: &Path, poet_name: &str) -> PathBuf {
    let wanted = poet_name.trim().to_lowercase();
    let named_after_poet = root
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .is_some_and(|name| !wanted.is_empty() && name.contains(&wanted));

    if named_after_poet {
        root.to_path_buf()
    } else {
        poet_dir(root, poet_name)
    }
}

/// Writes a poem body to `<dir>/<sanitized title>.txt`
///
/// The body goes to a uniquely named `.part` file first and is then renamed
/// over the final name, so concurrent writers of the same title leave one
/// complete body behind.
pub async fn write_poem(dir: &Path, poem: &PoemContent) -> Result<PathBuf, ScrapeError> {
    let path = dir.join(poem_filename(&poem.title));
    let part = part_path(&path);

    let written = async {
        tokio::fs::write(&part, poem.body.as_bytes()).await?;
        tokio::fs::rename(&part, &path).await
    }
    .await;

    if let Err(source) = written {
        // Best effort; the original error is the one worth reporting.
        let _ = tokio::fs::remove_file(&part).await;
        return Err(ScrapeError::Io { path, source });
    }

    tracing::debug!(path = %path.display(), verses = poem.verse_count(), "Wrote poem");
    Ok(path)
}

/// `<final path>.<n>.part`, unique within this process
fn part_path(final_path: &Path) -> PathBuf {
    let n = PART_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut name = OsString::from(final_path.as_os_str());
    name.push(format!(".{}.{n}.part", std::process::id()));
    PathBuf::from(name)
}
