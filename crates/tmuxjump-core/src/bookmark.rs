//! Appending `key:name:directory` bookmarks to a jumplist file.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::BookmarkError;
use crate::jumplist::{is_valid_session_name, split_key};

/// A keyed jumplist line to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub key: String,
    pub name: String,
    pub directory: PathBuf,
}

impl Bookmark {
    /// Validate and build. The name must survive a round trip through the
    /// line grammar, so it may not contain a colon.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        directory: impl Into<PathBuf>,
    ) -> Result<Self, BookmarkError> {
        let key = key.into();
        let name = name.into();
        let directory = directory.into();

        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(BookmarkError::InvalidKey(key));
        }
        if !is_valid_session_name(&name) || name.contains(':') {
            return Err(BookmarkError::InvalidName(name));
        }
        let dir = directory.to_string_lossy();
        if dir.is_empty() || dir.chars().any(char::is_control) {
            return Err(BookmarkError::InvalidDirectory(dir.into_owned()));
        }

        Ok(Self {
            key,
            name,
            directory,
        })
    }

    pub fn to_line(&self) -> String {
        format!("{}:{}:{}", self.key, self.name, self.directory.display())
    }
}

/// Keys used by keyed lines, sorted and deduplicated.
pub fn used_keys(contents: &str) -> Vec<String> {
    let mut keys: Vec<String> = contents
        .lines()
        .filter_map(|line| line_key(line).map(String::from))
        .collect();
    keys.sort();
    keys.dedup();
    keys
}

fn line_key(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.starts_with('#') {
        return None;
    }
    split_key(line).map(|(key, _)| key)
}

/// Append `bookmark` to the jumplist at `path`, creating it if needed.
///
/// If the key is already in use this fails with [`BookmarkError::KeyInUse`]
/// unless `replace` is set, in which case every line carrying that key is
/// removed first. All other lines are preserved verbatim.
pub fn add_bookmark(path: &Path, bookmark: &Bookmark, replace: bool) -> Result<(), BookmarkError> {
    let existing = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    let used = used_keys(&existing);
    let key_taken = used.iter().any(|k| k == &bookmark.key);

    if key_taken && !replace {
        return Err(BookmarkError::KeyInUse {
            key: bookmark.key.clone(),
            used,
        });
    }

    if key_taken {
        let kept: Vec<&str> = existing
            .lines()
            .filter(|line| line_key(line) != Some(bookmark.key.as_str()))
            .collect();
        let mut contents = kept.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        contents.push_str(&bookmark.to_line());
        contents.push('\n');
        std::fs::write(path, contents)?;
        tracing::info!("replaced key '{}' in {}", bookmark.key, path.display());
        return Ok(());
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    if !existing.is_empty() && !existing.ends_with('\n') {
        file.write_all(b"\n")?;
    }
    writeln!(file, "{}", bookmark.to_line())?;
    tracing::info!("added {} to {}", bookmark.to_line(), path.display());
    Ok(())
}
