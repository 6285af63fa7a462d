//! Jumplist file parser.
//!
//! Line grammar, first match wins:
//!
//! ```text
//! # comment                      skipped, as are blank lines
//! <key>:<name>                   keyed, no directory
//! <key>:<name>:<directory>       keyed, with directory
//! <name>:<directory>             unkeyed, with directory
//! <name>                         unkeyed, bare
//! ```
//!
//! A key is one or more ASCII letters/digits before the first colon. A line
//! whose key was already seen is dropped entirely, session included.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::JumplistError;

/// One parsed jumplist line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumplistEntry {
    pub key: Option<String>,
    pub name: String,
    /// Tilde-expanded, absolute. `None` means "derive at resolution time".
    pub directory: Option<PathBuf>,
}

/// Lookup structure built from a jumplist file. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumplistIndex {
    ordered_sessions: Vec<String>,
    directory_by_name: HashMap<String, PathBuf>,
    session_by_key: HashMap<String, String>,
}

impl JumplistIndex {
    /// Build from entries in file order, applying first-key-wins.
    pub fn from_entries(entries: impl IntoIterator<Item = JumplistEntry>) -> Self {
        let mut index = Self::default();
        for entry in entries {
            index.push(entry);
        }
        index
    }

    fn push(&mut self, entry: JumplistEntry) {
        if let Some(ref key) = entry.key {
            if let Some(existing) = self.session_by_key.get(key) {
                tracing::debug!(
                    "ignoring duplicate key '{key}' for session '{}' (already mapped to '{existing}')",
                    entry.name
                );
                return;
            }
            self.session_by_key.insert(key.clone(), entry.name.clone());
        }
        if let Some(dir) = entry.directory {
            self.directory_by_name.insert(entry.name.clone(), dir);
        }
        self.ordered_sessions.push(entry.name);
    }

    /// Session names in file order; position is the numeric index.
    pub fn ordered_sessions(&self) -> &[String] {
        &self.ordered_sessions
    }

    pub fn directory_for(&self, name: &str) -> Option<&Path> {
        self.directory_by_name.get(name).map(PathBuf::as_path)
    }

    pub fn session_for_key(&self, key: &str) -> Option<&str> {
        self.session_by_key.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ordered_sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_sessions.is_empty()
    }

    pub fn key_count(&self) -> usize {
        self.session_by_key.len()
    }
}

/// Read and parse a jumplist file.
///
/// Only a missing or unreadable file is an error; invalid UTF-8 is decoded
/// lossily and malformed lines are skipped.
pub fn parse_file(path: &Path, home: &Path) -> Result<JumplistIndex, JumplistError> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            JumplistError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            JumplistError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let index = parse_str(&String::from_utf8_lossy(&bytes), home);
    tracing::debug!(
        "loaded {} sessions, {} key mappings from {}",
        index.len(),
        index.key_count(),
        path.display()
    );
    Ok(index)
}

/// Parse jumplist text.
pub fn parse_str(contents: &str, home: &Path) -> JumplistIndex {
    JumplistIndex::from_entries(contents.lines().filter_map(|line| parse_line(line, home)))
}

/// Parse a single line into an entry. Returns `None` for blank lines,
/// comments, and malformed lines.
pub fn parse_line(line: &str, home: &Path) -> Option<JumplistEntry> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, name, raw_dir) = match split_key(line) {
        Some((key, rest)) => {
            let (name, raw_dir) = split_dir(rest);
            (Some(key.to_string()), name, raw_dir)
        }
        None => {
            let (name, raw_dir) = split_dir(line);
            (None, name, raw_dir)
        }
    };

    if !is_valid_session_name(name) {
        tracing::debug!("skipping line with unusable session name: {line:?}");
        return None;
    }

    let directory = raw_dir
        .filter(|d| !d.is_empty())
        .map(|d| expand_tilde(d, home));

    Some(JumplistEntry {
        key,
        name: name.to_string(),
        directory,
    })
}

/// `^([0-9a-zA-Z]+):(.+)$`: the key and a non-empty remainder.
pub(crate) fn split_key(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once(':')?;
    if key.is_empty() || rest.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some((key, rest))
}

/// Split `name:dir` on the first colon.
fn split_dir(s: &str) -> (&str, Option<&str>) {
    match s.split_once(':') {
        Some((name, dir)) => (name, Some(dir)),
        None => (s, None),
    }
}

pub(crate) fn is_valid_session_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_control)
}

/// Expand a leading `~` or `~/` against `home`. Anything else is returned
/// unchanged, relative or not.
pub fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        home.to_path_buf()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(raw)
    }
}

/// [`expand_home`], with relative results anchored at `home` so the returned
/// path is always absolute.
pub fn expand_tilde(raw: &str, home: &Path) -> PathBuf {
    let path = expand_home(raw, home);
    if path.is_absolute() {
        path
    } else {
        home.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> PathBuf {
        PathBuf::from("/home/u")
    }

    fn parse(s: &str) -> JumplistIndex {
        parse_str(s, &home())
    }

    #[test]
    fn comments_and_blank_lines_skipped() {
        let index = parse("# header\n\n   \n  # indented comment\nwork\n");
        assert_eq!(index.ordered_sessions(), ["work"]);
    }

    #[test]
    fn keyed_without_directory() {
        let entry = parse_line("a:alpha", &home()).expect("entry");
        assert_eq!(entry.key.as_deref(), Some("a"));
        assert_eq!(entry.name, "alpha");
        assert!(entry.directory.is_none());
    }

    #[test]
    fn keyed_with_tilde_directory() {
        let entry = parse_line("a:alpha:~/proj/alpha", &home()).expect("entry");
        assert_eq!(entry.key.as_deref(), Some("a"));
        assert_eq!(entry.name, "alpha");
        assert_eq!(entry.directory, Some(PathBuf::from("/home/u/proj/alpha")));
    }

    #[test]
    fn directory_split_on_first_colon_only() {
        let entry = parse_line("x:name:/srv/a:b", &home()).expect("entry");
        assert_eq!(entry.name, "name");
        assert_eq!(entry.directory, Some(PathBuf::from("/srv/a:b")));
    }

    #[test]
    fn unkeyed_with_directory() {
        // '-' is not alphanumeric, so "my-proj" cannot be a key
        let entry = parse_line("my-proj:/srv/proj", &home()).expect("entry");
        assert!(entry.key.is_none());
        assert_eq!(entry.name, "my-proj");
        assert_eq!(entry.directory, Some(PathBuf::from("/srv/proj")));
    }

    #[test]
    fn alphanumeric_prefix_is_always_a_key() {
        let entry = parse_line("work:/srv/work", &home()).expect("entry");
        assert_eq!(entry.key.as_deref(), Some("work"));
        assert_eq!(entry.name, "/srv/work");
        assert!(entry.directory.is_none());
    }

    #[test]
    fn bare_name() {
        let entry = parse_line("  dev  ", &home()).expect("entry");
        assert!(entry.key.is_none());
        assert_eq!(entry.name, "dev");
        assert!(entry.directory.is_none());
    }

    #[test]
    fn empty_directory_is_absent() {
        let entry = parse_line("my-proj:", &home()).expect("entry");
        assert_eq!(entry.name, "my-proj");
        assert!(entry.directory.is_none());
    }

    #[test]
    fn empty_name_skipped() {
        assert!(parse_line(":/srv/x", &home()).is_none());
        assert!(parse_line("a::/srv/x", &home()).is_none());
    }

    #[test]
    fn control_characters_skipped() {
        assert!(parse_line("bad\u{7}name", &home()).is_none());
        assert!(parse_line("a:tab\tname", &home()).is_none());
    }

    #[test]
    fn relative_directory_anchored_at_home() {
        let entry = parse_line("my-proj:code/proj", &home()).expect("entry");
        assert_eq!(entry.directory, Some(PathBuf::from("/home/u/code/proj")));
    }

    #[test]
    fn expand_home_leaves_relative_paths_alone() {
        assert_eq!(expand_home("~/x", &home()), PathBuf::from("/home/u/x"));
        assert_eq!(expand_home("lists/work", &home()), PathBuf::from("lists/work"));
        assert_eq!(expand_home("~other/x", &home()), PathBuf::from("~other/x"));
    }

    #[test]
    fn expand_tilde_variants() {
        assert_eq!(expand_tilde("~", &home()), PathBuf::from("/home/u"));
        assert_eq!(expand_tilde("~/x", &home()), PathBuf::from("/home/u/x"));
        assert_eq!(expand_tilde("/abs", &home()), PathBuf::from("/abs"));
    }

    #[test]
    fn first_key_wins_and_drops_later_line() {
        let index = parse("a:alpha\na:beta:/srv/beta\ngamma\n");
        assert_eq!(index.session_for_key("a"), Some("alpha"));
        assert_eq!(index.ordered_sessions(), ["alpha", "gamma"]);
        assert!(index.directory_for("beta").is_none());
    }

    #[test]
    fn duplicate_names_both_registered() {
        let index = parse("my-proj:/one\nmy-proj:/two\n");
        assert_eq!(index.ordered_sessions(), ["my-proj", "my-proj"]);
        assert_eq!(index.directory_for("my-proj"), Some(Path::new("/two")));
    }

    #[test]
    fn later_bare_line_keeps_directory() {
        let index = parse("a:alpha:/srv/alpha\nalpha\n");
        assert_eq!(index.ordered_sessions(), ["alpha", "alpha"]);
        assert_eq!(index.directory_for("alpha"), Some(Path::new("/srv/alpha")));
    }

    #[test]
    fn from_entries_applies_first_key_wins() {
        let entries = vec![
            JumplistEntry {
                key: Some("1".into()),
                name: "one".into(),
                directory: None,
            },
            JumplistEntry {
                key: Some("1".into()),
                name: "uno".into(),
                directory: None,
            },
        ];
        let index = JumplistIndex::from_entries(entries);
        assert_eq!(index.ordered_sessions(), ["one"]);
        assert_eq!(index.key_count(), 1);
    }

    #[test]
    fn parse_file_missing_is_not_found() {
        let err = parse_file(Path::new("/nonexistent/tmuxjump/.tmuxjumplist"), &home())
            .expect_err("missing");
        assert!(matches!(err, JumplistError::NotFound { .. }));
        assert!(err.to_string().starts_with("Missing "));
    }

    #[test]
    fn empty_input_is_empty_index() {
        let index = parse("");
        assert!(index.is_empty());
        assert_eq!(index.key_count(), 0);
    }
}
