//! `tmuxjump --bookmark <key>`: add a directory to the jumplist.

use std::path::PathBuf;

use tmuxjump_core::{Bookmark, BookmarkError, add_bookmark};

use crate::config::{RuntimeConfig, cli_path};
use crate::error::RunError;

pub struct BookmarkOpts<'a> {
    pub key: &'a str,
    pub name: Option<&'a str>,
    pub dir: Option<&'a str>,
    pub replace: bool,
}

/// Build the bookmark: directory defaults to the current directory, name to
/// the directory's basename.
pub fn build_bookmark(config: &RuntimeConfig, opts: &BookmarkOpts<'_>) -> Result<Bookmark, RunError> {
    let directory: PathBuf = match opts.dir {
        Some(dir) => cli_path(dir, &config.home, &config.cwd),
        None => config.cwd.clone(),
    };
    let name = match opts.name {
        Some(name) => name.to_string(),
        None => directory
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| BookmarkError::InvalidName(directory.display().to_string()))?,
    };
    Ok(Bookmark::new(opts.key, name, directory)?)
}

/// Entry point for `--bookmark`.
pub fn cmd_bookmark(config: &RuntimeConfig, opts: &BookmarkOpts<'_>) -> Result<(), RunError> {
    let bookmark = build_bookmark(config, opts)?;
    add_bookmark(&config.jumplist, &bookmark, opts.replace)?;
    println!("Added: {}", bookmark.to_line());
    Ok(())
}
