//! Key → session and session → directory resolution.

use std::num::IntErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ResolveError;
use crate::jumplist::JumplistIndex;

/// A session name and the directory it should start in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTarget {
    pub session: String,
    pub directory: PathBuf,
}

/// Map a key token to a session name.
///
/// An explicit key mapping always wins, even for numeric-looking keys.
/// Otherwise the token is read as a zero-based index into the sessions in
/// file order.
pub fn resolve_session<'a>(index: &'a JumplistIndex, key: &str) -> Result<&'a str, ResolveError> {
    if let Some(session) = index.session_for_key(key) {
        tracing::debug!("resolved '{key}' via key mapping to session '{session}'");
        return Ok(session);
    }

    let out_of_range = || ResolveError::OutOfRange {
        index: key.to_string(),
        len: index.len(),
    };

    let position = match key.parse::<i64>() {
        Ok(n) => n,
        Err(e) => {
            return Err(match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(),
                _ => ResolveError::InvalidKey(key.to_string()),
            });
        }
    };

    let session = usize::try_from(position)
        .ok()
        .and_then(|i| index.ordered_sessions().get(i))
        .ok_or_else(out_of_range)?;
    tracing::debug!("resolved index {position} positionally to session '{session}'");
    Ok(session.as_str())
}

/// Working directory for a session:
/// 1. the directory configured in the jumplist
/// 2. `~/<name>` if it is an existing directory
/// 3. `~`
pub fn resolve_directory(index: &JumplistIndex, session: &str, home: &Path) -> PathBuf {
    if let Some(dir) = index.directory_for(session) {
        tracing::debug!("using configured directory for '{session}': {}", dir.display());
        return dir.to_path_buf();
    }

    let conventional = home.join(session.trim_start_matches('/'));
    if conventional.is_dir() {
        tracing::debug!(
            "using default directory for '{session}': {}",
            conventional.display()
        );
        return conventional;
    }

    tracing::debug!("using home directory for '{session}'");
    home.to_path_buf()
}

/// Resolve a key token all the way to a [`ResolvedTarget`].
pub fn resolve(index: &JumplistIndex, key: &str, home: &Path) -> Result<ResolvedTarget, ResolveError> {
    let session = resolve_session(index, key)?;
    let directory = resolve_directory(index, session, home);
    Ok(ResolvedTarget {
        session: session.to_string(),
        directory,
    })
}
