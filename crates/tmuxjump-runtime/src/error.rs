//! Top-level error and exit-code mapping.

use thiserror::Error;
use tmuxjump_core::{BookmarkError, JumplistError, ResolveError};

use crate::terminal::TerminalError;

/// Command line usage error (sysexits EX_USAGE).
pub const EXIT_USAGE: i32 = 64;
/// Key did not resolve, or bookmark input was rejected (EX_DATAERR).
pub const EXIT_DATA: i32 = 65;
/// Jumplist missing or unreadable (EX_NOINPUT).
pub const EXIT_NO_INPUT: i32 = 66;

/// Exit code for a failed `Cli::try_parse`: `--help`/`--version` exit 0,
/// real parse errors exit 64.
pub fn usage_exit_code(e: &clap::Error) -> i32 {
    if e.use_stderr() { EXIT_USAGE } else { 0 }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Jumplist(#[from] JumplistError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Bookmark(#[from] BookmarkError),

    #[error(transparent)]
    Terminal(#[from] TerminalError),

    #[error(transparent)]
    Setup(#[from] anyhow::Error),
}

impl RunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Jumplist(_) => EXIT_NO_INPUT,
            Self::Resolve(_) => EXIT_DATA,
            Self::Bookmark(BookmarkError::Io(_)) => 1,
            Self::Bookmark(_) => EXIT_DATA,
            Self::Terminal(TerminalError::Failed { code, .. }) if *code > 0 => *code,
            Self::Terminal(_) | Self::Setup(_) => 1,
        }
    }
}
