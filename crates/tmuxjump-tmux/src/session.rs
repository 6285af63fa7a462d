//! Session existence, creation, and client switching.

use std::path::Path;

use crate::error::TmuxError;
use crate::executor::TmuxCommandRunner;

/// What `ensure_session` had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Existing,
    Created,
}

/// Exact-match target. Without `=` tmux would accept a prefix match,
/// so `dev` would be satisfied by an existing `devops`.
fn exact_target(session: &str) -> String {
    format!("={session}")
}

/// `tmux has-session -t =<session>`.
///
/// A non-zero exit (including "no server running") means absent; only a
/// failure to run tmux at all is an error.
pub fn has_session(runner: &impl TmuxCommandRunner, session: &str) -> Result<bool, TmuxError> {
    match runner.run(&["has-session", "-t", &exact_target(session)]) {
        Ok(_) => Ok(true),
        Err(TmuxError::CommandFailed(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

/// `tmux new-session -d -s <session> -c <directory>`.
pub fn new_session(
    runner: &impl TmuxCommandRunner,
    session: &str,
    directory: &Path,
) -> Result<(), TmuxError> {
    let dir = directory.to_string_lossy();
    runner.run(&["new-session", "-d", "-s", session, "-c", &dir])?;
    Ok(())
}

/// Guarantee a session named `session` exists. The directory only applies
/// when the session is created; an existing session is left untouched.
pub fn ensure_session(
    runner: &impl TmuxCommandRunner,
    session: &str,
    directory: &Path,
) -> Result<EnsureOutcome, TmuxError> {
    if has_session(runner, session)? {
        tracing::debug!("tmux session '{session}' already exists");
        return Ok(EnsureOutcome::Existing);
    }
    tracing::debug!(
        "creating tmux session '{session}' in {}",
        directory.display()
    );
    match new_session(runner, session, directory) {
        Ok(()) => Ok(EnsureOutcome::Created),
        // Lost a race with a concurrent invocation creating the same session.
        Err(TmuxError::CommandFailed(msg)) if has_session(runner, session).unwrap_or(false) => {
            tracing::debug!("new-session for '{session}' failed but session now exists: {msg}");
            Ok(EnsureOutcome::Existing)
        }
        Err(e) => Err(e),
    }
}

/// `tmux switch-client -c <client_tty> -t =<session>`.
pub fn switch_client(
    runner: &impl TmuxCommandRunner,
    client_tty: &str,
    session: &str,
) -> Result<(), TmuxError> {
    runner.run(&["switch-client", "-c", client_tty, "-t", &exact_target(session)])?;
    Ok(())
}
