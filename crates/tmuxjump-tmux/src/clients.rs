//! TmuxClientInfo, list-clients format string, and parser.

use chrono::{DateTime, Utc};

use crate::error::TmuxError;
use crate::executor::TmuxCommandRunner;

/// Tab-delimited format string for `tmux list-clients -F`.
pub const LIST_CLIENTS_FORMAT: &str = "#{client_tty}\t#{client_activity}\t#{client_session}";

/// An attached tmux client (a terminal window already inside tmux).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmuxClientInfo {
    pub tty: String,
    /// Last input activity on the client (tmux `#{client_activity}`, epoch seconds).
    pub activity: DateTime<Utc>,
    pub session_name: String,
}

/// Execute `tmux list-clients` and parse the output.
///
/// With no server running tmux exits non-zero; callers decide whether that
/// means "no clients".
pub fn list_clients(runner: &impl TmuxCommandRunner) -> Result<Vec<TmuxClientInfo>, TmuxError> {
    let output = runner.run(&["list-clients", "-F", LIST_CLIENTS_FORMAT])?;
    Ok(parse_list_clients_output(&output))
}

/// Parse the raw output of `tmux list-clients -F <FORMAT>`.
/// Malformed lines are skipped.
pub fn parse_list_clients_output(output: &str) -> Vec<TmuxClientInfo> {
    let mut clients = Vec::new();
    for (idx, line) in output.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line, idx + 1) {
            Ok(client) => clients.push(client),
            Err(e) => tracing::debug!("skipping client line: {e}"),
        }
    }
    clients
}

fn parse_line(line: &str, line_num: usize) -> Result<TmuxClientInfo, TmuxError> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 2 {
        return Err(TmuxError::ParseError {
            line_num,
            detail: format!("expected at least 2 tab-separated fields, got {}", parts.len()),
        });
    }

    let tty = parts[0].trim();
    if tty.is_empty() {
        return Err(TmuxError::ParseError {
            line_num,
            detail: "empty client_tty".to_string(),
        });
    }

    let activity = parts[1]
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| TmuxError::ParseError {
            line_num,
            detail: format!("invalid client_activity {:?}", parts[1]),
        })?;

    Ok(TmuxClientInfo {
        tty: tty.to_string(),
        activity,
        session_name: parts.get(2).map(|s| s.to_string()).unwrap_or_default(),
    })
}

/// The client with the latest activity. Ties go to the client listed first.
pub fn most_recent_client(clients: &[TmuxClientInfo]) -> Option<&TmuxClientInfo> {
    clients.iter().fold(None, |best, c| match best {
        Some(b) if b.activity >= c.activity => Some(b),
        _ => Some(c),
    })
}
