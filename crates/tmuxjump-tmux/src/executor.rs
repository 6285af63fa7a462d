//! TmuxCommandRunner trait and TmuxExecutor (sync subprocess wrapper).

use crate::attach::AttachCommand;
use crate::error::TmuxError;

/// Trait for executing tmux commands. Enables mock injection for testing.
pub trait TmuxCommandRunner {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError>;
}

impl<T: TmuxCommandRunner + ?Sized> TmuxCommandRunner for &T {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        (**self).run(args)
    }
}

/// Real tmux executor using `std::process::Command`.
#[derive(Debug, Clone)]
pub struct TmuxExecutor {
    tmux_bin: String,
    socket_path: Option<String>,
    socket_name: Option<String>,
}

impl TmuxExecutor {
    pub fn new(tmux_bin: impl Into<String>) -> Self {
        Self {
            tmux_bin: tmux_bin.into(),
            socket_path: None,
            socket_name: None,
        }
    }

    #[must_use]
    pub fn with_socket_path(mut self, path: impl Into<String>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_socket_name(mut self, name: impl Into<String>) -> Self {
        self.socket_name = Some(name.into());
        self
    }

    pub fn tmux_bin(&self) -> &str {
        &self.tmux_bin
    }

    /// Global `-S`/`-L` arguments. Socket path takes precedence over socket name.
    pub fn socket_args(&self) -> Vec<String> {
        if let Some(ref path) = self.socket_path {
            vec!["-S".to_string(), path.clone()]
        } else if let Some(ref name) = self.socket_name {
            vec!["-L".to_string(), name.clone()]
        } else {
            Vec::new()
        }
    }

    /// `tmux [socket] attach -t <session>` as run by a fresh terminal.
    pub fn attach_command(&self, session: &str) -> AttachCommand {
        let mut argv = vec![self.tmux_bin.clone()];
        argv.extend(self.socket_args());
        argv.extend(["attach".to_string(), "-t".to_string(), session.to_string()]);
        AttachCommand::new(argv)
    }
}

impl Default for TmuxExecutor {
    fn default() -> Self {
        Self::new("tmux")
    }
}

impl TmuxCommandRunner for TmuxExecutor {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        let full_args = self.full_args(args);
        tracing::trace!("exec {} {}", self.tmux_bin, full_args.join(" "));
        let output = std::process::Command::new(&self.tmux_bin)
            .args(&full_args)
            .output()?;
        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }
        let subcommand = args.first().copied().unwrap_or("tmux");
        let status = output
            .status
            .code()
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        Err(TmuxError::CommandFailed(format!(
            "{subcommand} (status {status}): {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}

impl TmuxExecutor {
    fn full_args(&self, args: &[&str]) -> Vec<String> {
        let mut full = self.socket_args();
        full.extend(args.iter().map(|a| a.to_string()));
        full
    }
}
