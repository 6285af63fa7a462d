//! Terminal application collaborators: window probing, focusing and typing,
//! and launching a new window. macOS implementation over `open` and
//! `osascript`.

use std::process::Command;

use thiserror::Error;
use tmuxjump_tmux::AttachCommand;

use crate::config::{SpawnStyle, TerminalKind};

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with status {code}: {stderr}")]
    Failed {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("unexpected output from {program}: {output:?}")]
    UnexpectedOutput { program: String, output: String },

    #[error("no executable configured for {0}")]
    NoBinary(&'static str),
}

/// Focus the terminal application and drive its existing windows.
pub trait WindowFocuser {
    /// Number of open windows; 0 when the application is not running.
    fn window_count(&self) -> Result<usize, TerminalError>;
    /// Bring the application to the foreground.
    fn activate(&self) -> Result<(), TerminalError>;
    /// Focus the application, type `text` and press return.
    fn type_and_confirm(&self, text: &str) -> Result<(), TerminalError>;
}

/// Open a new terminal window running `command`.
///
/// For exec-style terminals a successful launch never returns: this process
/// image is replaced. Any `Ok` means the window is up and this invocation is
/// done.
pub trait ProcessLauncher {
    fn launch(&self, command: &AttachCommand) -> Result<(), TerminalError>;
}

/// The configured macOS terminal application.
#[derive(Debug, Clone)]
pub struct MacTerminal {
    kind: TerminalKind,
    bin: Option<String>,
}

impl MacTerminal {
    pub fn new(kind: TerminalKind, bin: Option<String>) -> Self {
        Self { kind, bin }
    }
}

impl WindowFocuser for MacTerminal {
    fn window_count(&self) -> Result<usize, TerminalError> {
        let output = osascript(&window_count_script(self.kind.process_name()))?;
        output
            .trim()
            .parse()
            .map_err(|_| TerminalError::UnexpectedOutput {
                program: "osascript".to_string(),
                output,
            })
    }

    fn activate(&self) -> Result<(), TerminalError> {
        run("open", &["-a", self.kind.app_name()]).map(|_| ())
    }

    fn type_and_confirm(&self, text: &str) -> Result<(), TerminalError> {
        osascript(&type_script(self.kind.app_name(), text)).map(|_| ())
    }
}

impl ProcessLauncher for MacTerminal {
    fn launch(&self, command: &AttachCommand) -> Result<(), TerminalError> {
        match self.kind.spawn_style() {
            SpawnStyle::Exec => {
                let bin = self
                    .bin
                    .as_deref()
                    .ok_or(TerminalError::NoBinary(self.kind.app_name()))?;
                exec_terminal(bin, command)
            }
            SpawnStyle::AppleScript => {
                osascript(&spawn_script(self.kind, &command.to_shell_string())).map(|_| ())
            }
        }
    }
}

#[cfg(unix)]
fn exec_terminal(bin: &str, command: &AttachCommand) -> Result<(), TerminalError> {
    use std::os::unix::process::CommandExt;

    tracing::debug!("exec {bin} -e {}", command.to_shell_string());
    let source = Command::new(bin).arg("-e").args(command.argv()).exec();
    Err(TerminalError::Spawn {
        program: bin.to_string(),
        source,
    })
}

#[cfg(not(unix))]
fn exec_terminal(bin: &str, command: &AttachCommand) -> Result<(), TerminalError> {
    Command::new(bin)
        .arg("-e")
        .args(command.argv())
        .spawn()
        .map(|_| ())
        .map_err(|source| TerminalError::Spawn {
            program: bin.to_string(),
            source,
        })
}

fn osascript(script: &str) -> Result<String, TerminalError> {
    run("osascript", &["-e", script])
}

fn run(program: &str, args: &[&str]) -> Result<String, TerminalError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| TerminalError::Spawn {
            program: program.to_string(),
            source,
        })?;
    if !output.status.success() {
        return Err(TerminalError::Failed {
            program: program.to_string(),
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Escape for an AppleScript double-quoted string literal.
pub(crate) fn applescript_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

pub(crate) fn window_count_script(process: &str) -> String {
    let process = applescript_quote(process);
    format!(
        r#"tell application "System Events"
  set isRunning to (exists process {process})
  if isRunning then
    try
      set winCount to count windows of process {process}
    on error
      set winCount to 0
    end try
  else
    set winCount to 0
  end if
end tell
return winCount"#
    )
}

pub(crate) fn type_script(app: &str, text: &str) -> String {
    let app = applescript_quote(app);
    let text = applescript_quote(text);
    format!(
        r#"tell application {app} to activate
delay 0.05
tell application "System Events"
  keystroke {text}
  key code 36
end tell"#
    )
}

pub(crate) fn spawn_script(kind: TerminalKind, command: &str) -> String {
    let command = applescript_quote(command);
    match kind {
        TerminalKind::Iterm2 => format!(
            r#"tell application "iTerm" to create window with default profile command {command}"#
        ),
        _ => {
            let app = applescript_quote(kind.app_name());
            format!(
                r#"tell application {app}
  do script {command}
  activate
end tell"#
            )
        }
    }
}
