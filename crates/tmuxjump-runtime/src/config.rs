//! Runtime configuration: everything the jump pipeline needs, resolved once
//! from CLI flags, environment, and the home directory.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tmuxjump_core::expand_home;
use tmuxjump_tmux::TmuxExecutor;

use crate::cli::Cli;

pub const DEFAULT_JUMPLIST: &str = "~/.tmuxjumplist";
pub const DEFAULT_LOG_FILE: &str = "~/tmuxjump.log";

/// Terminal application that hosts tmux windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TerminalKind {
    Alacritty,
    Ghostty,
    Iterm2,
    Terminal,
}

/// How a new terminal window is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnStyle {
    /// Replace this process with `<bin> -e <attach argv>`.
    Exec,
    /// Ask the application over AppleScript to open a window running the command.
    AppleScript,
}

impl TerminalKind {
    /// Name used with `open -a` and `tell application`.
    pub fn app_name(self) -> &'static str {
        match self {
            Self::Alacritty => "Alacritty",
            Self::Ghostty => "Ghostty",
            Self::Iterm2 => "iTerm",
            Self::Terminal => "Terminal",
        }
    }

    /// Process name as seen by System Events.
    pub fn process_name(self) -> &'static str {
        match self {
            Self::Iterm2 => "iTerm2",
            other => other.app_name(),
        }
    }

    pub fn default_bin(self) -> Option<&'static str> {
        match self {
            Self::Alacritty => Some("/Applications/Alacritty.app/Contents/MacOS/alacritty"),
            Self::Ghostty => Some("/Applications/Ghostty.app/Contents/MacOS/ghostty"),
            Self::Iterm2 | Self::Terminal => None,
        }
    }

    pub fn spawn_style(self) -> SpawnStyle {
        match self {
            Self::Alacritty | Self::Ghostty => SpawnStyle::Exec,
            Self::Iterm2 | Self::Terminal => SpawnStyle::AppleScript,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub home: PathBuf,
    /// Working directory relative CLI paths are resolved against.
    pub cwd: PathBuf,
    pub jumplist: PathBuf,
    pub log_file: PathBuf,
    pub tmux: TmuxExecutor,
    pub terminal: TerminalKind,
    /// Executable for exec-style terminals.
    pub terminal_bin: Option<String>,
}

impl RuntimeConfig {
    pub fn from_cli(cli: &Cli, home: &Path, cwd: &Path) -> Self {
        let path = |raw: &str| cli_path(raw, home, cwd);
        let jumplist = path(cli.jumplist.as_deref().unwrap_or(DEFAULT_JUMPLIST));
        let log_file = path(cli.log_file.as_deref().unwrap_or(DEFAULT_LOG_FILE));

        let mut tmux = TmuxExecutor::new(cli.tmux.clone());
        if let Some(ref name) = cli.tmux_socket_name {
            tmux = tmux.with_socket_name(name.clone());
        }
        if let Some(ref socket) = cli.tmux_socket_path {
            tmux = tmux.with_socket_path(path(socket).to_string_lossy().into_owned());
        }

        let terminal_bin = cli
            .terminal_bin
            .clone()
            .or_else(|| cli.terminal.default_bin().map(String::from));

        Self {
            home: home.to_path_buf(),
            cwd: cwd.to_path_buf(),
            jumplist,
            log_file,
            tmux,
            terminal: cli.terminal,
            terminal_bin,
        }
    }
}

/// A path given on the command line: `~` expands to `home`, other relative
/// paths are taken from `cwd`.
pub fn cli_path(raw: &str, home: &Path, cwd: &Path) -> PathBuf {
    cwd.join(expand_home(raw, home))
}
