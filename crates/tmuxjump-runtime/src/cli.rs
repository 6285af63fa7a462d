//! CLI definition using clap derive.

use clap::Parser;

use crate::config::TerminalKind;

#[derive(Parser, Debug)]
#[command(
    name = "tmuxjump",
    version,
    about = "Jump to a tmux session by key",
    long_about = "Resolve a key from the jumplist to a tmux session, create the session if \
                  needed, and bring it into view: switch an attached client, type into an \
                  open terminal window, or open a new terminal window."
)]
pub struct Cli {
    /// Key from the jumplist, or a zero-based index into it
    #[arg(allow_negative_numbers = true)]
    pub key: String,

    /// Jumplist file (default: ~/.tmuxjumplist)
    pub jumplist: Option<String>,

    /// tmux binary
    #[arg(long, env = "TMUXJUMP_TMUX", default_value = "tmux")]
    pub tmux: String,

    /// tmux socket name (tmux -L)
    #[arg(long, short = 'L')]
    pub tmux_socket_name: Option<String>,

    /// tmux socket path (tmux -S); takes precedence over --tmux-socket-name
    #[arg(long, short = 'S')]
    pub tmux_socket_path: Option<String>,

    /// Terminal application hosting tmux
    #[arg(long, value_enum, env = "TMUXJUMP_TERMINAL", default_value_t = TerminalKind::Alacritty)]
    pub terminal: TerminalKind,

    /// Terminal executable for alacritty/ghostty (default: the app bundle binary)
    #[arg(long)]
    pub terminal_bin: Option<String>,

    /// Diagnostic log file (default: ~/tmuxjump.log)
    #[arg(long, env = "TMUXJUMP_LOG_FILE")]
    pub log_file: Option<String>,

    /// Resolve and print the target without touching tmux or the terminal
    #[arg(long, conflicts_with = "bookmark")]
    pub dry_run: bool,

    /// With --dry-run, print the target as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Add the current directory to the jumplist under KEY instead of jumping
    #[arg(long)]
    pub bookmark: bool,

    /// Session name for --bookmark (default: directory basename)
    #[arg(long, requires = "bookmark")]
    pub name: Option<String>,

    /// Directory for --bookmark (default: current directory)
    #[arg(long, requires = "bookmark")]
    pub dir: Option<String>,

    /// With --bookmark, replace existing lines using KEY
    #[arg(long, requires = "bookmark")]
    pub replace: bool,
}
