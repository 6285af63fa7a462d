//! tmuxjump-tmux: tmux IO boundary.
//! Subprocess execution, client listing, and session ensure/switch.
//! No jumplist logic lives here.

pub mod attach;
pub mod clients;
pub mod error;
pub mod executor;
pub mod session;

pub use attach::AttachCommand;
pub use clients::{LIST_CLIENTS_FORMAT, TmuxClientInfo, list_clients, most_recent_client, parse_list_clients_output};
pub use error::TmuxError;
pub use executor::{TmuxCommandRunner, TmuxExecutor};
pub use session::{EnsureOutcome, ensure_session, has_session, new_session, switch_client};
