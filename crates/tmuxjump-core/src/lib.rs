//! tmuxjump-core: jumplist parsing and key/directory resolution.
//!
//! Everything here is deterministic given a file and a home directory;
//! the home directory is always passed in, never read from the environment.

pub mod bookmark;
pub mod error;
pub mod jumplist;
pub mod resolver;

pub use bookmark::{Bookmark, add_bookmark, used_keys};
pub use error::{BookmarkError, JumplistError, ResolveError};
pub use jumplist::{
    JumplistEntry, JumplistIndex, expand_home, expand_tilde, parse_file, parse_line, parse_str,
};
pub use resolver::{ResolvedTarget, resolve, resolve_directory, resolve_session};
