//! Session ensure + attach cascade.
//!
//! Tiers, cheapest and least disruptive first:
//! 1. switch the most recently active attached tmux client to the session
//! 2. type an attach command into an already-open terminal window
//! 3. open a new terminal window that runs the attach command
//!
//! Probe failures downgrade to "no client" / "no windows" so the cascade always
//! reaches an action. Only the last tier can fail the invocation.

use std::path::Path;

use tmuxjump_core::ResolvedTarget;
use tmuxjump_tmux::{
    AttachCommand, EnsureOutcome, TmuxClientInfo, TmuxError, TmuxExecutor, most_recent_client,
};

use crate::terminal::{ProcessLauncher, TerminalError, WindowFocuser};

/// The tmux side of the cascade.
pub trait SessionStore {
    fn ensure_session(&self, session: &str, directory: &Path) -> Result<EnsureOutcome, TmuxError>;
    fn attached_clients(&self) -> Result<Vec<TmuxClientInfo>, TmuxError>;
    fn switch_client(&self, client_tty: &str, session: &str) -> Result<(), TmuxError>;
    fn attach_command(&self, session: &str) -> AttachCommand;
}

impl SessionStore for TmuxExecutor {
    fn ensure_session(&self, session: &str, directory: &Path) -> Result<EnsureOutcome, TmuxError> {
        tmuxjump_tmux::ensure_session(self, session, directory)
    }

    fn attached_clients(&self) -> Result<Vec<TmuxClientInfo>, TmuxError> {
        tmuxjump_tmux::list_clients(self)
    }

    fn switch_client(&self, client_tty: &str, session: &str) -> Result<(), TmuxError> {
        tmuxjump_tmux::switch_client(self, client_tty, session)
    }

    fn attach_command(&self, session: &str) -> AttachCommand {
        TmuxExecutor::attach_command(self, session)
    }
}

/// Which tier made the session visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachOutcome {
    SwitchedClient { tty: String },
    TypedIntoWindow,
    SpawnedWindow,
}

/// Make sure the session exists. Failures are logged and absorbed; the attach
/// tiers still run.
pub fn ensure_target(store: &impl SessionStore, target: &ResolvedTarget) -> Option<EnsureOutcome> {
    match store.ensure_session(&target.session, &target.directory) {
        Ok(outcome) => {
            tracing::debug!("session '{}': {outcome:?}", target.session);
            Some(outcome)
        }
        Err(e) => {
            tracing::warn!("could not ensure session '{}': {e}", target.session);
            None
        }
    }
}

/// Run the attach cascade for `session`, stopping at the first tier that works.
pub fn attach(
    session: &str,
    store: &impl SessionStore,
    focuser: &impl WindowFocuser,
    launcher: &impl ProcessLauncher,
) -> Result<AttachOutcome, TerminalError> {
    let clients = store.attached_clients().unwrap_or_else(|e| {
        tracing::debug!("list-clients failed, assuming no clients: {e}");
        Vec::new()
    });

    if let Some(client) = most_recent_client(&clients) {
        tracing::debug!("most recent tmux client: {}", client.tty);
        match store.switch_client(&client.tty, session) {
            Ok(()) => {
                if let Err(e) = focuser.activate() {
                    tracing::warn!("switched client but could not focus terminal: {e}");
                }
                tracing::info!("switched client {} to '{session}'", client.tty);
                return Ok(AttachOutcome::SwitchedClient {
                    tty: client.tty.clone(),
                });
            }
            Err(e) => tracing::warn!("switch-client on {} failed: {e}", client.tty),
        }
    } else {
        tracing::debug!("no tmux clients attached");
    }

    let command = store.attach_command(session);

    let windows = focuser.window_count().unwrap_or_else(|e| {
        tracing::warn!("window count probe failed, assuming none: {e}");
        0
    });
    tracing::debug!("terminal window count: {windows}");

    if windows > 0 {
        match focuser.type_and_confirm(&command.to_shell_string()) {
            Ok(()) => {
                tracing::info!("typed attach for '{session}' into existing terminal window");
                return Ok(AttachOutcome::TypedIntoWindow);
            }
            Err(e) => tracing::warn!("typing into terminal failed: {e}"),
        }
    }

    tracing::info!("opening new terminal window for '{session}'");
    launcher.launch(&command)?;
    Ok(AttachOutcome::SpawnedWindow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    /// Records every collaborator call in order.
    #[derive(Default)]
    struct Calls(RefCell<Vec<String>>);

    impl Calls {
        fn push(&self, call: impl Into<String>) {
            self.0.borrow_mut().push(call.into());
        }

        fn names(&self) -> Vec<String> {
            self.0.borrow().clone()
        }

        fn contains(&self, prefix: &str) -> bool {
            self.0.borrow().iter().any(|c| c.starts_with(prefix))
        }
    }

    struct FakeStore<'a> {
        calls: &'a Calls,
        clients: Result<Vec<TmuxClientInfo>, ()>,
        switch_ok: bool,
        ensure_ok: bool,
    }

    impl<'a> FakeStore<'a> {
        fn new(calls: &'a Calls) -> Self {
            Self {
                calls,
                clients: Ok(Vec::new()),
                switch_ok: true,
                ensure_ok: true,
            }
        }

        fn with_clients(mut self, clients: &[(&str, i64)]) -> Self {
            self.clients = Ok(clients
                .iter()
                .map(|(tty, secs)| TmuxClientInfo {
                    tty: tty.to_string(),
                    activity: chrono_ts(*secs),
                    session_name: "main".to_string(),
                })
                .collect());
            self
        }
    }

    fn chrono_ts(secs: i64) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::from_timestamp(secs, 0).expect("valid timestamp")
    }

    fn failed(msg: &str) -> TmuxError {
        TmuxError::CommandFailed(msg.to_string())
    }

    impl SessionStore for FakeStore<'_> {
        fn ensure_session(&self, session: &str, _directory: &Path) -> Result<EnsureOutcome, TmuxError> {
            self.calls.push(format!("ensure {session}"));
            if self.ensure_ok {
                Ok(EnsureOutcome::Created)
            } else {
                Err(failed("no server"))
            }
        }

        fn attached_clients(&self) -> Result<Vec<TmuxClientInfo>, TmuxError> {
            self.calls.push("list-clients");
            self.clients.clone().map_err(|()| failed("no server running"))
        }

        fn switch_client(&self, client_tty: &str, session: &str) -> Result<(), TmuxError> {
            self.calls.push(format!("switch {client_tty} {session}"));
            if self.switch_ok {
                Ok(())
            } else {
                Err(failed("can't find client"))
            }
        }

        fn attach_command(&self, session: &str) -> AttachCommand {
            AttachCommand::new(vec![
                "tmux".to_string(),
                "attach".to_string(),
                "-t".to_string(),
                session.to_string(),
            ])
        }
    }

    struct FakeTerminal<'a> {
        calls: &'a Calls,
        windows: Result<usize, ()>,
        type_ok: bool,
        activate_ok: bool,
        launch_code: Option<i32>,
    }

    impl<'a> FakeTerminal<'a> {
        fn new(calls: &'a Calls) -> Self {
            Self {
                calls,
                windows: Ok(0),
                type_ok: true,
                activate_ok: true,
                launch_code: None,
            }
        }
    }

    fn term_err() -> TerminalError {
        TerminalError::Failed {
            program: "osascript".to_string(),
            code: 1,
            stderr: "execution error".to_string(),
        }
    }

    impl WindowFocuser for FakeTerminal<'_> {
        fn window_count(&self) -> Result<usize, TerminalError> {
            self.calls.push("window-count");
            self.windows.map_err(|()| term_err())
        }

        fn activate(&self) -> Result<(), TerminalError> {
            self.calls.push("activate");
            if self.activate_ok { Ok(()) } else { Err(term_err()) }
        }

        fn type_and_confirm(&self, text: &str) -> Result<(), TerminalError> {
            self.calls.push(format!("type {text}"));
            if self.type_ok { Ok(()) } else { Err(term_err()) }
        }
    }

    impl ProcessLauncher for FakeTerminal<'_> {
        fn launch(&self, command: &AttachCommand) -> Result<(), TerminalError> {
            self.calls.push(format!("launch {}", command.to_shell_string()));
            match self.launch_code {
                None => Ok(()),
                Some(code) => Err(TerminalError::Failed {
                    program: "alacritty".to_string(),
                    code,
                    stderr: String::new(),
                }),
            }
        }
    }

    #[test]
    fn attached_client_short_circuits_cascade() {
        let calls = Calls::default();
        let store = FakeStore::new(&calls).with_clients(&[("/dev/ttys001", 100)]);
        let term = FakeTerminal {
            windows: Ok(3),
            ..FakeTerminal::new(&calls)
        };

        let outcome = attach("work", &store, &term, &term).expect("attached");

        assert_eq!(
            outcome,
            AttachOutcome::SwitchedClient {
                tty: "/dev/ttys001".into()
            }
        );
        assert_eq!(
            calls.names(),
            vec!["list-clients", "switch /dev/ttys001 work", "activate"]
        );
        assert!(!calls.contains("window-count"));
        assert!(!calls.contains("launch"));
    }

    #[test]
    fn most_recent_client_is_switched() {
        let calls = Calls::default();
        let store = FakeStore::new(&calls).with_clients(&[
            ("/dev/ttys001", 100),
            ("/dev/ttys002", 500),
            ("/dev/ttys003", 300),
        ]);
        let term = FakeTerminal::new(&calls);

        attach("work", &store, &term, &term).expect("attached");

        assert!(calls.contains("switch /dev/ttys002 work"));
    }

    #[test]
    fn activate_failure_does_not_fail_switch() {
        let calls = Calls::default();
        let store = FakeStore::new(&calls).with_clients(&[("/dev/ttys001", 1)]);
        let term = FakeTerminal {
            activate_ok: false,
            ..FakeTerminal::new(&calls)
        };

        let outcome = attach("work", &store, &term, &term).expect("attached");
        assert!(matches!(outcome, AttachOutcome::SwitchedClient { .. }));
    }

    #[test]
    fn no_client_with_windows_types_attach() {
        let calls = Calls::default();
        let store = FakeStore::new(&calls);
        let term = FakeTerminal {
            windows: Ok(2),
            ..FakeTerminal::new(&calls)
        };

        let outcome = attach("my work", &store, &term, &term).expect("attached");

        assert_eq!(outcome, AttachOutcome::TypedIntoWindow);
        assert_eq!(
            calls.names(),
            vec!["list-clients", "window-count", "type tmux attach -t 'my work'"]
        );
    }

    #[test]
    fn no_client_no_windows_spawns() {
        let calls = Calls::default();
        let store = FakeStore::new(&calls);
        let term = FakeTerminal::new(&calls);

        let outcome = attach("work", &store, &term, &term).expect("attached");

        assert_eq!(outcome, AttachOutcome::SpawnedWindow);
        assert_eq!(
            calls.names(),
            vec!["list-clients", "window-count", "launch tmux attach -t work"]
        );
    }

    #[test]
    fn probe_failures_downgrade_to_spawn() {
        let calls = Calls::default();
        let store = FakeStore {
            clients: Err(()),
            ..FakeStore::new(&calls)
        };
        let term = FakeTerminal {
            windows: Err(()),
            ..FakeTerminal::new(&calls)
        };

        let outcome = attach("work", &store, &term, &term).expect("attached");
        assert_eq!(outcome, AttachOutcome::SpawnedWindow);
    }

    #[test]
    fn failed_switch_falls_through_to_typing() {
        let calls = Calls::default();
        let store = FakeStore {
            switch_ok: false,
            ..FakeStore::new(&calls).with_clients(&[("/dev/ttys001", 1)])
        };
        let term = FakeTerminal {
            windows: Ok(1),
            ..FakeTerminal::new(&calls)
        };

        let outcome = attach("work", &store, &term, &term).expect("attached");
        assert_eq!(outcome, AttachOutcome::TypedIntoWindow);
        assert!(!calls.contains("activate"));
    }

    #[test]
    fn failed_typing_falls_through_to_spawn() {
        let calls = Calls::default();
        let store = FakeStore::new(&calls);
        let term = FakeTerminal {
            windows: Ok(1),
            type_ok: false,
            ..FakeTerminal::new(&calls)
        };

        let outcome = attach("work", &store, &term, &term).expect("attached");
        assert_eq!(outcome, AttachOutcome::SpawnedWindow);
        assert!(calls.contains("launch"));
    }

    #[test]
    fn launch_failure_is_returned() {
        let calls = Calls::default();
        let store = FakeStore::new(&calls);
        let term = FakeTerminal {
            launch_code: Some(3),
            ..FakeTerminal::new(&calls)
        };

        let err = attach("work", &store, &term, &term).expect_err("launch failed");
        assert!(matches!(err, TerminalError::Failed { code: 3, .. }));
    }

    #[test]
    fn ensure_target_absorbs_failure() {
        let calls = Calls::default();
        let store = FakeStore {
            ensure_ok: false,
            ..FakeStore::new(&calls)
        };
        let target = ResolvedTarget {
            session: "work".into(),
            directory: PathBuf::from("/srv/work"),
        };
        assert!(ensure_target(&store, &target).is_none());
        assert_eq!(calls.names(), vec!["ensure work"]);
    }
}
