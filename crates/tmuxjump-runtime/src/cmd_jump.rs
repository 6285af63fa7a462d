//! `tmuxjump <key>`: resolve, ensure, attach.

use tmuxjump_core::{ResolvedTarget, parse_file, resolve};

use crate::config::RuntimeConfig;
use crate::error::RunError;
use crate::orchestrator::{self, AttachOutcome};
use crate::terminal::MacTerminal;

/// Parse the jumplist and resolve `key` against it.
pub fn resolve_target(config: &RuntimeConfig, key: &str) -> Result<ResolvedTarget, RunError> {
    tracing::debug!("using jumplist file: {}", config.jumplist.display());
    let index = parse_file(&config.jumplist, &config.home)?;
    let target = resolve(&index, key, &config.home)?;
    tracing::debug!(
        "key '{key}' -> session '{}' in {}",
        target.session,
        target.directory.display()
    );
    Ok(target)
}

/// Entry point for a jump.
pub fn cmd_jump(config: &RuntimeConfig, key: &str) -> Result<AttachOutcome, RunError> {
    let target = resolve_target(config, key)?;

    let terminal = MacTerminal::new(config.terminal, config.terminal_bin.clone());
    orchestrator::ensure_target(&config.tmux, &target);
    let outcome = orchestrator::attach(&target.session, &config.tmux, &terminal, &terminal)?;
    Ok(outcome)
}

/// Entry point for `--dry-run`.
pub fn cmd_dry_run(config: &RuntimeConfig, key: &str, json: bool) -> Result<(), RunError> {
    let target = resolve_target(config, key)?;
    println!("{}", format_target(&target, json)?);
    Ok(())
}

fn format_target(target: &ResolvedTarget, json: bool) -> Result<String, RunError> {
    if json {
        let s = serde_json::to_string(target).map_err(anyhow::Error::from)?;
        Ok(s)
    } else {
        Ok(format!("{}\t{}", target.session, target.directory.display()))
    }
}
