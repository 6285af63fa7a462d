//! tmuxjump: jump to a tmux session by key.
//! Invoked once per hotkey press; exits with a sysexits-style code.

use clap::Parser;

mod cli;
mod cmd_bookmark;
mod cmd_jump;
mod config;
mod error;
mod logging;
mod orchestrator;
mod terminal;

fn main() {
    let args = match cli::Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = error::usage_exit_code(&e);
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let Some(home) = dirs::home_dir() else {
        eprintln!("cannot determine home directory");
        std::process::exit(1);
    };
    let cwd = std::env::current_dir().unwrap_or_else(|_| home.clone());
    let config = config::RuntimeConfig::from_cli(&args, &home, &cwd);
    logging::init(&config.log_file);
    tracing::debug!("starting tmuxjump with args: {:?}", std::env::args().collect::<Vec<_>>());

    let result = if args.bookmark {
        let opts = cmd_bookmark::BookmarkOpts {
            key: &args.key,
            name: args.name.as_deref(),
            dir: args.dir.as_deref(),
            replace: args.replace,
        };
        cmd_bookmark::cmd_bookmark(&config, &opts)
    } else if args.dry_run {
        cmd_jump::cmd_dry_run(&config, &args.key, args.json)
    } else {
        cmd_jump::cmd_jump(&config, &args.key).map(|outcome| {
            tracing::debug!("attach outcome: {outcome:?}");
        })
    };

    if let Err(e) = result {
        eprintln!("tmuxjump: {e}");
        tracing::error!("{e}");
        std::process::exit(e.exit_code());
    }
}
