//! kvbridge CLI: a Redis-style shell over the bridge.
//!
//! Three modes:
//! - **Shell mode**: `kvbridge [flags] OP ARGS...`: single operation, exit
//! - **REPL mode**: `kvbridge [flags]`: interactive prompt (if stdin is TTY)
//! - **Pipe mode**: `echo "set k v" | kvbridge`: line-by-line from stdin
//!
//! The CLI serves an in-memory store at the target address, so every
//! session starts from an empty database.

mod commands;
mod format;
mod parse;
mod repl;
mod state;
mod value;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::ArgMatches;
use kvbridge_client::MemoryConnector;
use kvbridge_executor::{Bridge, BridgeConfig, Result, CONFIG_FILE_NAME};
use tracing::Level;

use commands::build_cli;
use format::{format_error, OutputMode};
use parse::{matches_to_action, CliAction};
use state::SessionState;

fn main() {
    let matches = build_cli().get_matches();

    init_logging(matches.get_count("verbose"));

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else if matches.get_flag("raw") {
        OutputMode::Raw
    } else {
        OutputMode::Human
    };

    let config = match load_config(matches.get_one::<String>("config").map(Path::new)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(1);
        }
    };

    let host = matches
        .get_one::<String>("host")
        .cloned()
        .unwrap_or_else(|| config.default_host.clone());
    let port = matches
        .get_one::<i64>("port")
        .copied()
        .unwrap_or_else(|| i64::from(config.default_port));

    let bridge = match open_bridge(config, &host, port) {
        Ok(bridge) => bridge,
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(1);
        }
    };

    let (mut state, live) = SessionState::new(bridge, &host, port);
    if !live {
        eprintln!("(error) could not connect to {}:{}", host, port);
    }

    let code = if matches.get_one::<String>("op").is_some() {
        run_shell(&matches, &mut state, output_mode)
    } else if std::io::stdin().is_terminal() {
        repl::run_repl(&mut state, output_mode);
        0
    } else {
        repl::run_pipe(&mut state, output_mode)
    };

    drop(state);
    process::exit(code);
}

fn run_shell(matches: &ArgMatches, state: &mut SessionState, mode: OutputMode) -> i32 {
    match matches_to_action(matches) {
        Some(CliAction::Call { op, args }) => {
            if repl::execute(state, &op, &args, mode) {
                0
            } else {
                1
            }
        }
        Some(CliAction::Meta(_)) => {
            eprintln!("(error) REPL commands are not available in shell mode");
            1
        }
        None => 1,
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => return,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Explicit path, else `./kvbridge.toml` if present, else defaults.
fn load_config(explicit: Option<&Path>) -> Result<BridgeConfig> {
    match explicit {
        Some(path) => BridgeConfig::from_file(path),
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() {
                BridgeConfig::from_file(&local)
            } else {
                Ok(BridgeConfig::default())
            }
        }
    }
}

/// Build a bridge whose connector serves `host:port` from memory.
fn open_bridge(config: BridgeConfig, host: &str, port: i64) -> Result<Bridge> {
    let mut connector = MemoryConnector::new();
    connector.serve(&config.default_host, config.default_port);
    if let Ok(port) = u16::try_from(port) {
        if !host.is_empty() && port != 0 {
            connector.serve(host, port);
        }
    }
    Bridge::new(config, Box::new(connector))
}
