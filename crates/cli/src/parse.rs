//! Line and ArgMatches → CliAction conversion.
//!
//! - REPL meta-commands (`quit`, `help`, `connect`, ...) → `CliAction::Meta`
//! - Anything else → `CliAction::Call` with auto-detected argument values

use clap::ArgMatches;
use kvbridge_executor::Value;

use crate::value::parse_values;

/// The result of parsing user input.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    /// An operation to dispatch on the current handle.
    Call { op: String, args: Vec<Value> },
    /// A REPL-only meta-command.
    Meta(MetaCommand),
}

/// REPL-only commands that never reach the bridge dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    Quit,
    Clear,
    Help { op: Option<String> },
    Ops,
    Status,
    Close,
    Connect { host: Option<String>, port: Option<String> },
}

/// Check whether the tokens of a line form a meta-command.
pub fn check_meta_command(tokens: &[String]) -> Option<MetaCommand> {
    let first = tokens.first()?;
    let arg = |i: usize| tokens.get(i).cloned();
    match first.to_lowercase().as_str() {
        "quit" | "exit" => Some(MetaCommand::Quit),
        "clear" => Some(MetaCommand::Clear),
        "help" => Some(MetaCommand::Help { op: arg(1) }),
        "ops" => Some(MetaCommand::Ops),
        "status" => Some(MetaCommand::Status),
        "close" => Some(MetaCommand::Close),
        "connect" => Some(MetaCommand::Connect {
            host: arg(1),
            port: arg(2),
        }),
        _ => None,
    }
}

/// Convert parsed matches into an action.
pub fn matches_to_action(matches: &ArgMatches) -> Option<CliAction> {
    let op = matches.get_one::<String>("op")?.clone();
    let raw: Vec<String> = matches
        .get_many::<String>("args")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default();

    let mut tokens = Vec::with_capacity(raw.len() + 1);
    tokens.push(op.clone());
    tokens.extend(raw.iter().cloned());
    if let Some(meta) = check_meta_command(&tokens) {
        return Some(CliAction::Meta(meta));
    }

    Some(CliAction::Call {
        op,
        args: parse_values(&raw),
    })
}
