//! clap command tree for the shell and the REPL.
//!
//! The shell takes global flags followed by an optional operation and its
//! arguments. The REPL reuses the same operation/argument shape without a
//! binary name.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the top-level CLI.
pub fn build_cli() -> Command {
    Command::new("kvbridge")
        .about("Shell for the kvbridge key-value bridge")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Config file (default: ./kvbridge.toml when present)"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Host to connect to (default from config)"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Port to connect to (default from config)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .conflicts_with("raw")
                .help("Print replies as JSON"),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .action(ArgAction::SetTrue)
                .help("Print bare values"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log to stderr (-v info, -vv debug, -vvv trace)"),
        )
        .arg(op_arg(false))
        .arg(args_arg())
}

/// Build the command used to parse one REPL or pipe line.
pub fn build_repl_cmd() -> Command {
    Command::new("kvbridge")
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(op_arg(true))
        .arg(args_arg())
}

fn op_arg(required: bool) -> Arg {
    Arg::new("op")
        .value_name("OP")
        .required(required)
        .help("Operation name (omit for REPL or pipe mode)")
}

fn args_arg() -> Arg {
    Arg::new("args")
        .value_name("ARGS")
        .num_args(0..)
        .trailing_var_arg(true)
        .allow_hyphen_values(true)
        .help("Operation arguments: integers, strings, nil, or JSON lists/objects")
}
