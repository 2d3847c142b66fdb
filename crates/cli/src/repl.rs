//! REPL loop with rustyline.
//!
//! Interactive mode: prompt, meta-commands, history, TAB completion.
//! Pipe mode: read lines from stdin, execute each.

use std::io::{self, BufRead};

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, Editor, Helper};

use crate::commands::build_repl_cmd;
use crate::format::{format_error, format_reply, OutputMode};
use crate::parse::{check_meta_command, matches_to_action, CliAction, MetaCommand};
use crate::state::SessionState;

/// What the loop should do after one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Keep reading. `false` if the line failed.
    Continue(bool),
    Quit,
}

/// Run the interactive REPL.
pub fn run_repl(state: &mut SessionState, mode: OutputMode) {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .build();

    let mut rl: Editor<BridgeHelper, _> = match Editor::with_config(config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("(error) cannot start line editor: {}", e);
            return;
        }
    };
    rl.set_helper(Some(BridgeHelper::new(state.bridge().operations())));

    let history_path = history_file();
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    loop {
        let prompt = state.prompt();
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                if run_line(state, trimmed, mode) == LineOutcome::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("(error) {:?}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }
}

/// Run in pipe mode: read lines from stdin, execute each.
///
/// Returns 1 if any line failed, else 0.
pub fn run_pipe(state: &mut SessionState, mode: OutputMode) -> i32 {
    let stdin = io::stdin();
    let mut exit_code = 0;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match run_line(state, trimmed, mode) {
            LineOutcome::Quit => break,
            LineOutcome::Continue(false) => exit_code = 1,
            LineOutcome::Continue(true) => {}
        }
    }

    exit_code
}

/// Tokenize, parse, and run one line, printing the result.
pub fn run_line(state: &mut SessionState, line: &str, mode: OutputMode) -> LineOutcome {
    let tokens = match shlex::split(line) {
        Some(t) => t,
        None => {
            eprintln!("(error) Invalid quoting");
            return LineOutcome::Continue(false);
        }
    };
    if tokens.is_empty() {
        return LineOutcome::Continue(true);
    }

    if let Some(meta) = check_meta_command(&tokens) {
        return run_meta(state, meta);
    }

    let matches = match build_repl_cmd().try_get_matches_from(tokens) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{}", e);
            return LineOutcome::Continue(false);
        }
    };

    match matches_to_action(&matches) {
        Some(CliAction::Call { op, args }) => LineOutcome::Continue(execute(state, &op, &args, mode)),
        Some(CliAction::Meta(meta)) => run_meta(state, meta),
        None => LineOutcome::Continue(false),
    }
}

/// Dispatch one operation and print its reply. Returns `true` on success.
pub fn execute(
    state: &mut SessionState,
    op: &str,
    args: &[kvbridge_executor::Value],
    mode: OutputMode,
) -> bool {
    match state.execute(op, args) {
        Ok(reply) => {
            let text = format_reply(&reply, mode);
            if reply.is_success() {
                if !text.is_empty() {
                    println!("{}", text);
                }
                true
            } else {
                eprintln!("{}", text);
                false
            }
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            false
        }
    }
}

fn run_meta(state: &mut SessionState, meta: MetaCommand) -> LineOutcome {
    match meta {
        MetaCommand::Quit => return LineOutcome::Quit,
        MetaCommand::Clear => print!("\x1B[2J\x1B[1;1H"),
        MetaCommand::Help { op } => print_help(state, op.as_deref()),
        MetaCommand::Ops => {
            for name in state.bridge().operations() {
                println!("{}", name);
            }
        }
        MetaCommand::Status => println!("{}", state.describe()),
        MetaCommand::Close => {
            if !state.close() {
                eprintln!("(error) handle is not live");
                return LineOutcome::Continue(false);
            }
        }
        MetaCommand::Connect { host, port } => {
            let config = state.bridge().config();
            let host = host.unwrap_or_else(|| config.default_host.clone());
            let port = match port {
                None => i64::from(config.default_port),
                Some(p) => match p.parse::<i64>() {
                    Ok(p) => p,
                    Err(_) => {
                        eprintln!("(error) invalid port: {}", p);
                        return LineOutcome::Continue(false);
                    }
                },
            };
            if !state.connect(&host, port) {
                eprintln!("(error) could not connect to {}:{}", host, port);
                return LineOutcome::Continue(false);
            }
        }
    }
    LineOutcome::Continue(true)
}

fn history_file() -> Option<String> {
    std::env::var("HOME")
        .ok()
        .map(|home| format!("{}/.kvbridge_history", home))
}

fn print_help(state: &SessionState, op: Option<&str>) {
    if let Some(name) = op {
        match state.bridge().describe(name) {
            Some(d) => println!("{}  [{}]", d.signature(), d.family.name()),
            None => eprintln!("(error) unknown operation: {}", name),
        }
        return;
    }

    println!("Usage: <op> [args...]");
    println!();
    println!("Arguments: integers, strings ('quoted with spaces'), nil,");
    println!("JSON lists [\"a\",\"b\"], JSON objects {{\"k\":\"v\"}} or {{\"member\":1}}");
    println!();
    println!("Commands:");
    println!("  ops                    List operations");
    println!("  help [op]              Show help or an operation signature");
    println!("  connect [host] [port]  Replace the current handle");
    println!("  close                  Close the current handle");
    println!("  status                 Show the current handle");
    println!("  quit / exit            Exit REPL");
    println!("  clear                  Clear screen");
}

// =========================================================================
// TAB Completion
// =========================================================================

const META_COMMANDS: &[&str] = &[
    "ops", "help", "connect", "close", "status", "quit", "exit", "clear",
];

struct BridgeHelper {
    operations: Vec<&'static str>,
}

impl BridgeHelper {
    fn new(operations: &[&'static str]) -> Self {
        Self {
            operations: operations.to_vec(),
        }
    }

    fn candidates(&self, words: &[&'static str], prefix: &str) -> Vec<Pair> {
        words
            .iter()
            .filter(|w| w.starts_with(prefix))
            .map(|w| Pair {
                display: w.to_string(),
                replacement: w.to_string(),
            })
            .collect()
    }
}

impl Helper for BridgeHelper {}
impl Validator for BridgeHelper {}
impl Highlighter for BridgeHelper {}
impl Hinter for BridgeHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Completer for BridgeHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_pos = &line[..pos];
        let parts: Vec<&str> = line_to_pos.split_whitespace().collect();
        let trailing_space = line_to_pos.ends_with(' ');

        if parts.is_empty() || (parts.len() == 1 && !trailing_space) {
            let prefix = parts.first().copied().unwrap_or("");
            let mut words = self.operations.clone();
            words.extend_from_slice(META_COMMANDS);
            Ok((pos - prefix.len(), self.candidates(&words, prefix)))
        } else if parts[0] == "help" && (parts.len() == 1 || (parts.len() == 2 && !trailing_space)) {
            let prefix = parts.get(1).copied().unwrap_or("");
            Ok((pos - prefix.len(), self.candidates(&self.operations, prefix)))
        } else {
            Ok((pos, vec![]))
        }
    }
}
