//! Interactive calculator REPL
//!
//! Each line becomes one `Request` for a `CalculatorSession`; the session
//! keeps the last output and precision between lines.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use tracing::debug;
use voltage_bits::{is_binary_string, CalculatorSession, Precision, Request, Response};

use crate::commands;
use crate::logging;

const COMMANDS: [&str; 10] = [
    "tobin", "todec", "sign", "places", "inspect", "clear", "log", "help", "quit", "exit",
];

/// Parsed REPL line
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Session(Request),
    Inspect(Option<String>),
    ShowPlaces,
    ShowLog,
    SetLog(String),
    Help,
    Quit,
}

/// Parse one input line
///
/// A bare value converts in the direction its shape implies: a 64-digit
/// binary string to decimal, anything else to binary.
pub fn parse_line(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    let command = match cmd.to_lowercase().as_str() {
        "tobin" | "d2b" => ReplCommand::Session(Request::to_binary(require(cmd, rest)?)),
        "todec" | "b2d" => ReplCommand::Session(Request::to_decimal(require(cmd, rest)?)),
        "sign" | "s" => ReplCommand::Session(Request::SignBit),
        "clear" | "c" => ReplCommand::Session(Request::Clear),
        "places" if rest.is_empty() => ReplCommand::ShowPlaces,
        "places" => ReplCommand::Session(Request::SetDecimalPlaces(rest.to_string())),
        "inspect" | "i" => ReplCommand::Inspect((!rest.is_empty()).then(|| rest.to_string())),
        "log" if rest.is_empty() => ReplCommand::ShowLog,
        "log" => ReplCommand::SetLog(rest.to_string()),
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        _ if is_binary_string(line) => ReplCommand::Session(Request::to_decimal(line)),
        _ => ReplCommand::Session(Request::to_binary(line)),
    };
    Ok(command)
}

fn require<'a>(cmd: &str, rest: &'a str) -> Result<&'a str> {
    if rest.is_empty() {
        bail!("Usage: {} <value>", cmd);
    }
    Ok(rest)
}

// ============================================================================
// Tab Completion Helper
// ============================================================================

/// REPL helper providing Tab completion for command names
struct CalcHelper;

impl Helper for CalcHelper {}

impl Hinter for CalcHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for CalcHelper {}

impl Validator for CalcHelper {}

impl Completer for CalcHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(' ') {
            return Ok((pos, vec![]));
        }
        Ok((0, complete_command(line)))
    }
}

fn complete_command(prefix: &str) -> Vec<Pair> {
    let prefix = prefix.to_lowercase();
    COMMANDS
        .iter()
        .filter(|cmd| cmd.starts_with(&prefix))
        .map(|cmd| Pair {
            display: (*cmd).to_string(),
            replacement: (*cmd).to_string(),
        })
        .collect()
}

// ============================================================================
// Loop
// ============================================================================

/// Interactive REPL loop
pub fn run(precision: Precision, history_size: usize) -> Result<()> {
    let config = rustyline::Config::builder()
        .completion_type(rustyline::CompletionType::List)
        .max_history_size(history_size)
        .context("Invalid history size")?
        .build();
    let mut rl: Editor<CalcHelper, DefaultHistory> =
        Editor::with_config(config).context("Failed to initialize readline")?;
    rl.set_helper(Some(CalcHelper));

    let mut session = CalculatorSession::new(precision);

    println!("{}", "IEEE-754 Bit Calculator".bright_cyan().bold());
    println!(
        "Type '{}' for commands, {} for completion\n",
        "help".bright_yellow(),
        "Tab".bright_cyan()
    );

    loop {
        match rl.readline("bitcalc> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match execute(&mut session, line) {
                    Ok(true) => continue,
                    Ok(false) => break,
                    Err(e) => eprintln!("{} {}", "Error:".red(), e),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            },
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{} {}", "Readline error:".red(), e);
                break;
            },
        }
    }

    println!("Bye!");
    Ok(())
}

/// Execute one line; `Ok(false)` quits
fn execute(session: &mut CalculatorSession, line: &str) -> Result<bool> {
    match parse_line(line)? {
        ReplCommand::Session(request) => print_response(&session.handle(request)),
        ReplCommand::Inspect(input) => {
            let input = input.or_else(|| session.output().map(str::to_string));
            match input {
                Some(input) => match commands::inspect(&input) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        debug!("inspect failed: {}", e);
                        println!("{}", voltage_bits::session::ERROR_DISPLAY.red());
                    },
                },
                None => println!("Usage: inspect <value> (or convert something first)"),
            }
        },
        ReplCommand::ShowPlaces => println!("Decimal places: {}", session.precision()),
        ReplCommand::ShowLog => println!("Log level: {}", logging::get_log_level()),
        ReplCommand::SetLog(level) => match logging::set_log_level(&level) {
            Ok(()) => println!("{} Log level → {}", "✓".green(), level.bright_cyan()),
            Err(e) => eprintln!("{} {}", "Error:".red(), e),
        },
        ReplCommand::Help => print_help(),
        ReplCommand::Quit => return Ok(false),
    }
    Ok(true)
}

fn print_response(response: &Response) {
    match response {
        Response::Output(text) => println!("{}", text),
        Response::Failed(e) => {
            debug!("conversion error detail: {}", e);
            println!("{}", response.display_text().red());
        },
        Response::Sign(bit) => println!("{} {}", "sign bit:".bright_cyan(), bit),
        Response::Message(text) => println!("{}", text.yellow()),
        Response::PrecisionSet(_) => println!("{}", response.display_text()),
        Response::Cleared => {},
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_cyan());
    println!("  tobin <decimal>   Decimal to 64-bit binary string (alias d2b)");
    println!("  todec <binary>    64-bit binary string to decimal (alias b2d)");
    println!("  <value>           Convert, direction chosen from the input");
    println!("  sign              Sign bit of the last result (alias s)");
    println!("  places [n]        Show or set decimal places (n or 'shortest')");
    println!("  inspect [value]   Sign/exponent/mantissa breakdown (alias i)");
    println!("  clear             Clear the last result (alias c)");
    println!("  log [filter]      Show or change the log filter");
    println!("  help              Show this help");
    println!("  quit              Exit (alias exit, q)");
}
