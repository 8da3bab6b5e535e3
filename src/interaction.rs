use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::error::PlayError;
use super::scan;

/// Row and column as typed by the player. Not yet checked against the board.
pub type Operands = Result<(i32, i32), PlayError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reveal(Operands),
    Mark(Operands),
    Guess(Operands),
    Help,
    Quit,
    NoFog,
    Unrecognized
}

/// Keyword, then the first two operand tokens. Anything after is ignored.
fn command_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(?P<keyword>\S*)(?:\s+(?P<row>\S+))?(?:\s+(?P<column>\S+))?").unwrap()
    })
}

impl Command {
    pub fn from_line(input: &str) -> Command {
        let cap = match command_pattern().captures(input) {
            Some(cap) => cap,
            None => return Command::Unrecognized
        };
        match &cap["keyword"] {
            "r" | "reveal" => Command::Reveal(operands(&cap)),
            "m" | "mark" => Command::Mark(operands(&cap)),
            "g" | "guess" => Command::Guess(operands(&cap)),
            "h" | "help" => Command::Help,
            "q" | "quit" => Command::Quit,
            "nofog" => Command::NoFog,
            _ => Command::Unrecognized
        }
    }
}

fn operand(cap: &Captures, name: &str) -> Option<i32> {
    cap.name(name).and_then(|token| scan::parse_integer(token.as_str()))
}

fn operands(cap: &Captures) -> Operands {
    let row = operand(cap, "row").ok_or(PlayError::MissingRow)?;
    let column = operand(cap, "column").ok_or(PlayError::MissingColumn)?;
    Ok((row, column))
}

pub const HELP: &str = "\nCommands Available...
 - Reveal: r/reveal row col
 - Mark: m/mark     row col
 - Guess: g/guess   row col
 - Help: h/help
 - Quit: q/quit
";
