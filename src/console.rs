//! Text console front end.
//!
//! Reads one command per line from stdin and writes responses to stdout.
//! Moves are written as dot-separated `col.row` pairs joined by dashes:
//! `3.5-2.4` is a step, `2.2-4.4-6.6` a double jump.
//!
//! ## Supported Commands
//!
//! - `<move>` - Submit a move for the player whose turn it is
//! - `board` - Print the board
//! - `help` - List commands
//! - `quit` - Exit
//!
//! Text that does not parse is rejected here and never reaches the engine.
//!
//! ## Example
//!
//! ```ignore
//! use checkers_rust::console::Console;
//! use checkers_rust::game::Game;
//! let mut console = Console::new(Game::new());
//! console.run()?;
//! ```

use std::fmt;
use std::io::{self, BufRead, Write};

use log::warn;

use crate::board::Coord;
use crate::game::Game;

/// Commands recognised besides moves.
const KNOWN_COMMANDS: &[&str] = &["board", "help", "quit"];

/// A line that could not be turned into a coordinate sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    /// A `col.row` pair without exactly one dot.
    BadPair(String),
    /// A component that is not an integer.
    BadNumber(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty move"),
            ParseError::BadPair(s) => write!(f, "'{s}' is not a col.row pair"),
            ParseError::BadNumber(s) => write!(f, "'{s}' is not a number"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse `c.r-c.r[-c.r...]` into coordinates.
///
/// Only the syntax is checked; a single pair or off-board numbers are
/// passed through for the engine to reject.
pub fn parse_move(s: &str) -> Result<Vec<Coord>, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }
    s.split('-').map(parse_pair).collect()
}

fn parse_pair(s: &str) -> Result<Coord, ParseError> {
    let s = s.trim();
    let (col, row) = s
        .split_once('.')
        .ok_or_else(|| ParseError::BadPair(s.to_string()))?;
    if row.contains('.') {
        return Err(ParseError::BadPair(s.to_string()));
    }
    let parse = |v: &str| {
        v.trim()
            .parse::<i32>()
            .map_err(|_| ParseError::BadNumber(v.to_string()))
    };
    Ok(Coord::new(parse(col)?, parse(row)?))
}

/// Console session state.
pub struct Console {
    game: Game,
}

impl Console {
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Prompt line shown before each command.
    fn prompt(&self) -> String {
        format!("What is your move Player {}? ", self.game.current_player())
    }

    fn render(&self) -> String {
        format!(
            "Awaiting Player : {}\n{}",
            self.game.current_player(),
            self.game.board()
        )
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        write!(stdout, "{}{}", self.render(), self.prompt())?;
        stdout.flush()?;

        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                write!(stdout, "{}", self.prompt())?;
                stdout.flush()?;
                continue;
            }

            let (done, message) = self.execute(line);
            writeln!(stdout, "{message}")?;
            if done {
                break;
            }
            write!(stdout, "{}", self.prompt())?;
            stdout.flush()?;
        }
        Ok(())
    }

    /// Execute one line. Returns `(quit, response)`.
    pub fn execute(&mut self, line: &str) -> (bool, String) {
        match line.to_lowercase().as_str() {
            "quit" => return (true, "Goodbye.".to_string()),
            "board" => return (false, self.render()),
            "help" => {
                return (
                    false,
                    format!(
                        "Enter a move as col.row-col.row (e.g. 3.5-2.4), or one of: {}",
                        KNOWN_COMMANDS.join(", ")
                    ),
                );
            }
            _ => {}
        }

        let sequence = match parse_move(line) {
            Ok(seq) => seq,
            Err(e) => return (false, format!("Cannot read move: {e}")),
        };

        let report = match self.game.submit_move(&sequence) {
            Ok(r) => r,
            Err(e) => {
                warn!("rejected '{line}': {e}");
                return (false, e.to_string());
            }
        };

        let mut out = String::new();
        if report.promoted {
            out.push_str(&format!("Player {} has been KINGED!\n", report.player));
        }
        if let Some(w) = self.game.winner() {
            out.push_str(&format!("{}Player {w} wins!", self.game.board()));
            return (true, out);
        }
        out.push_str(&self.render());
        (false, out)
    }
}
