use std::io::{BufRead, Write};

use tracing::{debug, info};

use super::board::{Board, RenderMode, Reveal};
use super::error::{FatalError, PlayError};
use super::interaction::{self, Command, Operands};
use super::resources::Resources;

pub const PROMPT: &str = "minesweeper-alpha: ";

/// Where the game reads commands and writes its screens and complaints.
pub struct Console<R, O, E> {
    pub input: R,
    pub output: O,
    pub diagnostics: E
}

/// How a game ended. Every outcome is a normal exit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Won { score: f64 },
    Lost,
    Quit
}

pub struct Game {
    board: Board,
    rounds: u32,
    resources: Resources
}

impl Game {
    pub fn new(board: Board, resources: Resources) -> Game {
        Game{board, rounds: 0, resources}
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Runs until the game is won, lost or quit. End of input counts as quit.
    pub fn play<R: BufRead, O: Write, E: Write>(&mut self, console: &mut Console<R, O, E>) -> Result<Outcome, FatalError> {
        for line in self.resources.welcome()? {
            writeln!(console.output, "{}", line)?;
        }
        self.render(RenderMode::Normal, console)?;

        loop {
            write!(console.output, "{}", PROMPT)?;
            console.output.flush()?;
            let mut line = String::new();
            if console.input.read_line(&mut line)? == 0 {
                debug!("input closed");
                return self.quit(console);
            }
            if let Some(outcome) = self.turn(&line, console)? {
                info!(?outcome, rounds = self.rounds, "game over");
                return Ok(outcome);
            }
        }
    }

    /// Handles one line of input. `None` means the game goes on.
    pub fn turn<R, O: Write, E: Write>(&mut self, line: &str, console: &mut Console<R, O, E>) -> Result<Option<Outcome>, FatalError> {
        let command = Command::from_line(line);
        debug!(?command, rounds = self.rounds, "dispatching");
        match command {
            Command::Reveal(operands) => self.reveal(operands, console),
            Command::Mark(operands) => self.mark(operands, console),
            Command::Guess(operands) => {
                self.guess(operands, console)?;
                Ok(None)
            }
            Command::Help => {
                write!(console.output, "{}", interaction::HELP)?;
                self.rounds += 1;
                self.render(RenderMode::Normal, console)?;
                Ok(None)
            }
            Command::Quit => self.quit(console).map(Some),
            Command::NoFog => {
                self.render(RenderMode::NoFog, console)?;
                Ok(None)
            }
            Command::Unrecognized => {
                self.invalid(&PlayError::Unrecognized, console)?;
                self.render(RenderMode::Normal, console)?;
                Ok(None)
            }
        }
    }

    fn reveal<R, O: Write, E: Write>(&mut self, operands: Operands, console: &mut Console<R, O, E>) -> Result<Option<Outcome>, FatalError> {
        let board = &mut self.board;
        match operands.and_then(|(row, column)| board.reveal(row, column)) {
            Ok(Reveal::Mine) => return self.lose(console).map(Some),
            Ok(Reveal::Safe{already_played, ..}) => {
                if already_played {
                    already_played_notice(console)?;
                }
                self.rounds += 1;
            }
            Err(err) => self.invalid(&err, console)?
        }
        self.check_win(console)
    }

    fn mark<R, O: Write, E: Write>(&mut self, operands: Operands, console: &mut Console<R, O, E>) -> Result<Option<Outcome>, FatalError> {
        let board = &mut self.board;
        match operands.and_then(|(row, column)| board.mark(row, column)) {
            Ok(already_played) => {
                if already_played {
                    already_played_notice(console)?;
                }
                self.rounds += 1;
            }
            Err(err) => self.invalid(&err, console)?
        }
        self.check_win(console)
    }

    // no win check after a guess
    fn guess<R, O: Write, E: Write>(&mut self, operands: Operands, console: &mut Console<R, O, E>) -> Result<(), FatalError> {
        let board = &mut self.board;
        match operands.and_then(|(row, column)| board.guess(row, column)) {
            Ok(()) => self.rounds += 1,
            Err(err) => self.invalid(&err, console)?
        }
        self.render(RenderMode::Normal, console)
    }

    fn check_win<R, O: Write, E: Write>(&mut self, console: &mut Console<R, O, E>) -> Result<Option<Outcome>, FatalError> {
        if !self.board.is_won() {
            self.render(RenderMode::Normal, console)?;
            return Ok(None);
        }
        let score = self.board.score(self.rounds);
        let banner = self.resources.game_won(score)?;
        print_banner(&banner, console)?;
        Ok(Some(Outcome::Won{score}))
    }

    fn lose<R, O: Write, E: Write>(&mut self, console: &mut Console<R, O, E>) -> Result<Outcome, FatalError> {
        let banner = self.resources.game_over()?;
        print_banner(&banner, console)?;
        Ok(Outcome::Lost)
    }

    fn quit<R, O: Write, E: Write>(&mut self, console: &mut Console<R, O, E>) -> Result<Outcome, FatalError> {
        writeln!(console.output, "\nQuitting the game...")?;
        writeln!(console.output, "Bye!")?;
        Ok(Outcome::Quit)
    }

    fn invalid<R, O, E: Write>(&self, err: &PlayError, console: &mut Console<R, O, E>) -> Result<(), FatalError> {
        debug!(%err, "rejected command");
        writeln!(console.diagnostics, "\nInvalid Command: {}", err)?;
        Ok(())
    }

    /// Every render is a round, whatever caused it.
    fn render<R, O: Write, E>(&mut self, mode: RenderMode, console: &mut Console<R, O, E>) -> Result<(), FatalError> {
        self.rounds += 1;
        write!(console.output, "{}", self.board.render(mode, self.rounds))?;
        Ok(())
    }
}

fn already_played_notice<R, O: Write, E>(console: &mut Console<R, O, E>) -> Result<(), FatalError> {
    writeln!(console.output, "\nYou have already played this square!")?;
    Ok(())
}

fn print_banner<R, O: Write, E>(lines: &[String], console: &mut Console<R, O, E>) -> Result<(), FatalError> {
    writeln!(console.output)?;
    for line in lines {
        writeln!(console.output, "{}", line)?;
    }
    writeln!(console.output)?;
    Ok(())
}
