pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod interaction;
pub mod resources;
pub mod seed;
mod scan;

use std::io;

use tracing::debug;

use board::Board;
use config::Config;
use error::FatalError;
use game::{Console, Game, Outcome};
use seed::SeedSpec;

/// Loads the seed and plays one game on the terminal.
pub fn run(config: Config) -> Result<Outcome, FatalError> {
    let seed = SeedSpec::from_file(&config.seed_path)?;
    let board = Board::from_seed(&seed);
    if board.placed_mines() != board.mine_count {
        debug!(placed = board.placed_mines(), declared = board.mine_count, "seed repeats mine locations");
    }
    let mut game = Game::new(board, config.resources);
    let stdin = io::stdin();
    let mut console = Console{
        input: stdin.lock(),
        output: io::stdout(),
        diagnostics: io::stderr()
    };
    game.play(&mut console)
}
