use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a seed file could not be turned into a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("seed file missing some information")]
    MissingInformation,
    #[error("mine locations expected but not given")]
    MissingMineLocations,
    #[error("number of columns and/or mines expected but not given")]
    MissingDimensions,
    #[error("number of rows must be greater than 5")]
    TooFewRows,
    #[error("number of rows cannot be greater than 10")]
    TooManyRows,
    #[error("number of columns must be greater than 5")]
    TooFewColumns,
    #[error("number of columns cannot be greater than 10")]
    TooManyColumns,
    #[error("number of mines must be greater than 1")]
    TooFewMines,
    #[error("number of mines cannot be greater than or equal to the number of squares")]
    TooManyMines,
    #[error("Index {index} out of bounds for length {length}")]
    MineOutOfBounds { index: i32, length: usize },
    #[error("not enough mine locations given")]
    NotEnoughMineLocations,
    #[error("too many mine locations given")]
    TooManyMineLocations,
}

/// A bad command. The game reports it and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("command not recognized!")]
    Unrecognized,
    #[error("row and column number expected but not given")]
    MissingRow,
    #[error("column number expected but not given")]
    MissingColumn,
    #[error("Index {index} out of bounds for length {length}")]
    OutOfBounds { index: i32, length: usize },
}

/// Errors that end the program with a non-zero exit code.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("Usage: minesweeper-alpha SEED_FILE_PATH")]
    Usage,
    #[error("Seed File Not Found Error: {} (No such file or directory)", path.display())]
    SeedNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Seed File Malformed Error: {0}")]
    SeedMalformed(#[from] SeedError),
    #[error("{}: file not found", path.display())]
    ResourceMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("console error: {0}")]
    Console(#[from] io::Error),
}

impl FatalError {
    pub fn exit_code(&self) -> i32 {
        match self {
            FatalError::Usage | FatalError::ResourceMissing { .. } | FatalError::Console(_) => 1,
            FatalError::SeedNotFound { .. } => 2,
            FatalError::SeedMalformed(_) => 3,
        }
    }
}
