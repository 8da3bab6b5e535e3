use std::fs;
use std::path::Path;

use tracing::debug;

use super::board::Point;
use super::error::{FatalError, SeedError};
use super::scan;

pub const MIN_SIDE: i32 = 5;
pub const MAX_SIDE: i32 = 10;

/// A validated seed: board size plus where the mines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSpec {
    pub rows: usize,
    pub columns: usize,
    pub mine_count: usize,
    pub mines: Vec<Point>,
}

impl SeedSpec {
    pub fn from_file(path: &Path) -> Result<SeedSpec, FatalError> {
        let text = fs::read_to_string(path).map_err(|source| FatalError::SeedNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let seed = text.parse::<SeedSpec>()?;
        debug!(
            rows = seed.rows,
            columns = seed.columns,
            mines = seed.mine_count,
            "parsed seed file {}",
            path.display()
        );
        Ok(seed)
    }
}

impl std::str::FromStr for SeedSpec {
    type Err = SeedError;

    fn from_str(text: &str) -> Result<SeedSpec, SeedError> {
        let numbers: Vec<i32> = scan::leading_integers(text).collect();
        parse_numbers(&numbers)
    }
}

fn parse_numbers(numbers: &[i32]) -> Result<SeedSpec, SeedError> {
    if numbers.len() % 2 == 0 {
        return Err(SeedError::MissingInformation);
    }
    if numbers.len() == 3 {
        return Err(SeedError::MissingMineLocations);
    }

    let rows = side(numbers[0], SeedError::TooFewRows, SeedError::TooManyRows)?;
    if numbers.len() == 1 {
        return Err(SeedError::MissingDimensions);
    }
    let columns = side(numbers[1], SeedError::TooFewColumns, SeedError::TooManyColumns)?;

    let mine_count = numbers[2];
    if mine_count < 1 {
        return Err(SeedError::TooFewMines);
    }
    let mine_count = mine_count as usize;
    if mine_count >= rows * columns {
        return Err(SeedError::TooManyMines);
    }

    let mines = numbers[3..]
        .chunks_exact(2)
        .map(|pair| {
            let row = coordinate(pair[0], rows)?;
            let column = coordinate(pair[1], columns)?;
            Ok(Point(row, column))
        })
        .collect::<Result<Vec<Point>, SeedError>>()?;

    if mines.len() < mine_count {
        return Err(SeedError::NotEnoughMineLocations);
    }
    if mines.len() > mine_count {
        return Err(SeedError::TooManyMineLocations);
    }

    Ok(SeedSpec { rows, columns, mine_count, mines })
}

fn side(value: i32, too_few: SeedError, too_many: SeedError) -> Result<usize, SeedError> {
    if value < MIN_SIDE {
        Err(too_few)
    } else if value > MAX_SIDE {
        Err(too_many)
    } else {
        Ok(value as usize)
    }
}

fn coordinate(index: i32, length: usize) -> Result<usize, SeedError> {
    match usize::try_from(index) {
        Ok(i) if i < length => Ok(i),
        _ => Err(SeedError::MineOutOfBounds { index, length }),
    }
}
