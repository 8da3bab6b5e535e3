use std::fmt;
use itertools::{iproduct, Itertools};

use super::error::PlayError;
use super::seed::SeedSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    Mine,
    Empty
}

/// What the player has done to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Hidden,
    Revealed(u8),
    Flagged,
    Guessed
}

impl Marker {
    /// Revealed and flagged cells count as played; a guess does not.
    pub fn already_played(&self) -> bool {
        matches!(self, Marker::Revealed(_) | Marker::Flagged)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Hidden => write!(f, " "),
            Marker::Revealed(count) => write!(f, "{}", count),
            Marker::Flagged => write!(f, "F"),
            Marker::Guessed => write!(f, "?")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Normal,
    NoFog
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub content: Content,
    pub marker: Marker
}

impl Cell {
    fn create_empty() -> Cell {
        Cell{content: Content::Empty, marker: Marker::Hidden}
    }

    pub fn is_mine(&self) -> bool {
        self.content == Content::Mine
    }

    fn is_settled(&self) -> bool {
        match (&self.content, &self.marker) {
            (Content::Mine, Marker::Flagged) => true,
            (Content::Empty, Marker::Revealed(_)) => true,
            _ => false
        }
    }

    fn to_str(&self, mode: RenderMode) -> String {
        match (mode, &self.content) {
            (RenderMode::NoFog, Content::Mine) => format!("<{}>|", self.marker),
            _ => format!(" {} |", self.marker)
        }
    }
}

/// (row, column), zero based.
#[derive(Debug, PartialEq, Eq, Clone, Hash, Copy)]
pub struct Point(pub usize, pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    pub rows: usize,
    pub columns: usize
}

impl BoardSize {
    pub fn area(&self) -> usize {
        self.rows * self.columns
    }

    pub fn points(&self) -> Vec<Point> {
        (0..self.area()).filter_map(|x| self.point_from_integer(x)).collect()
    }

    pub fn point_from_integer(&self, x: usize) -> Option<Point> {
        if x >= self.area() {
            return None
        }
        Some(Point(x / self.columns, x % self.columns))
    }

    /// Checks player supplied coordinates, row first.
    pub fn locate(&self, row: i32, column: i32) -> Result<Point, PlayError> {
        let row = index_within(row, self.rows)?;
        let column = index_within(column, self.columns)?;
        Ok(Point(row, column))
    }
}

fn index_within(index: i32, length: usize) -> Result<usize, PlayError> {
    match usize::try_from(index) {
        Ok(i) if i < length => Ok(i),
        _ => Err(PlayError::OutOfBounds{index, length})
    }
}

/// Result of revealing a cell that was on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    Mine,
    Safe { adjacent: u8, already_played: bool }
}

#[derive(Debug)]
pub struct Board {
    pub size: BoardSize,
    field: Vec<Vec<Cell>>,
    pub mine_count: usize
}

impl Board {
    pub fn from_seed(seed: &SeedSpec) -> Board {
        let size = BoardSize{rows: seed.rows, columns: seed.columns};
        let mut board = Board::new_from_size(size, seed.mine_count);
        for point in &seed.mines {
            board.retrieve_cell_mutable(point).content = Content::Mine;
        }
        board
    }

    pub fn new_from_size(size: BoardSize, mine_count: usize) -> Board {
        let field = (0..size.rows)
            .map(|_| (0..size.columns).map(|_| Cell::create_empty()).collect())
            .collect();
        Board {size, field, mine_count}
    }

    pub fn retrieve_cell(&self, point: &Point) -> &Cell {
        &self.field[point.0][point.1]
    }

    fn retrieve_cell_mutable(&mut self, point: &Point) -> &mut Cell {
        &mut self.field[point.0][point.1]
    }

    fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.field.iter().flatten()
    }

    /// Mines actually placed. Lower than `mine_count` when the seed
    /// repeated a location.
    pub fn placed_mines(&self) -> usize {
        self.cells().filter(|cell| cell.is_mine()).count()
    }

    pub fn neighbor_points(&self, point: &Point) -> Vec<Point> {
        iproduct!(-1i32..=1, -1i32..=1)
            .filter(|&(i, j)| i != 0 || j != 0)
            .map(|(i, j)| (point.0 as i32 + i, point.1 as i32 + j))
            .filter(|&(r, c)| r >= 0 && (r as usize) < self.size.rows && c >= 0 && (c as usize) < self.size.columns)
            .map(|(r, c)| Point(r as usize, c as usize))
            .collect()
    }

    pub fn adjacent_mine_count(&self, point: &Point) -> u8 {
        self.neighbor_points(point).iter()
            .filter(|neighbor| self.retrieve_cell(neighbor).is_mine())
            .count() as u8
    }

    pub fn reveal(&mut self, row: i32, column: i32) -> Result<Reveal, PlayError> {
        let point = self.size.locate(row, column)?;
        if self.retrieve_cell(&point).is_mine() {
            return Ok(Reveal::Mine)
        }
        let adjacent = self.adjacent_mine_count(&point);
        let cell = self.retrieve_cell_mutable(&point);
        let already_played = cell.marker.already_played();
        cell.marker = Marker::Revealed(adjacent);
        Ok(Reveal::Safe{adjacent, already_played})
    }

    /// Flags a cell. Returns whether it had already been played.
    pub fn mark(&mut self, row: i32, column: i32) -> Result<bool, PlayError> {
        let point = self.size.locate(row, column)?;
        let cell = self.retrieve_cell_mutable(&point);
        let already_played = cell.marker.already_played();
        cell.marker = Marker::Flagged;
        Ok(already_played)
    }

    pub fn guess(&mut self, row: i32, column: i32) -> Result<(), PlayError> {
        let point = self.size.locate(row, column)?;
        self.retrieve_cell_mutable(&point).marker = Marker::Guessed;
        Ok(())
    }

    /// Every safe cell revealed and every mine flagged.
    pub fn is_won(&self) -> bool {
        self.cells().all(|cell| cell.is_settled())
    }

    pub fn score(&self, rounds: u32) -> f64 {
        100.0 * self.size.rows as f64 * self.size.columns as f64 / rounds as f64
    }

    pub fn render(&self, mode: RenderMode, rounds: u32) -> String {
        let mut result = format!("\n Rounds Completed: {}\n\n", rounds);
        for (i, row) in self.field.iter().enumerate() {
            result += &format!(" {} |", i);
            for cell in row {
                result += &cell.to_str(mode);
            }
            result += "\n";
        }
        result += "     ";
        result += &(0..self.size.columns).join("   ");
        result += "\n\n";
        result
    }
}

#[cfg(test)]
use proptest::prelude::*;


#[cfg(test)]
mod board_tests {
    use super::*;

    fn board(text: &str) -> Board {
        Board::from_seed(&text.parse().unwrap())
    }

    fn reveal_all_safe(board: &mut Board) {
        for point in board.size.points() {
            if !board.retrieve_cell(&point).is_mine() {
                board.reveal(point.0 as i32, point.1 as i32).unwrap();
            }
        }
    }

    #[test]
    fn mines_come_from_the_seed() {
        let board = board("5 5 2 0 0 4 4");
        assert!(board.retrieve_cell(&Point(0, 0)).is_mine());
        assert!(board.retrieve_cell(&Point(4, 4)).is_mine());
        assert_eq!(board.placed_mines(), 2);
    }

    #[test]
    fn duplicate_mines_collapse() {
        let board = board("5 5 2 3 3 3 3");
        assert_eq!(board.mine_count, 2);
        assert_eq!(board.placed_mines(), 1);
    }

    #[test]
    fn corners_see_three_neighbors() {
        let board = board("5 5 3 0 1 1 0 1 1");
        assert_eq!(board.neighbor_points(&Point(0, 0)).len(), 3);
        assert_eq!(board.adjacent_mine_count(&Point(0, 0)), 3);
        assert_eq!(board.neighbor_points(&Point(4, 4)).len(), 3);
        assert_eq!(board.neighbor_points(&Point(0, 2)).len(), 5);
        assert_eq!(board.neighbor_points(&Point(2, 2)).len(), 8);
    }

    #[test]
    fn neighbors_respect_non_square_boards() {
        let board = board("5 10 1 0 0");
        assert_eq!(board.neighbor_points(&Point(4, 9)).len(), 3);
        assert_eq!(board.neighbor_points(&Point(2, 9)).len(), 5);
    }

    #[test]
    fn reveal_counts_adjacent_mines() {
        let mut board = board("5 5 2 0 0 0 2");
        assert_eq!(board.reveal(0, 1), Ok(Reveal::Safe{adjacent: 2, already_played: false}));
        assert_eq!(board.retrieve_cell(&Point(0, 1)).marker, Marker::Revealed(2));
        assert_eq!(board.reveal(0, 0), Ok(Reveal::Mine));
    }

    #[test]
    fn reveal_twice_warns_and_recomputes() {
        let mut board = board("5 5 1 2 2");
        assert_eq!(board.reveal(1, 1), Ok(Reveal::Safe{adjacent: 1, already_played: false}));
        assert_eq!(board.reveal(1, 1), Ok(Reveal::Safe{adjacent: 1, already_played: true}));
        assert_eq!(board.retrieve_cell(&Point(1, 1)).marker, Marker::Revealed(1));
    }

    #[test]
    fn reveal_overwrites_a_flag() {
        let mut board = board("5 5 1 2 2");
        board.mark(0, 0).unwrap();
        assert_eq!(board.reveal(0, 0), Ok(Reveal::Safe{adjacent: 0, already_played: true}));
        assert_eq!(board.retrieve_cell(&Point(0, 0)).marker, Marker::Revealed(0));
    }

    #[test]
    fn revealing_a_flagged_mine_still_loses() {
        let mut board = board("5 5 1 2 2");
        board.mark(2, 2).unwrap();
        assert_eq!(board.reveal(2, 2), Ok(Reveal::Mine));
    }

    #[test]
    fn out_of_bounds_is_reported_row_first() {
        let mut board = board("5 6 1 0 0");
        assert_eq!(board.reveal(5, 9), Err(PlayError::OutOfBounds{index: 5, length: 5}));
        assert_eq!(board.mark(0, 6), Err(PlayError::OutOfBounds{index: 6, length: 6}));
        assert_eq!(board.guess(-1, 0), Err(PlayError::OutOfBounds{index: -1, length: 5}));
    }

    #[test]
    fn mark_and_guess_overwrite_anything() {
        let mut board = board("5 5 1 2 2");
        board.reveal(0, 0).unwrap();
        assert_eq!(board.mark(0, 0), Ok(true));
        assert_eq!(board.retrieve_cell(&Point(0, 0)).marker, Marker::Flagged);
        assert_eq!(board.mark(0, 0), Ok(true));
        board.guess(0, 0).unwrap();
        assert_eq!(board.retrieve_cell(&Point(0, 0)).marker, Marker::Guessed);
        assert_eq!(board.mark(0, 0), Ok(false));
    }

    #[test]
    fn won_once_safe_cells_revealed_and_mines_flagged() {
        let mut board = board("5 5 1 2 2");
        reveal_all_safe(&mut board);
        assert!(!board.is_won());
        board.guess(2, 2).unwrap();
        assert!(!board.is_won());
        board.mark(2, 2).unwrap();
        assert!(board.is_won());
    }

    #[test]
    fn flagging_a_safe_cell_blocks_the_win() {
        let mut board = board("5 5 1 2 2");
        reveal_all_safe(&mut board);
        board.mark(2, 2).unwrap();
        board.mark(0, 0).unwrap();
        assert!(!board.is_won());
    }

    #[test]
    fn score_uses_board_area_and_rounds() {
        let board = board("5 5 1 2 2");
        assert_eq!(format!("{:.2}", board.score(24)), "104.17");
        assert_eq!(board.score(25), 100.0);
    }

    #[test]
    fn renders_a_fresh_board() {
        let board = board("5 5 1 2 2");
        let expected = concat!(
            "\n Rounds Completed: 1\n\n",
            " 0 |   |   |   |   |   |\n",
            " 1 |   |   |   |   |   |\n",
            " 2 |   |   |   |   |   |\n",
            " 3 |   |   |   |   |   |\n",
            " 4 |   |   |   |   |   |\n",
            "     0   1   2   3   4\n\n",
        );
        assert_eq!(board.render(RenderMode::Normal, 1), expected);
    }

    #[test]
    fn renders_markers_and_nofog() {
        let mut board = board("5 5 1 2 2");
        board.reveal(1, 1).unwrap();
        board.mark(0, 0).unwrap();
        board.guess(0, 1).unwrap();
        let normal = board.render(RenderMode::Normal, 7);
        assert!(normal.contains(" 0 | F | ? |   |   |   |\n"));
        assert!(normal.contains(" 1 |   | 1 |   |   |   |\n"));
        assert!(normal.contains(" 2 |   |   |   |   |   |\n"));
        let nofog = board.render(RenderMode::NoFog, 8);
        assert!(nofog.starts_with("\n Rounds Completed: 8\n\n"));
        assert!(nofog.contains(" 2 |   |   |< >|   |   |\n"));
    }

    fn seeded_board() -> impl Strategy<Value = Board> {
        (5..=10usize, 5..=10usize).prop_flat_map(|(rows, columns)| {
            let area = rows * columns;
            prop::sample::subsequence((0..area).collect::<Vec<usize>>(), 1..area)
                .prop_map(move |indices| {
                    let size = BoardSize{rows, columns};
                    let mines: Vec<Point> = indices.into_iter()
                        .filter_map(|x| size.point_from_integer(x))
                        .collect();
                    Board::from_seed(&SeedSpec{rows, columns, mine_count: mines.len(), mines})
                })
        })
    }

    proptest! {
        #[test]
        fn distinct_mines_are_all_placed(board in seeded_board()) {
            prop_assert_eq!(board.placed_mines(), board.mine_count);
        }

        #[test]
        fn adjacent_counts_never_exceed_neighbors(board in seeded_board()) {
            for point in board.size.points() {
                let count = board.adjacent_mine_count(&point) as usize;
                prop_assert!(count <= board.neighbor_points(&point).len());
                prop_assert!(count <= 8);
            }
        }

        #[test]
        fn a_fresh_board_is_never_won(board in seeded_board()) {
            prop_assert!(!board.is_won());
        }

        #[test]
        fn revealing_every_safe_cell_is_not_enough(mut board in seeded_board()) {
            reveal_all_safe(&mut board);
            prop_assert!(!board.is_won());
            for point in board.size.points() {
                if board.retrieve_cell(&point).is_mine() {
                    board.mark(point.0 as i32, point.1 as i32).unwrap();
                }
            }
            prop_assert!(board.is_won());
        }

        #[test]
        fn point_from_integer_correctness(x in 0..200usize, rows in 1..20usize, columns in 1..20usize) {
            let size = BoardSize{rows, columns};
            match size.point_from_integer(x) {
                None => prop_assert!(x >= rows * columns),
                Some(point) => {
                    prop_assert!(point.0 < rows);
                    prop_assert!(point.1 < columns);
                }
            }
        }
    }
}
