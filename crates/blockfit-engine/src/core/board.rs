use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{BOARD_SIZE, Placement, Shape, TOTAL_CELLS};

/// Cells of the top row.
const ROW_MASK: u64 = 0xff;
/// Cells of the left column.
const COLUMN_MASK: u64 = 0x0101_0101_0101_0101;
/// Points awarded per cleared line; `n` simultaneous lines earn `LINE_SCORE * n(n+1)/2`.
const LINE_SCORE: u32 = 10;

/// 8×8 occupancy grid with a running score.
///
/// Cell `(x, y)` is bit `y * 8 + x` of a `u64`, so boards are `Copy` and every search
/// branch can work on its own copy.
///
/// Placing a shape occupies its cells, then clears every completely filled row and
/// column at once. The score grows by the number of cells placed plus a bonus for the
/// cleared lines.
///
/// # Example
///
/// ```
/// use blockfit_engine::{Board, Orientation, Shape, ShapeKind};
///
/// let mut board = Board::EMPTY;
/// let square = Shape::new(ShapeKind::SmallSquare, Orientation::N);
/// assert!(board.try_place(square, "a1".parse().unwrap()));
/// assert_eq!(board.occupied_cell_count(), 4);
/// assert_eq!(board.score(), 4);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Board {
    #[serde(with = "cells_hex")]
    cells: u64,
    score: u32,
}

/// Result of a successful placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceOutcome {
    pub placed_cells: usize,
    pub cleared_lines: usize,
    pub score_gain: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlaceError {
    #[display("shape {shape} does not fit inside the board at {placement}")]
    OutOfBounds { shape: Shape, placement: Placement },
    #[display("shape {shape} overlaps occupied cells at {placement}")]
    Collision { shape: Shape, placement: Placement },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("expected {BOARD_SIZE} rows, got {count}")]
    RowCount { count: usize },
    #[display("row {row} must have {BOARD_SIZE} cells, got {width}")]
    RowWidth { row: usize, width: usize },
    #[display("invalid cell {cell:?} at row {row}, expected '#' or '.'")]
    InvalidCell { row: usize, cell: char },
}

impl Board {
    pub const EMPTY: Self = Self { cells: 0, score: 0 };
    pub const FULL: Self = Self {
        cells: u64::MAX,
        score: 0,
    };

    #[must_use]
    pub const fn from_bits(cells: u64, score: u32) -> Self {
        Self { cells, score }
    }

    /// Returns the occupancy bitmask (bit `y * 8 + x`).
    #[must_use]
    pub const fn bits(&self) -> u64 {
        self.cells
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub const fn with_score(self, score: u32) -> Self {
        Self {
            cells: self.cells,
            score,
        }
    }

    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        assert!(x < BOARD_SIZE && y < BOARD_SIZE);
        self.cells & cell_bit(x, y) != 0
    }

    /// Returns the grid indexed as `cells[x][y]`.
    #[must_use]
    pub fn cells(&self) -> [[bool; BOARD_SIZE]; BOARD_SIZE] {
        let mut cells = [[false; BOARD_SIZE]; BOARD_SIZE];
        for (x, column) in cells.iter_mut().enumerate() {
            for (y, cell) in column.iter_mut().enumerate() {
                *cell = self.is_occupied(x, y);
            }
        }
        cells
    }

    #[must_use]
    pub const fn occupied_cell_count(&self) -> u32 {
        self.cells.count_ones()
    }

    #[must_use]
    pub const fn empty_cell_count(&self) -> u32 {
        self.cells.count_zeros()
    }

    #[must_use]
    pub fn can_place(&self, shape: Shape, placement: Placement) -> bool {
        shape
            .cells_at(placement)
            .is_some_and(|cells| self.cells & cells == 0)
    }

    /// Checks whether `shape` fits at any coordinate.
    #[must_use]
    pub fn can_fit_anywhere(&self, shape: Shape) -> bool {
        Placement::all().any(|placement| self.can_place(shape, placement))
    }

    /// Places `shape` at `placement`, clears completed lines and updates the score.
    ///
    /// The board is left untouched on error.
    pub fn place(&mut self, shape: Shape, placement: Placement) -> Result<PlaceOutcome, PlaceError> {
        let cells = shape
            .cells_at(placement)
            .ok_or(PlaceError::OutOfBounds { shape, placement })?;
        if self.cells & cells != 0 {
            return Err(PlaceError::Collision { shape, placement });
        }
        self.cells |= cells;
        let cleared_lines = self.clear_lines();

        let placed_cells = cells.count_ones();
        let score_gain = placed_cells + line_clear_score(cleared_lines);
        self.score += score_gain;
        Ok(PlaceOutcome {
            placed_cells: placed_cells as usize,
            cleared_lines: cleared_lines as usize,
            score_gain,
        })
    }

    /// Attempts a placement, mutating the board only on success.
    pub fn try_place(&mut self, shape: Shape, placement: Placement) -> bool {
        self.place(shape, placement).is_ok()
    }

    /// Clears every full row and column simultaneously and returns how many lines went.
    fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut count = 0;
        for i in 0..BOARD_SIZE {
            let row = ROW_MASK << (i * BOARD_SIZE);
            if self.cells & row == row {
                cleared |= row;
                count += 1;
            }
            let column = COLUMN_MASK << i;
            if self.cells & column == column {
                cleared |= column;
                count += 1;
            }
        }
        self.cells &= !cleared;
        count
    }

    /// Returns the board turned 90° clockwise; the score is kept.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        let mut cells = 0;
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                if self.is_occupied(x, y) {
                    cells |= cell_bit(BOARD_SIZE - 1 - y, x);
                }
            }
        }
        Self {
            cells,
            score: self.score,
        }
    }

    /// Creates a board from ASCII art for tests and fixtures.
    ///
    /// `#` is an occupied cell, `.` an empty one; blank lines and surrounding
    /// whitespace are ignored. Rows are listed top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if the art is not a valid 8×8 board.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        match art.parse() {
            Ok(board) => board,
            Err(e) => panic!("invalid board art: {e}"),
        }
    }
}

fn cell_bit(x: usize, y: usize) -> u64 {
    1 << (y * BOARD_SIZE + x)
}

fn line_clear_score(lines: u32) -> u32 {
    LINE_SCORE * lines * (lines + 1) / 2
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(ParseBoardError::RowCount { count: rows.len() });
        }

        let mut cells = 0;
        for (y, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            if width != BOARD_SIZE {
                return Err(ParseBoardError::RowWidth { row: y, width });
            }
            for (x, cell) in row.chars().enumerate() {
                match cell {
                    '#' => cells |= cell_bit(x, y),
                    '.' => {}
                    _ => return Err(ParseBoardError::InvalidCell { row: y, cell }),
                }
            }
        }
        Ok(Self { cells, score: 0 })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_SIZE {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..BOARD_SIZE {
                let c = if self.is_occupied(x, y) { '#' } else { '.' };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

mod cells_hex {
    use std::fmt::Write as _;

    use serde::{Deserialize as _, Deserializer, Serializer};

    use super::TOTAL_CELLS;

    const HEX_DIGITS: usize = TOTAL_CELLS / 4;

    // Format: "000000000000ff01" (16 hex digits, bit 0 is cell a1)
    pub(super) fn serialize<S>(cells: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut hex = String::with_capacity(HEX_DIGITS);
        write!(&mut hex, "{cells:016x}").map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        if hex.len() != HEX_DIGITS {
            return Err(serde::de::Error::custom(format!(
                "expected {HEX_DIGITS} hex digits, got {}",
                hex.len()
            )));
        }
        u64::from_str_radix(&hex, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex cells: {hex} ({e})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Orientation, ShapeKind};

    fn shape(kind: ShapeKind, orientation: Orientation) -> Shape {
        Shape::new(kind, orientation)
    }

    fn at(code: &str) -> Placement {
        code.parse().unwrap()
    }

    #[test]
    fn test_empty_and_full() {
        assert_eq!(Board::EMPTY.occupied_cell_count(), 0);
        assert_eq!(Board::EMPTY.empty_cell_count(), 64);
        assert_eq!(Board::FULL.occupied_cell_count(), 64);
        for shape in Shape::all() {
            assert!(!Board::FULL.can_fit_anywhere(shape), "{shape}");
            assert!(Board::EMPTY.can_fit_anywhere(shape), "{shape}");
        }
    }

    #[test]
    fn test_place_sets_cells_and_score() {
        let mut board = Board::EMPTY;
        let outcome = board
            .place(shape(ShapeKind::SmallL, Orientation::N), at("c4"))
            .unwrap();
        assert_eq!(
            outcome,
            PlaceOutcome {
                placed_cells: 3,
                cleared_lines: 0,
                score_gain: 3,
            }
        );
        assert!(board.is_occupied(2, 3));
        assert!(board.is_occupied(2, 4));
        assert!(board.is_occupied(3, 4));
        assert!(!board.is_occupied(3, 3));
        assert_eq!(board.occupied_cell_count(), 3);
        assert_eq!(board.score(), 3);
    }

    #[test]
    fn test_place_errors_leave_board_untouched() {
        let mut board = Board::from_ascii(
            "
            #.......
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            ",
        );
        let before = board;

        let square = shape(ShapeKind::LargeSquare, Orientation::N);
        assert_eq!(
            board.place(square, at("a1")),
            Err(PlaceError::Collision {
                shape: square,
                placement: at("a1"),
            })
        );
        assert_eq!(
            board.place(square, at("g1")),
            Err(PlaceError::OutOfBounds {
                shape: square,
                placement: at("g1"),
            })
        );
        assert!(!board.try_place(square, at("a7")));
        assert_eq!(board, before);
    }

    #[test]
    fn test_row_and_column_clear_together() {
        let mut board = Board::from_ascii(
            "
            ###.####
            ...#....
            ...#....
            ...#....
            ...#....
            ...#....
            ...#....
            ........
            ",
        );
        let outcome = board
            .place(shape(ShapeKind::Singler, Orientation::N), at("d1"))
            .unwrap();
        // Not yet a full column: d8 is still empty.
        assert_eq!(outcome.cleared_lines, 1);
        assert_eq!(outcome.score_gain, 1 + 10);
        assert_eq!(board.occupied_cell_count(), 6);

        let mut board = Board::from_ascii(
            "
            ###.####
            ...#....
            ...#....
            ...#....
            ...#....
            ...#....
            ...#....
            ...#....
            ",
        );
        let outcome = board
            .place(shape(ShapeKind::Singler, Orientation::N), at("d1"))
            .unwrap();
        assert_eq!(outcome.cleared_lines, 2);
        assert_eq!(outcome.score_gain, 1 + 30);
        assert_eq!(board, Board::EMPTY.with_score(31));
    }

    #[test]
    fn test_cells_indexed_by_column_then_row() {
        let board = Board::from_ascii(
            "
            ........
            ........
            .......#
            ........
            ........
            ........
            ........
            ........
            ",
        );
        let cells = board.cells();
        assert!(cells[7][2]);
        assert_eq!(cells.iter().flatten().filter(|c| **c).count(), 1);
    }

    #[test]
    fn test_rotated_right() {
        let board = Board::from_ascii(
            "
            ##......
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            ",
        );
        let rotated = board.rotated_right();
        assert!(rotated.is_occupied(7, 0));
        assert!(rotated.is_occupied(7, 1));
        assert_eq!(rotated.occupied_cell_count(), 2);
        assert_eq!(
            rotated.rotated_right().rotated_right().rotated_right(),
            board
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "........".parse::<Board>(),
            Err(ParseBoardError::RowCount { count: 1 })
        );
        let short = "........\n".repeat(7) + ".......";
        assert_eq!(
            short.parse::<Board>(),
            Err(ParseBoardError::RowWidth { row: 7, width: 7 })
        );
        let invalid = "........\n".repeat(7) + "...x....";
        assert_eq!(
            invalid.parse::<Board>(),
            Err(ParseBoardError::InvalidCell { row: 7, cell: 'x' })
        );
    }

    #[test]
    fn test_display_round_trip() {
        let board = Board::from_ascii(
            "
            #......#
            .#......
            ..#.....
            ...#....
            ....#...
            .....#..
            ......#.
            #......#
            ",
        );
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_board_serialization() {
        let board = Board::from_ascii(
            "
            ##......
            ........
            ........
            ........
            ........
            ........
            ........
            .......#
            ",
        )
        .with_score(42);
        let serialized = serde_json::to_string(&board).unwrap();
        assert_eq!(serialized, r#"{"cells":"8000000000000003","score":42}"#);
        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);

        assert!(serde_json::from_str::<Board>(r#"{"cells":"ff","score":0}"#).is_err());
    }
}
