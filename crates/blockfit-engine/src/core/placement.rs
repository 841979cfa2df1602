use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::BOARD_SIZE;

/// Coordinate on the board where a shape's bounding box is anchored.
///
/// Written as a two-character code: a column letter `a`–`h` followed by a row
/// digit `1`–`8` (e.g. `"c4"`). Column `a` is the left edge, row `1` is the top.
///
/// # Example
///
/// ```
/// use blockfit_engine::Placement;
///
/// let placement: Placement = "c4".parse().unwrap();
/// assert_eq!((placement.x(), placement.y()), (2, 3));
/// assert_eq!(placement.to_string(), "c4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement {
    x: u8,
    y: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePlacementError {
    #[display("placement code must be two characters, got {code:?}")]
    InvalidLength { code: String },
    #[display("invalid column {column:?}, expected a-h")]
    InvalidColumn { column: char },
    #[display("invalid row {row:?}, expected 1-8")]
    InvalidRow { row: char },
}

impl Placement {
    /// Creates a placement from zero-based column and row indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the board.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        assert!((x as usize) < BOARD_SIZE);
        assert!((y as usize) < BOARD_SIZE);
        Self { x, y }
    }

    #[must_use]
    pub fn x(self) -> usize {
        usize::from(self.x)
    }

    #[must_use]
    pub fn y(self) -> usize {
        usize::from(self.y)
    }

    /// Iterates over every coordinate of the board, column by column.
    ///
    /// The order is `a1, a2, .., a8, b1, .., h8`.
    pub fn all() -> impl Iterator<Item = Self> {
        #[expect(clippy::cast_possible_truncation)]
        const SIZE: u8 = BOARD_SIZE as u8;
        (0..SIZE).flat_map(|x| (0..SIZE).map(move |y| Self::new(x, y)))
    }

    #[must_use]
    pub fn column_char(self) -> char {
        char::from(b'a' + self.x)
    }

    #[must_use]
    pub fn row_char(self) -> char {
        char::from(b'1' + self.y)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_char(), self.row_char())
    }
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(column), Some(row), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParsePlacementError::InvalidLength { code: s.to_owned() });
        };
        let x = board_index(column, b'a')
            .ok_or(ParsePlacementError::InvalidColumn { column })?;
        let y = board_index(row, b'1').ok_or(ParsePlacementError::InvalidRow { row })?;
        Ok(Self::new(x, y))
    }
}

fn board_index(c: char, first: u8) -> Option<u8> {
    u8::try_from(c)
        .ok()
        .and_then(|b| b.checked_sub(first))
        .filter(|index| usize::from(*index) < BOARD_SIZE)
}

impl Serialize for Placement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Placement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid placement {s:?}: {e}")))
    }
}
