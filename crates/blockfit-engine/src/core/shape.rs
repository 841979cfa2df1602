use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{BOARD_SIZE, Placement};

/// Largest number of cells any shape occupies (the 3×3 square).
pub const MAX_SHAPE_CELLS: usize = 9;

/// A polyomino in a fixed orientation.
///
/// Shapes are plain values; their geometry is looked up from tables computed at
/// compile time. Within a batch a shape is identified by a [`ShapeId`](super::ShapeId).
///
/// # Example
///
/// ```
/// use blockfit_engine::{Orientation, Shape, ShapeKind};
///
/// let line = Shape::new(ShapeKind::FiveLiner, Orientation::N);
/// assert_eq!((line.width(), line.height()), (1, 5));
///
/// let rotated = Shape::new(ShapeKind::FiveLiner, Orientation::E);
/// assert_eq!((rotated.width(), rotated.height()), (5, 1));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display,
)]
#[display("{kind}/{orientation}")]
pub struct Shape {
    kind: ShapeKind,
    orientation: Orientation,
}

impl Shape {
    #[must_use]
    pub const fn new(kind: ShapeKind, orientation: Orientation) -> Self {
        Self { kind, orientation }
    }

    #[must_use]
    pub fn kind(self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn orientation(self) -> Orientation {
        self.orientation
    }

    /// Iterates over every kind in every orientation.
    pub fn all() -> impl Iterator<Item = Self> {
        ShapeKind::ALL.into_iter().flat_map(|kind| {
            Orientation::ALL
                .into_iter()
                .map(move |orientation| Self::new(kind, orientation))
        })
    }

    pub(crate) fn mask(self) -> ShapeMask {
        SHAPE_MASKS[self.kind as usize][self.orientation as usize]
    }

    #[must_use]
    pub fn width(self) -> usize {
        usize::from(self.mask().width)
    }

    #[must_use]
    pub fn height(self) -> usize {
        usize::from(self.mask().height)
    }

    #[must_use]
    pub fn cell_count(self) -> usize {
        self.mask().bits.count_ones() as usize
    }

    /// Returns the occupied cells relative to the top-left of the bounding box.
    #[must_use]
    pub fn occupied_offsets(self) -> ArrayVec<(usize, usize), MAX_SHAPE_CELLS> {
        let bits = self.mask().bits;
        (0..BOARD_SIZE)
            .flat_map(|dy| (0..BOARD_SIZE).map(move |dx| (dx, dy)))
            .filter(|(dx, dy)| bits & (1 << (dy * BOARD_SIZE + dx)) != 0)
            .collect()
    }

    /// Returns the board cells covered when anchored at `placement`.
    ///
    /// `None` if the bounding box would leave the board.
    pub(crate) fn cells_at(self, placement: Placement) -> Option<u64> {
        let mask = self.mask();
        let (x, y) = (placement.x(), placement.y());
        if x + usize::from(mask.width) > BOARD_SIZE || y + usize::from(mask.height) > BOARD_SIZE
        {
            return None;
        }
        Some(mask.bits << (y * BOARD_SIZE + x))
    }
}

impl Distribution<Shape> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Shape {
        let kind = ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)];
        let orientation = Orientation::ALL[rng.random_range(0..Orientation::LEN)];
        Shape::new(kind, orientation)
    }
}

/// Kind of polyomino.
///
/// Drawings below show orientation [`Orientation::N`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum ShapeKind {
    /// Single cell.
    Singler = 0,
    /// Straight line of 3 cells.
    ThreeLiner = 1,
    /// Straight line of 4 cells.
    FourLiner = 2,
    /// Straight line of 5 cells.
    FiveLiner = 3,
    /// 3-cell corner: `#.` / `##`.
    SmallL = 4,
    /// 4-cell L: `#.` / `#.` / `##`.
    LongTail = 5,
    /// 5-cell corner spanning 3×3: `#..` / `#..` / `###`.
    LargeL = 6,
    /// 2×2 square.
    SmallSquare = 7,
    /// 3×3 square.
    LargeSquare = 8,
    /// T tetromino: `###` / `.#.`.
    Tee = 9,
    /// Z tetromino: `##.` / `.##`.
    Zed = 10,
}

impl ShapeKind {
    /// Number of shape kinds.
    pub const LEN: usize = 11;

    pub const ALL: [Self; Self::LEN] = [
        Self::Singler,
        Self::ThreeLiner,
        Self::FourLiner,
        Self::FiveLiner,
        Self::SmallL,
        Self::LongTail,
        Self::LargeL,
        Self::SmallSquare,
        Self::LargeSquare,
        Self::Tee,
        Self::Zed,
    ];
}

/// Rotation of a shape.
///
/// Each variant is the previous one turned 90° clockwise; `N` is the base drawing.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    derive_more::Display,
)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    N = 0,
    E = 1,
    S = 2,
    W = 3,
}

impl Orientation {
    pub const LEN: usize = 4;

    pub const ALL: [Self; Self::LEN] = [Self::N, Self::E, Self::S, Self::W];
}

/// Cells of a shape anchored at the board origin, using the board bit layout
/// (bit `y * 8 + x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ShapeMask {
    bits: u64,
    width: u8,
    height: u8,
}

impl ShapeMask {
    /// Builds a mask from row bitmasks (bit `x` of `rows[y]`), top row first.
    #[expect(clippy::cast_possible_truncation)]
    const fn from_rows(rows: &[u8]) -> Self {
        let mut bits = 0;
        let mut width = 0;
        let mut y = 0;
        while y < rows.len() {
            let row_width = 8 - rows[y].leading_zeros();
            if row_width > width {
                width = row_width;
            }
            bits |= (rows[y] as u64) << (y * BOARD_SIZE);
            y += 1;
        }
        Self {
            bits,
            width: width as u8,
            height: rows.len() as u8,
        }
    }

    const fn is_set(self, x: usize, y: usize) -> bool {
        self.bits & (1 << (y * BOARD_SIZE + x)) != 0
    }

    /// Rotates 90° clockwise: cell `(x, y)` moves to `(height - 1 - y, x)`.
    const fn rotated_right(self) -> Self {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut bits = 0;
        let mut y = 0;
        while y < height {
            let mut x = 0;
            while x < width {
                if self.is_set(x, y) {
                    let nx = height - 1 - y;
                    let ny = x;
                    bits |= 1 << (ny * BOARD_SIZE + nx);
                }
                x += 1;
            }
            y += 1;
        }
        Self {
            bits,
            width: self.height,
            height: self.width,
        }
    }

    const fn orientations(rows: &[u8]) -> [Self; Orientation::LEN] {
        let n = Self::from_rows(rows);
        let e = n.rotated_right();
        let s = e.rotated_right();
        let w = s.rotated_right();
        [n, e, s, w]
    }
}

const SHAPE_MASKS: [[ShapeMask; Orientation::LEN]; ShapeKind::LEN] = [
    // Singler
    ShapeMask::orientations(&[0b1]),
    // ThreeLiner
    ShapeMask::orientations(&[0b1, 0b1, 0b1]),
    // FourLiner
    ShapeMask::orientations(&[0b1, 0b1, 0b1, 0b1]),
    // FiveLiner
    ShapeMask::orientations(&[0b1, 0b1, 0b1, 0b1, 0b1]),
    // SmallL
    ShapeMask::orientations(&[0b01, 0b11]),
    // LongTail
    ShapeMask::orientations(&[0b01, 0b01, 0b11]),
    // LargeL
    ShapeMask::orientations(&[0b001, 0b001, 0b111]),
    // SmallSquare
    ShapeMask::orientations(&[0b11, 0b11]),
    // LargeSquare
    ShapeMask::orientations(&[0b111, 0b111, 0b111]),
    // Tee
    ShapeMask::orientations(&[0b111, 0b010]),
    // Zed
    ShapeMask::orientations(&[0b011, 0b110]),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(kind: ShapeKind, orientation: Orientation) -> Vec<(usize, usize)> {
        Shape::new(kind, orientation)
            .occupied_offsets()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_cell_counts() {
        let expected = [
            (ShapeKind::Singler, 1),
            (ShapeKind::ThreeLiner, 3),
            (ShapeKind::FourLiner, 4),
            (ShapeKind::FiveLiner, 5),
            (ShapeKind::SmallL, 3),
            (ShapeKind::LongTail, 4),
            (ShapeKind::LargeL, 5),
            (ShapeKind::SmallSquare, 4),
            (ShapeKind::LargeSquare, 9),
            (ShapeKind::Tee, 4),
            (ShapeKind::Zed, 4),
        ];
        for (kind, count) in expected {
            for orientation in Orientation::ALL {
                assert_eq!(
                    Shape::new(kind, orientation).cell_count(),
                    count,
                    "{kind}/{orientation}"
                );
            }
        }
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        for shape in Shape::all() {
            let mask = shape.mask();
            let rotated = mask.rotated_right();
            assert_eq!(rotated.width, mask.height, "{shape}");
            assert_eq!(rotated.height, mask.width, "{shape}");
        }
    }

    #[test]
    fn test_four_rotations_return_to_base() {
        for kind in ShapeKind::ALL {
            let w = Shape::new(kind, Orientation::W).mask();
            assert_eq!(w.rotated_right(), Shape::new(kind, Orientation::N).mask());
        }
    }

    #[test]
    fn test_masks_are_normalized() {
        // Every orientation touches both the top row and the left column of its box.
        for shape in Shape::all() {
            let cells = shape.occupied_offsets();
            assert!(cells.iter().any(|(_, y)| *y == 0), "{shape}");
            assert!(cells.iter().any(|(x, _)| *x == 0), "{shape}");
            assert!(cells.iter().all(|(x, y)| *x < shape.width() && *y < shape.height()));
        }
    }

    #[test]
    fn test_small_l_orientations() {
        use Orientation::{E, N, S, W};
        assert_eq!(offsets(ShapeKind::SmallL, N), vec![(0, 0), (0, 1), (1, 1)]);
        assert_eq!(offsets(ShapeKind::SmallL, E), vec![(0, 0), (1, 0), (0, 1)]);
        assert_eq!(offsets(ShapeKind::SmallL, S), vec![(0, 0), (1, 0), (1, 1)]);
        assert_eq!(offsets(ShapeKind::SmallL, W), vec![(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_cells_at_bounds() {
        let square = Shape::new(ShapeKind::LargeSquare, Orientation::N);
        assert!(square.cells_at(Placement::new(5, 5)).is_some());
        assert!(square.cells_at(Placement::new(6, 5)).is_none());
        assert!(square.cells_at(Placement::new(5, 6)).is_none());

        let single = Shape::new(ShapeKind::Singler, Orientation::N);
        assert_eq!(single.cells_at(Placement::new(7, 7)), Some(1 << 63));
    }

    #[test]
    fn test_shape_serialization() {
        let shape = Shape::new(ShapeKind::LargeSquare, Orientation::E);
        let serialized = serde_json::to_string(&shape).unwrap();
        assert_eq!(serialized, r#"{"kind":"large-square","orientation":"E"}"#);
        let deserialized: Shape = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, shape);
    }
}
