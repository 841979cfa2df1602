//! Survivability of a board against plausible future batches.
//!
//! The universe of future batches is built from the shapes that are hardest to fit: every
//! unordered combination of three distinct high-risk shapes. A board's survivability is the
//! weighted fraction of those batches it could still accommodate completely.

use blockfit_engine::{BATCH_SIZE, Board, Orientation, Placement, Shape, ShapeKind};

/// Decimal places survivability is rounded to.
const ROUNDING_SCALE: f32 = 1000.0;

/// One combination of future shapes with its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FutureBatch {
    shapes: [Shape; BATCH_SIZE],
    weight: u32,
}

impl FutureBatch {
    /// Big squares and long bars are the usual game enders, so batches holding them
    /// count more.
    #[must_use]
    pub fn new(shapes: [Shape; BATCH_SIZE]) -> Self {
        let weight = shapes
            .iter()
            .map(|shape| match shape.kind() {
                ShapeKind::LargeSquare => 3,
                ShapeKind::FiveLiner => 2,
                _ => 0,
            })
            .sum::<u32>()
            + 1;
        Self { shapes, weight }
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape; BATCH_SIZE] {
        &self.shapes
    }

    #[must_use]
    pub fn weight(&self) -> u32 {
        self.weight
    }
}

#[derive(Debug, Clone)]
pub struct LookaheadEvaluator {
    batches: Vec<FutureBatch>,
    total_weight: u32,
}

impl Default for LookaheadEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl LookaheadEvaluator {
    #[must_use]
    pub fn new() -> Self {
        let shapes: Vec<Shape> = high_risk_shapes().collect();
        let mut batches = Vec::new();
        for (i, &a) in shapes.iter().enumerate() {
            for (j, &b) in shapes.iter().enumerate().skip(i + 1) {
                for &c in &shapes[j + 1..] {
                    batches.push(FutureBatch::new([a, b, c]));
                }
            }
        }
        let total_weight = batches.iter().map(FutureBatch::weight).sum();
        Self {
            batches,
            total_weight,
        }
    }

    #[must_use]
    pub fn batches(&self) -> &[FutureBatch] {
        &self.batches
    }

    #[must_use]
    pub fn total_weight(&self) -> u32 {
        self.total_weight
    }

    /// Weighted fraction of future batches that fit on `board`, rounded to 3 decimals.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn survivability(&self, board: &Board) -> f32 {
        let survived: u32 = self
            .batches
            .iter()
            .filter(|batch| can_place_all(*board, batch.shapes()))
            .map(FutureBatch::weight)
            .sum();
        let ratio = survived as f32 / self.total_weight as f32;
        (ratio * ROUNDING_SCALE).round() / ROUNDING_SCALE
    }
}

/// Shapes a future batch is drawn from.
///
/// Shapes that fit almost anywhere are left out. Bars and big squares are symmetric, so
/// only one orientation of each distinct footprint is kept.
pub fn high_risk_shapes() -> impl Iterator<Item = Shape> {
    Shape::all().filter(|shape| match shape.kind() {
        ShapeKind::Singler
        | ShapeKind::ThreeLiner
        | ShapeKind::FourLiner
        | ShapeKind::SmallL
        | ShapeKind::SmallSquare
        | ShapeKind::LongTail
        | ShapeKind::LargeL => false,
        ShapeKind::FiveLiner => matches!(shape.orientation(), Orientation::S | Orientation::W),
        ShapeKind::LargeSquare => shape.orientation() == Orientation::E,
        ShapeKind::Tee | ShapeKind::Zed => true,
    })
}

/// Checks whether every shape can be placed, in some order, stopping at the first success.
fn can_place_all(board: Board, shapes: &[Shape]) -> bool {
    if shapes.is_empty() {
        return true;
    }
    (0..shapes.len()).any(|i| {
        let rest: Vec<Shape> = shapes
            .iter()
            .enumerate()
            .filter_map(|(j, shape)| (j != i).then_some(*shape))
            .collect();
        Placement::all().any(|placement| {
            let mut next = board;
            next.try_place(shapes[i], placement) && can_place_all(next, &rest)
        })
    })
}
