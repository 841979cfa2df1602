//! Records produced by the move search.
//!
//! A [`Candidate`] is one shape placed at one coordinate. A [`GamePath`] is an ordered
//! sequence of candidates describing one way of placing (part of) a batch, together with
//! the statistics the path policy uses to rank it.

use blockfit_engine::{Placement, ShapeId};
use serde::Serialize;

/// Offset mapping the cells gain range `[-43, 27]` onto `[0, 70]`.
const CELLS_GAIN_OFFSET: f32 = 43.0;
const CELLS_GAIN_RANGE: f32 = 70.0;
/// Largest score a single batch can gain.
const MAX_SCORE_GAIN: f32 = 127.0;

/// One placement attempt that succeeded during the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Candidate {
    shape_id: ShapeId,
    placement: Placement,
    cells_gain: i32,
    score_gain: i32,
}

impl Candidate {
    #[must_use]
    pub const fn new(shape_id: ShapeId, placement: Placement) -> Self {
        Self {
            shape_id,
            placement,
            cells_gain: 0,
            score_gain: 0,
        }
    }

    #[must_use]
    pub const fn shape_id(&self) -> ShapeId {
        self.shape_id
    }

    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Occupied cells after the placement minus occupied cells before it.
    ///
    /// Negative when the placement cleared more cells than it filled.
    #[must_use]
    pub const fn cells_gain(&self) -> i32 {
        self.cells_gain
    }

    #[must_use]
    pub const fn score_gain(&self) -> i32 {
        self.score_gain
    }

    pub const fn set_gain(&mut self, cells_gain: i32, score_gain: i32) {
        self.cells_gain = cells_gain;
        self.score_gain = score_gain;
    }
}

/// One complete (or dead-ended) way of placing a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GamePath {
    moves: Vec<Candidate>,
    cells_gain: i32,
    score_gain: i32,
    cell_count: u32,
    placement_score: f32,
    max_area: f32,
    frag_score: f32,
}

impl GamePath {
    /// Creates the empty root path for a board with `cell_count` occupied cells.
    #[must_use]
    pub const fn new(cell_count: u32) -> Self {
        Self {
            moves: Vec::new(),
            cells_gain: 0,
            score_gain: 0,
            cell_count,
            placement_score: 1.0,
            max_area: 0.0,
            frag_score: 0.0,
        }
    }

    /// Appends `candidate` and accumulates its gains.
    pub fn push_move(&mut self, candidate: Candidate) {
        self.moves.push(candidate);
        self.cells_gain += candidate.cells_gain;
        self.score_gain += candidate.score_gain;
    }

    #[must_use]
    pub fn moves(&self) -> &[Candidate] {
        &self.moves
    }

    #[must_use]
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub const fn cells_gain(&self) -> i32 {
        self.cells_gain
    }

    #[must_use]
    pub const fn score_gain(&self) -> i32 {
        self.score_gain
    }

    /// Occupied cells on the board reached by this path.
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.cell_count
    }

    pub const fn set_cell_count(&mut self, cell_count: u32) {
        self.cell_count = cell_count;
    }

    #[must_use]
    pub const fn placement_score(&self) -> f32 {
        self.placement_score
    }

    pub const fn set_placement_score(&mut self, placement_score: f32) {
        self.placement_score = placement_score;
    }

    /// Largest empty rectangle of the reached board as a fraction of the board.
    #[must_use]
    pub const fn max_area(&self) -> f32 {
        self.max_area
    }

    pub const fn set_max_area(&mut self, max_area: f32) {
        self.max_area = max_area;
    }

    #[must_use]
    pub const fn frag_score(&self) -> f32 {
        self.frag_score
    }

    pub const fn set_frag_score(&mut self, frag_score: f32) {
        self.frag_score = frag_score;
    }

    /// Cells gain mapped onto `[0, 1]`, where clearing more scores higher.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn cell_gain_norm(&self) -> f32 {
        1.0 - (self.cells_gain as f32 + CELLS_GAIN_OFFSET) / CELLS_GAIN_RANGE
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn score_gain_norm(&self) -> f32 {
        self.score_gain as f32 / MAX_SCORE_GAIN
    }
}
