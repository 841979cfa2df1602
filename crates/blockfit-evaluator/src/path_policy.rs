//! Strategies that score and rank the paths found by the move search.
//!
//! The search calls [`PathPolicy::gather_step_stats`] after each successful placement and
//! [`PathPolicy::gather_path_stats`] on every leaf, then asks
//! [`PathPolicy::select_best_path`] for the winner.
//!
//! Two strategies are provided:
//!
//! - [`FullEvalPolicy`] scores open boards by where their cells sit and crowded boards by
//!   how many future batches they can still take.
//! - [`PositionalPolicy`] always uses the positional score.

use std::{cell::OnceCell, cmp::Ordering, fmt};

use blockfit_engine::Board;

use crate::{
    board_analysis::BoardAnalysis,
    game_path::{Candidate, GamePath},
    lookahead::LookaheadEvaluator,
};

/// Below this many occupied cells the board is considered open.
const CROWDED_CELL_COUNT: u32 = 30;
/// A largest empty rectangle covering at least this share of the board keeps it open.
const OPEN_AREA_RATIO: f32 = 0.35;

pub trait PathPolicy: fmt::Debug {
    /// Records the effect of `candidate` on `path`, given the boards around the placement.
    fn gather_step_stats(
        &self,
        path: &mut GamePath,
        candidate: Candidate,
        before: &Board,
        after: &Board,
    ) {
        record_step(path, candidate, before, after);
    }

    /// Scores a leaf path from the board it reaches.
    fn gather_path_stats(&self, path: &mut GamePath, analysis: &BoardAnalysis);

    /// Picks the path to play; `None` only when `paths` is empty.
    fn select_best_path<'p>(&self, paths: &'p [GamePath]) -> Option<&'p GamePath>;
}

impl<P> PathPolicy for Box<P>
where
    P: PathPolicy + ?Sized,
{
    fn gather_step_stats(
        &self,
        path: &mut GamePath,
        candidate: Candidate,
        before: &Board,
        after: &Board,
    ) {
        (**self).gather_step_stats(path, candidate, before, after);
    }

    fn gather_path_stats(&self, path: &mut GamePath, analysis: &BoardAnalysis) {
        (**self).gather_path_stats(path, analysis);
    }

    fn select_best_path<'p>(&self, paths: &'p [GamePath]) -> Option<&'p GamePath> {
        (**self).select_best_path(paths)
    }
}

/// Stores the cell and score deltas on the candidate and appends it to `path`.
pub fn record_step(path: &mut GamePath, mut candidate: Candidate, before: &Board, after: &Board) {
    candidate.set_gain(
        delta(after.occupied_cell_count(), before.occupied_cell_count()),
        delta(after.score(), before.score()),
    );
    path.push_move(candidate);
    path.set_cell_count(after.occupied_cell_count());
}

/// Stores the shape of the empty space reached by `path`.
pub fn record_leaf_shape(path: &mut GamePath, analysis: &BoardAnalysis) {
    path.set_max_area(analysis.max_area_ratio());
    path.set_frag_score(analysis.fragmentation());
}

fn delta(after: u32, before: u32) -> i32 {
    let delta = i64::from(after) - i64::from(before);
    i32::try_from(delta).unwrap_or(if delta < 0 { i32::MIN } else { i32::MAX })
}

/// Whether the cheap positional score is good enough for the board a path reaches.
fn is_open(path: &GamePath) -> bool {
    path.cell_count() < CROWDED_CELL_COUNT || path.max_area() >= OPEN_AREA_RATIO
}

/// Orders paths by descending moves, then descending score gain, then descending
/// placement score.
fn by_score_gain(a: &GamePath, b: &GamePath) -> Ordering {
    b.move_count()
        .cmp(&a.move_count())
        .then_with(|| b.score_gain().cmp(&a.score_gain()))
        .then_with(|| b.placement_score().total_cmp(&a.placement_score()))
}

/// Orders paths by descending moves, then descending placement score, then descending
/// score gain.
fn by_placement_score(a: &GamePath, b: &GamePath) -> Ordering {
    b.move_count()
        .cmp(&a.move_count())
        .then_with(|| b.placement_score().total_cmp(&a.placement_score()))
        .then_with(|| b.score_gain().cmp(&a.score_gain()))
}

/// Positional score while the board is open, lookahead survivability once it is crowded.
///
/// The path gaining the most score wins unless the board it leaves is crowded, in which
/// case the path with the best placement score wins instead (when that score is not
/// zero).
#[derive(Debug, Default)]
pub struct FullEvalPolicy {
    lookahead: OnceCell<LookaheadEvaluator>,
}

impl FullEvalPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lookahead(&self) -> &LookaheadEvaluator {
        self.lookahead.get_or_init(LookaheadEvaluator::new)
    }
}

impl PathPolicy for FullEvalPolicy {
    fn gather_path_stats(&self, path: &mut GamePath, analysis: &BoardAnalysis) {
        record_leaf_shape(path, analysis);
        let score = if is_open(path) {
            analysis.positional_score()
        } else {
            self.lookahead().survivability(analysis.board())
        };
        path.set_placement_score(score);
    }

    fn select_best_path<'p>(&self, paths: &'p [GamePath]) -> Option<&'p GamePath> {
        // `min_by` keeps the first of equal paths, i.e. enumeration order.
        let by_gain = paths.iter().min_by(|a, b| by_score_gain(a, b))?;
        if is_open(by_gain) {
            return Some(by_gain);
        }
        let by_placement = paths.iter().min_by(|a, b| by_placement_score(a, b))?;
        if by_placement.placement_score() > 0.0 {
            Some(by_placement)
        } else {
            Some(by_gain)
        }
    }
}

/// Always scores leaves by where their cells sit and prefers the best-placed path.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalPolicy;

impl PathPolicy for PositionalPolicy {
    fn gather_path_stats(&self, path: &mut GamePath, analysis: &BoardAnalysis) {
        record_leaf_shape(path, analysis);
        path.set_placement_score(analysis.positional_score());
    }

    fn select_best_path<'p>(&self, paths: &'p [GamePath]) -> Option<&'p GamePath> {
        paths.iter().min_by(|a, b| by_placement_score(a, b))
    }
}
