//! Per-turn entry point for an automated player.
//!
//! [`SearchPlayer`] searches once per batch, remembers the winning path and hands its
//! placements out one call at a time. A new search only starts once the remembered plan
//! has been drained.
//!
//! # Usage
//!
//! ```rust,no_run
//! use blockfit_engine::GameField;
//! use blockfit_evaluator::{
//!     path_policy::PositionalPolicy, player::SearchPlayer, progress::NoProgress,
//! };
//!
//! let mut field = GameField::new();
//! let mut player = SearchPlayer::new(PositionalPolicy);
//! if let Some(mv) = player.make_move(field.board(), field.batch(), &mut NoProgress) {
//!     field.place(mv.shape_id, mv.placement).unwrap();
//! }
//! ```

use std::{collections::VecDeque, fmt, time::Instant};

use blockfit_engine::{Board, Placement, ShapeBatch, ShapeId};
use serde::Serialize;

use crate::{
    game_path::{Candidate, GamePath},
    move_enumerator::MoveEnumerator,
    path_policy::PathPolicy,
    progress::{SearchProgress, SearchSummary},
};

/// Place shape `shape_id` at `placement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    pub shape_id: ShapeId,
    pub placement: Placement,
}

impl From<Candidate> for Move {
    fn from(candidate: Candidate) -> Self {
        Self {
            shape_id: candidate.shape_id(),
            placement: candidate.placement(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.shape_id, self.placement)
    }
}

#[derive(Debug)]
pub struct SearchPlayer<P> {
    policy: P,
    planned_moves: VecDeque<Candidate>,
}

impl<P> SearchPlayer<P>
where
    P: PathPolicy,
{
    #[must_use]
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            planned_moves: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Placements still remembered from the last search.
    pub fn planned_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.planned_moves.iter().copied().map(Move::from)
    }

    /// Forgets the remembered plan, e.g. when a new game starts.
    pub fn reset(&mut self) {
        self.planned_moves.clear();
    }

    /// Searches every placement of `batch` on `board` and returns the selected path.
    ///
    /// The returned path may be shorter than the batch, or empty, when not every shape
    /// fits. Nothing is remembered.
    pub fn plan(
        &self,
        board: &Board,
        batch: &ShapeBatch,
        progress: &mut dyn SearchProgress,
    ) -> Option<GamePath> {
        progress.start();
        let started = Instant::now();
        let outcome = MoveEnumerator::new(&self.policy, &mut *progress).enumerate(board, batch);
        let best = self.policy.select_best_path(&outcome.paths).cloned();
        progress.finish(&SearchSummary {
            paths: outcome.paths.len(),
            placements_found: outcome.placements_found,
            elapsed: started.elapsed(),
        });
        best
    }

    /// Returns the next placement to make.
    ///
    /// Searches only when no plan is remembered; otherwise the next remembered placement
    /// is returned and `board` and `batch` are not looked at. `None` means no shape of
    /// the batch fits.
    pub fn make_move(
        &mut self,
        board: &Board,
        batch: &ShapeBatch,
        progress: &mut dyn SearchProgress,
    ) -> Option<Move> {
        if self.planned_moves.is_empty() {
            let path = self.plan(board, batch, progress)?;
            self.planned_moves.extend(path.moves().iter().copied());
        }
        self.planned_moves.pop_front().map(Move::from)
    }
}

#[cfg(test)]
mod tests {
    use blockfit_engine::{Orientation, Shape, ShapeKind};

    use super::*;
    use crate::{
        path_policy::{FullEvalPolicy, PositionalPolicy},
        progress::NoProgress,
    };

    #[derive(Debug, Default)]
    struct RecordingProgress {
        started: usize,
        last_update: Option<u64>,
        summary: Option<SearchSummary>,
    }

    impl SearchProgress for RecordingProgress {
        fn start(&mut self) {
            self.started += 1;
        }

        fn update(&mut self, placements_found: u64) {
            self.last_update = Some(placements_found);
        }

        fn finish(&mut self, summary: &SearchSummary) {
            self.summary = Some(*summary);
        }
    }

    fn singler() -> Shape {
        Shape::new(ShapeKind::Singler, Orientation::N)
    }

    #[test]
    fn test_plan_is_drained_before_searching_again() {
        let mut player = SearchPlayer::new(FullEvalPolicy::new());
        let mut progress = RecordingProgress::default();
        let batch = ShapeBatch::from_shapes([singler(), singler()]);

        let first = player.make_move(&Board::EMPTY, &batch, &mut progress).unwrap();
        // Both cells go to corners; the first corner pair found wins.
        assert_eq!(first.to_string(), "1@a1");
        assert_eq!(player.planned_moves().count(), 1);
        assert_eq!(progress.started, 1);

        // The remembered move is returned without looking at the board.
        let second = player.make_move(&Board::FULL, &batch, &mut progress).unwrap();
        assert_eq!(second.to_string(), "2@a8");
        assert_eq!(progress.started, 1);

        // Nothing remembered: search the full board, where nothing fits.
        assert_eq!(player.make_move(&Board::FULL, &batch, &mut progress), None);
        assert_eq!(progress.started, 2);
        assert_eq!(player.planned_moves().count(), 0);
    }

    #[test]
    fn test_progress_summary() {
        let player = SearchPlayer::new(PositionalPolicy);
        let mut progress = RecordingProgress::default();
        let batch = ShapeBatch::from_shapes([singler()]);

        let path = player.plan(&Board::EMPTY, &batch, &mut progress).unwrap();
        assert_eq!(path.move_count(), 1);
        let summary = progress.summary.unwrap();
        assert_eq!(summary.paths, 64);
        assert_eq!(summary.placements_found, 64);
        assert_eq!(progress.last_update, Some(64));
    }

    #[test]
    fn test_partial_plan_places_what_fits() {
        // Only single cells fit between the occupied cells.
        let board = Board::from_ascii(
            "
            #.#.#.#.
            .#.#.#.#
            #.#.#.#.
            .#.#.#.#
            #.#.#.#.
            .#.#.#.#
            #.#.#.#.
            .#.#.#.#
            ",
        );
        let batch = ShapeBatch::from_shapes([
            Shape::new(ShapeKind::LargeSquare, Orientation::N),
            singler(),
        ]);
        let mut player = SearchPlayer::new(FullEvalPolicy::new());
        let mv = player.make_move(&board, &batch, &mut NoProgress).unwrap();
        assert_eq!(mv.shape_id, ShapeId::new(2));
        assert_eq!(player.planned_moves().count(), 0);

        player.reset();
        assert_eq!(player.planned_moves().count(), 0);
    }

    #[test]
    fn test_move_serialization() {
        let mv = Move {
            shape_id: ShapeId::new(3),
            placement: "f2".parse().unwrap(),
        };
        assert_eq!(
            serde_json::to_string(&mv).unwrap(),
            r#"{"shape_id":3,"placement":"f2"}"#
        );
    }
}
