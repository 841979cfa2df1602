//! Exhaustive search over every way a batch can be placed.
//!
//! # How It Works
//!
//! Starting from the current board, every remaining shape (in batch order) is tried at
//! every coordinate (column by column). Each successful placement extends a copy of the
//! current path and the search recurses with that shape removed. A path becomes a leaf when
//! the batch is exhausted, or when none of the remaining shapes fits anywhere; such
//! dead-end paths are still reported so the caller can place as much as possible.
//!
//! Boards are `Copy`, so every branch works on its own snapshot and siblings never see
//! each other's placements. All orderings are explored, including ones that reach the same
//! board.

use blockfit_engine::{Board, Placement, ShapeBatch};

use crate::{
    board_analysis::BoardAnalysis,
    game_path::{Candidate, GamePath},
    path_policy::PathPolicy,
    progress::SearchProgress,
};

/// Leaves found by a search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub paths: Vec<GamePath>,
    /// Successful placement attempts across the whole search tree.
    pub placements_found: u64,
}

#[derive(Debug)]
pub struct MoveEnumerator<'a, P, R>
where
    P: PathPolicy + ?Sized,
    R: SearchProgress + ?Sized,
{
    policy: &'a P,
    progress: &'a mut R,
    placements_found: u64,
    paths: Vec<GamePath>,
}

impl<'a, P, R> MoveEnumerator<'a, P, R>
where
    P: PathPolicy + ?Sized,
    R: SearchProgress + ?Sized,
{
    #[must_use]
    pub fn new(policy: &'a P, progress: &'a mut R) -> Self {
        Self {
            policy,
            progress,
            placements_found: 0,
            paths: Vec::new(),
        }
    }

    /// Enumerates every maximal path placing `batch` on `board`.
    ///
    /// An empty batch yields a single empty path.
    #[must_use]
    pub fn enumerate(mut self, board: &Board, batch: &ShapeBatch) -> SearchOutcome {
        let root = GamePath::new(board.occupied_cell_count());
        self.search(*board, batch, &root);
        SearchOutcome {
            paths: self.paths,
            placements_found: self.placements_found,
        }
    }

    fn search(&mut self, board: Board, batch: &ShapeBatch, path: &GamePath) {
        if batch.is_empty() {
            self.emit_leaf(&board, path.clone());
            return;
        }

        let mut extended = false;
        for (shape_id, shape) in batch.iter() {
            let rest = batch.without(shape_id);
            for placement in Placement::all() {
                let mut next = board;
                if !next.try_place(shape, placement) {
                    continue;
                }
                self.placements_found += 1;
                extended = true;

                let mut child = path.clone();
                let candidate = Candidate::new(shape_id, placement);
                self.policy
                    .gather_step_stats(&mut child, candidate, &board, &next);
                self.search(next, &rest, &child);
            }
        }
        self.progress.update(self.placements_found);

        if !extended {
            self.emit_leaf(&board, path.clone());
        }
    }

    fn emit_leaf(&mut self, board: &Board, mut path: GamePath) {
        let analysis = BoardAnalysis::from_board(board);
        self.policy.gather_path_stats(&mut path, &analysis);
        self.paths.push(path);
    }
}

/// Runs a search without progress reporting.
#[must_use]
pub fn enumerate_paths<P>(policy: &P, board: &Board, batch: &ShapeBatch) -> SearchOutcome
where
    P: PathPolicy + ?Sized,
{
    let mut progress = crate::progress::NoProgress;
    MoveEnumerator::new(policy, &mut progress).enumerate(board, batch)
}
