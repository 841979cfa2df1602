use blockfit_engine::{BatchSeed, Board, GameStats, ShapeBatch};
use blockfit_evaluator::{game_path::GamePath, player::Move};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::command::PolicyKind;

/// A complete automated game, replayable from `seed`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GameRecord {
    pub played_at: DateTime<Utc>,
    pub seed: BatchSeed,
    pub policy: PolicyKind,
    pub final_score: u32,
    pub game_over: bool,
    pub final_board: Board,
    pub final_stats: GameStats,
    pub turns: Vec<TurnRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TurnRecord {
    pub turn: usize,
    pub board_before: Board,
    pub batch: ShapeBatch,
    /// Placements made this turn; fewer than the batch size on the last turn of a game
    pub moves: Vec<Move>,
}

/// Output of the `suggest` command.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Suggestion {
    pub policy: PolicyKind,
    pub board: Board,
    pub batch: ShapeBatch,
    /// `None` when the batch is empty and nothing could be searched
    pub plan: Option<GamePath>,
    pub moves: Vec<Move>,
}
