use serde::Serialize;

use crate::{BOARD_SIZE, PlaceOutcome};

/// Upper bound on lines a single placement can clear (every row and every column).
const MAX_CLEARED_LINES: usize = 2 * BOARD_SIZE;

/// Counters for a game in progress.
///
/// # Example
///
/// ```
/// use blockfit_engine::{GameStats, PlaceOutcome};
///
/// let mut stats = GameStats::new();
/// stats.start_turn();
/// stats.record_placement(&PlaceOutcome {
///     placed_cells: 1,
///     cleared_lines: 2,
///     score_gain: 31,
/// });
///
/// assert_eq!(stats.placed_pieces(), 1);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct GameStats {
    turns: usize,
    placed_pieces: usize,
    placed_cells: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; MAX_CLEARED_LINES + 1],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            turns: 0,
            placed_pieces: 0,
            placed_cells: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; MAX_CLEARED_LINES + 1],
        }
    }

    /// Number of batches dealt so far.
    #[must_use]
    pub const fn turns(&self) -> usize {
        self.turns
    }

    #[must_use]
    pub const fn placed_pieces(&self) -> usize {
        self.placed_pieces
    }

    #[must_use]
    pub const fn placed_cells(&self) -> usize {
        self.placed_cells
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Histogram of placements by the number of lines they cleared.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; MAX_CLEARED_LINES + 1] {
        &self.line_cleared_counter
    }

    pub const fn start_turn(&mut self) {
        self.turns += 1;
    }

    pub const fn record_placement(&mut self, outcome: &PlaceOutcome) {
        self.placed_pieces += 1;
        self.placed_cells += outcome.placed_cells;
        self.total_cleared_lines += outcome.cleared_lines;
        if outcome.cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[outcome.cleared_lines] += 1;
        }
    }
}
