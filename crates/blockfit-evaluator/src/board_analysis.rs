//! Static heuristics computed from a single board snapshot.
//!
//! [`BoardAnalysis`] evaluates each metric on first access and caches it, so a policy
//! that only needs the positional score never pays for the flood fill.

use std::cell::OnceCell;

use arrayvec::ArrayVec;
use blockfit_engine::{BOARD_SIZE, Board, TOTAL_CELLS};

/// Per-index weight for the positional score: edges are free, the centre is costly.
const POSITION_WEIGHTS: [f32; BOARD_SIZE] = [1.0, 0.75, 0.5, 0.25, 0.25, 0.5, 0.75, 1.0];

const LEFT_COLUMN: u64 = 0x0101_0101_0101_0101;
const RIGHT_COLUMN: u64 = LEFT_COLUMN << (BOARD_SIZE - 1);

/// A 4-connected checkerboard has the most clusters: one per empty cell of one colour.
const MAX_CLUSTERS: usize = TOTAL_CELLS / 2;

#[derive(Debug)]
pub struct BoardAnalysis {
    board: Board,
    positional_score: OnceCell<f32>,
    max_empty_rectangle: OnceCell<u32>,
    empty_clusters: OnceCell<ArrayVec<u32, MAX_CLUSTERS>>,
    fragmentation: OnceCell<f32>,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            board: *board,
            positional_score: OnceCell::new(),
            max_empty_rectangle: OnceCell::new(),
            empty_clusters: OnceCell::new(),
            fragmentation: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn occupied_cell_count(&self) -> u32 {
        self.board.occupied_cell_count()
    }

    /// Product of `weight(x) * weight(y)` over every occupied cell.
    ///
    /// An empty board scores `1.0`; each cell placed away from the edges pulls the
    /// score towards zero.
    #[must_use]
    pub fn positional_score(&self) -> f32 {
        *self.positional_score.get_or_init(|| {
            let mut score = 1.0;
            for (x, wx) in POSITION_WEIGHTS.iter().enumerate() {
                for (y, wy) in POSITION_WEIGHTS.iter().enumerate() {
                    if self.board.is_occupied(x, y) {
                        score *= wx * wy;
                    }
                }
            }
            score
        })
    }

    /// Area, in cells, of the largest axis-aligned rectangle of empty cells.
    #[must_use]
    pub fn max_empty_rectangle(&self) -> u32 {
        *self.max_empty_rectangle.get_or_init(|| {
            // Empty cells stacked upwards from the current row, per column.
            let mut heights = [0; BOARD_SIZE];
            let mut best = 0_u32;
            for y in 0..BOARD_SIZE {
                for (x, height) in heights.iter_mut().enumerate() {
                    *height = if self.board.is_occupied(x, y) {
                        0
                    } else {
                        *height + 1
                    };
                }
                best = best.max(largest_rectangle_in_histogram(&heights));
            }
            best
        })
    }

    /// [`Self::max_empty_rectangle`] as a fraction of the whole board.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn max_area_ratio(&self) -> f32 {
        self.max_empty_rectangle() as f32 / TOTAL_CELLS as f32
    }

    /// Sizes of the 4-connected regions of empty cells, in discovery order.
    #[must_use]
    pub fn empty_clusters(&self) -> &[u32] {
        self.empty_clusters.get_or_init(|| {
            let mut clusters = ArrayVec::new();
            let mut remaining = !self.board.bits();
            while remaining != 0 {
                let seed = remaining & remaining.wrapping_neg();
                let cluster = flood_fill(seed, remaining);
                clusters.push(cluster.count_ones());
                remaining &= !cluster;
            }
            clusters
        })
    }

    /// Concentration of the empty space: `Σ (cluster / total_empty)²`.
    ///
    /// `1.0` when all empty cells form one region, `1/n` for `n` equal regions and `0.0`
    /// when there are no empty cells at all.
    #[must_use]
    pub fn fragmentation(&self) -> f32 {
        *self.fragmentation.get_or_init(|| {
            let clusters = self.empty_clusters();
            let total: u32 = clusters.iter().sum();
            if total == 0 {
                return 0.0;
            }
            clusters
                .iter()
                .map(|&size| {
                    let share = ratio(size, total);
                    share * share
                })
                .sum()
        })
    }
}

#[expect(clippy::cast_precision_loss)]
fn ratio(part: u32, total: u32) -> f32 {
    part as f32 / total as f32
}

/// Grows `seed` through the set bits of `region`.
fn flood_fill(seed: u64, region: u64) -> u64 {
    let mut filled = seed;
    loop {
        let grown = (filled | neighbours(filled)) & region;
        if grown == filled {
            return filled;
        }
        filled = grown;
    }
}

fn neighbours(cells: u64) -> u64 {
    ((cells << 1) & !LEFT_COLUMN)
        | ((cells >> 1) & !RIGHT_COLUMN)
        | (cells << BOARD_SIZE)
        | (cells >> BOARD_SIZE)
}

fn largest_rectangle_in_histogram(heights: &[u32; BOARD_SIZE]) -> u32 {
    // Indices of bars with increasing heights.
    let mut stack = ArrayVec::<usize, BOARD_SIZE>::new();
    let mut best = 0_u32;
    for i in 0..=BOARD_SIZE {
        let current = heights.get(i).copied().unwrap_or(0);
        while let Some(&top) = stack.last() {
            if heights[top] < current {
                break;
            }
            stack.pop();
            let left = stack.last().map_or(0, |&l| l + 1);
            let width = u32::try_from(i - left).unwrap_or(u32::MAX);
            best = best.max(heights[top] * width);
        }
        if i < BOARD_SIZE {
            stack.push(i);
        }
    }
    best
}
