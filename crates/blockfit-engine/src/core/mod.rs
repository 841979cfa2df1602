pub use self::{board::*, placement::*, shape::*, shape_batch::*};

pub(crate) mod board;
pub(crate) mod placement;
pub(crate) mod shape;
pub(crate) mod shape_batch;

/// Side length of the square board.
pub const BOARD_SIZE: usize = 8;
/// Number of cells on the board.
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE;
