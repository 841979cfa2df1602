//! Game flow on top of the core data structures.
//!
//! - [`BatchGenerator`] deals batches of [`BATCH_SIZE`] shapes from a [`BatchSeed`]
//! - [`GameField`] holds the board and the current batch and applies placements
//! - [`GameStats`] counts turns, placed pieces and cleared lines
//!
//! # Example
//!
//! ```
//! use blockfit_engine::{GameField, Placement};
//!
//! let mut field = GameField::new();
//! let (id, shape) = field.batch().iter().next().unwrap();
//! let placement = Placement::all()
//!     .find(|placement| field.board().can_place(shape, *placement))
//!     .unwrap();
//! field.place(id, placement).unwrap();
//!
//! assert_eq!(field.stats().placed_pieces(), 1);
//! assert!(!field.is_game_over());
//! ```

pub use self::{batch_generator::*, game_field::*, game_stats::*};

mod batch_generator;
mod game_field;
mod game_stats;
