//! Board, shapes and game flow for the 8×8 block-placement puzzle.
//!
//! - [`core`] holds the pure data structures: [`Board`], [`Shape`], [`Placement`] and
//!   [`ShapeBatch`].
//! - [`engine`] drives a game: [`BatchGenerator`] deals batches of three shapes,
//!   [`GameField`] applies placements and [`GameStats`] tracks the session.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum GameError {
    #[display("shape {shape_id} is not part of the current batch")]
    UnknownShape { shape_id: ShapeId },
    #[display("cannot place shape {shape_id}: {source}")]
    Place { shape_id: ShapeId, source: PlaceError },
}
