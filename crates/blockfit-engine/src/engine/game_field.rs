use crate::{
    BatchGenerator, BatchSeed, Board, GameError, GameStats, PlaceOutcome, Placement, ShapeBatch,
    ShapeId,
};

/// A game in progress: the board, the shapes still to place and the dealer.
///
/// A new batch is dealt as soon as the last shape of the current one is placed. The game
/// is over once no remaining shape fits anywhere on the board.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    batch: ShapeBatch,
    generator: BatchGenerator,
    stats: GameStats,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new()
    }
}

impl GameField {
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(BatchGenerator::new())
    }

    #[must_use]
    pub fn with_seed(seed: BatchSeed) -> Self {
        Self::with_generator(BatchGenerator::with_seed(seed))
    }

    fn with_generator(mut generator: BatchGenerator) -> Self {
        let mut stats = GameStats::new();
        stats.start_turn();
        Self {
            board: Board::EMPTY,
            batch: generator.next_batch(),
            generator,
            stats,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn batch(&self) -> &ShapeBatch {
        &self.batch
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn seed(&self) -> BatchSeed {
        self.generator.seed()
    }

    /// Places a shape of the current batch.
    ///
    /// On error the field is left unchanged.
    pub fn place(
        &mut self,
        shape_id: ShapeId,
        placement: Placement,
    ) -> Result<PlaceOutcome, GameError> {
        let shape = self
            .batch
            .get(shape_id)
            .ok_or(GameError::UnknownShape { shape_id })?;
        let outcome = self
            .board
            .place(shape, placement)
            .map_err(|source| GameError::Place { shape_id, source })?;
        self.batch.remove(shape_id);
        self.stats.record_placement(&outcome);

        if self.batch.is_empty() {
            self.batch = self.generator.next_batch();
            self.stats.start_turn();
        }
        Ok(outcome)
    }

    /// Returns `true` when none of the remaining shapes can be placed.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        !self
            .batch
            .shapes()
            .any(|shape| self.board.can_fit_anywhere(shape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BATCH_SIZE;

    #[test]
    fn test_new_field() {
        let field = GameField::new();
        assert_eq!(*field.board(), Board::EMPTY);
        assert_eq!(field.batch().len(), BATCH_SIZE);
        assert_eq!(field.stats().turns(), 1);
        assert!(!field.is_game_over());
    }

    #[test]
    fn test_place_unknown_shape() {
        let mut field = GameField::new();
        let result = field.place(ShapeId::new(99), Placement::new(0, 0));
        assert!(matches!(result, Err(GameError::UnknownShape { .. })));
        assert_eq!(field.batch().len(), BATCH_SIZE);
    }

    fn place_first_fit(field: &mut GameField, id: ShapeId) -> PlaceOutcome {
        let shape = field.batch().get(id).unwrap();
        let placement = Placement::all()
            .find(|placement| field.board().can_place(shape, *placement))
            .unwrap();
        field.place(id, placement).unwrap()
    }

    #[test]
    fn test_batch_refills_after_last_shape() {
        let mut field = GameField::with_seed(BatchSeed::from_bytes([7; 16]));
        let ids: Vec<_> = field.batch().iter().map(|(id, _)| id).collect();
        let mut gained = 0;
        for id in ids {
            gained += place_first_fit(&mut field, id).score_gain;
        }
        assert_eq!(field.batch().len(), BATCH_SIZE);
        assert_eq!(field.stats().turns(), 2);
        assert_eq!(field.stats().placed_pieces(), 3);
        assert_eq!(field.board().score(), gained);
    }

    #[test]
    fn test_rejected_placement_keeps_shape() {
        let mut field = GameField::with_seed(BatchSeed::from_bytes([3; 16]));
        let (id, _) = field.batch().iter().next().unwrap();
        place_first_fit(&mut field, id);

        let (next, shape) = field.batch().iter().next().unwrap();
        let blocked = Placement::all()
            .find(|placement| !field.board().can_place(shape, *placement))
            .unwrap();
        let before = *field.board();
        let result = field.place(next, blocked);
        assert!(matches!(result, Err(GameError::Place { .. })));
        assert_eq!(field.batch().get(next), Some(shape));
        assert_eq!(*field.board(), before);
    }
}
