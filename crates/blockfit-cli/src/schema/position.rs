use anyhow::Context;
use blockfit_engine::{Board, Shape, ShapeBatch};
use serde::{Deserialize, Serialize};

/// A board and the shapes waiting to be placed on it.
///
/// ```json
/// {
///   "board": ["........", "...", ".......#"],
///   "score": 120,
///   "shapes": [{ "kind": "tee", "orientation": "N" }]
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub(crate) struct Position {
    /// Rows top to bottom, `#` for occupied cells and `.` for empty ones
    pub board: Vec<String>,
    #[serde(default)]
    pub score: u32,
    /// Shapes in batch order; they are numbered from 1
    pub shapes: Vec<Shape>,
}

impl Position {
    pub(crate) fn board(&self) -> anyhow::Result<Board> {
        let board: Board = self
            .board
            .join("\n")
            .parse()
            .context("Invalid board in position")?;
        Ok(board.with_score(self.score))
    }

    pub(crate) fn batch(&self) -> ShapeBatch {
        ShapeBatch::from_shapes(self.shapes.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use blockfit_engine::{Orientation, ShapeId, ShapeKind};

    use super::*;

    #[test]
    fn test_parse_position() {
        let json = r##"{
            "board": [
                "#.......",
                "........",
                "........",
                "........",
                "........",
                "........",
                "........",
                ".......#"
            ],
            "score": 42,
            "shapes": [
                { "kind": "tee", "orientation": "N" },
                { "kind": "five-liner", "orientation": "W" }
            ]
        }"##;
        let position: Position = serde_json::from_str(json).unwrap();
        let board = position.board().unwrap();
        assert_eq!(board.occupied_cell_count(), 2);
        assert!(board.is_occupied(7, 7));
        assert_eq!(board.score(), 42);

        let batch = position.batch();
        assert_eq!(batch.len(), 2);
        assert_eq!(
            batch.get(ShapeId::new(2)),
            Some(Shape::new(ShapeKind::FiveLiner, Orientation::W))
        );
    }

    #[test]
    fn test_invalid_board() {
        let position = Position {
            board: vec!["........".to_owned(); 7],
            score: 0,
            shapes: vec![],
        };
        let err = position.board().unwrap_err();
        assert!(format!("{err:#}").contains("expected 8 rows"), "{err:#}");
    }
}
