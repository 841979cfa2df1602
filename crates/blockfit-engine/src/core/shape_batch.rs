use serde::{Deserialize, Serialize};

use super::Shape;

/// Identifier of a shape within the batch it was dealt in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ShapeId(u32);

impl ShapeId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Shapes that are still waiting to be placed, in the order they were dealt.
///
/// Ids are unique within a batch. Removing a shape keeps the relative order of the
/// others, which is the order the search explores them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShapeBatch {
    entries: Vec<(ShapeId, Shape)>,
}

impl ShapeBatch {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a batch numbering the shapes `1, 2, ..` in the given order.
    #[must_use]
    pub fn from_shapes(shapes: impl IntoIterator<Item = Shape>) -> Self {
        shapes
            .into_iter()
            .zip(1..)
            .map(|(shape, id)| (ShapeId(id), shape))
            .collect()
    }

    /// Adds a shape, replacing any shape that already uses `id`.
    pub fn insert(&mut self, id: ShapeId, shape: Shape) {
        match self.entries.iter_mut().find(|(i, _)| *i == id) {
            Some(entry) => entry.1 = shape,
            None => self.entries.push((id, shape)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<Shape> {
        self.entries
            .iter()
            .find_map(|(i, shape)| (*i == id).then_some(*shape))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, Shape)> + '_ {
        self.entries.iter().copied()
    }

    pub fn shapes(&self) -> impl Iterator<Item = Shape> + '_ {
        self.entries.iter().map(|(_, shape)| *shape)
    }

    /// Returns a copy of the batch with `id` taken out.
    #[must_use]
    pub fn without(&self, id: ShapeId) -> Self {
        self.iter().filter(|(i, _)| *i != id).collect()
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.entries.iter().position(|(i, _)| *i == id)?;
        Some(self.entries.remove(index).1)
    }
}

impl FromIterator<(ShapeId, Shape)> for ShapeBatch {
    fn from_iter<T: IntoIterator<Item = (ShapeId, Shape)>>(iter: T) -> Self {
        let mut batch = Self::new();
        for (id, shape) in iter {
            batch.insert(id, shape);
        }
        batch
    }
}
