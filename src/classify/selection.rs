//! Selection-universe classification.

use std::collections::HashSet;

use super::{CellClassifier, EdgePolicy};
use crate::coords::GridCoordinate;
use crate::region::CellDescriptor;

/// Classifies cells as inside or outside a candidate set.
#[derive(Clone, Debug, Default)]
pub struct SelectionClassifier {
    candidates: HashSet<GridCoordinate>,
}

impl SelectionClassifier {
    pub fn new(candidates: HashSet<GridCoordinate>) -> Self {
        Self { candidates }
    }
}

impl FromIterator<GridCoordinate> for SelectionClassifier {
    fn from_iter<I: IntoIterator<Item = GridCoordinate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl CellClassifier for SelectionClassifier {
    fn classify(&self, coord: GridCoordinate) -> CellDescriptor {
        if self.candidates.contains(&coord) {
            CellDescriptor::selection()
        } else {
            CellDescriptor::outside()
        }
    }

    fn policy(&self) -> EdgePolicy {
        EdgePolicy::SelectionUniverse
    }
}
