//! Cell classifiers.
//!
//! A classifier maps every grid cell to a [`CellDescriptor`] and names the
//! [`EdgePolicy`] deciding which side of a differing border is drawn.
//! Classification is total: lookups that fail degrade to the background
//! region of the mode instead of aborting a scan.

mod full;
mod selection;

pub use full::FullClassifier;
pub use selection::SelectionClassifier;

use crate::coords::GridCoordinate;
use crate::region::{CellDescriptor, EdgeLabel};

/// Render-eligibility policy for the sides of a border.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgePolicy {
    /// Every side except wilderness is drawn
    FullClassification,
    /// Only the selection side is drawn
    SelectionUniverse,
}

impl EdgePolicy {
    /// Whether a cell with this label draws its side of a border.
    pub fn is_eligible(self, label: &EdgeLabel) -> bool {
        match self {
            EdgePolicy::FullClassification => *label != EdgeLabel::Wilderness,
            EdgePolicy::SelectionUniverse => *label == EdgeLabel::Selection,
        }
    }
}

/// Maps grid cells to descriptors.
///
/// Must be `Sync`: grid rows are classified in parallel.
pub trait CellClassifier: Sync {
    fn classify(&self, coord: GridCoordinate) -> CellDescriptor;

    /// Eligibility policy matching this classifier's labels.
    fn policy(&self) -> EdgePolicy;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_policy_skips_only_wilderness() {
        let policy = EdgePolicy::FullClassification;
        assert!(!policy.is_eligible(&EdgeLabel::Wilderness));
        assert!(policy.is_eligible(&EdgeLabel::Town));
        assert!(policy.is_eligible(&EdgeLabel::Homeblock));
        assert!(policy.is_eligible(&EdgeLabel::GroupType("farm".to_string())));
    }

    #[test]
    fn test_selection_policy_draws_only_selection() {
        let policy = EdgePolicy::SelectionUniverse;
        assert!(policy.is_eligible(&EdgeLabel::Selection));
        assert!(!policy.is_eligible(&EdgeLabel::Outside));
        assert!(!policy.is_eligible(&EdgeLabel::Town));
    }
}
