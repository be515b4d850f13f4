//! Full classification against an ownership oracle.

use tracing::debug;

use super::{CellClassifier, EdgePolicy};
use crate::coords::GridCoordinate;
use crate::region::CellDescriptor;
use crate::registry::OwnershipOracle;

/// Classifies cells as wilderness, owned land, group land or home cells.
pub struct FullClassifier<'a, O: OwnershipOracle + ?Sized> {
    oracle: &'a O,
}

impl<'a, O: OwnershipOracle + ?Sized> FullClassifier<'a, O> {
    pub fn new(oracle: &'a O) -> Self {
        Self { oracle }
    }
}

impl<O: OwnershipOracle + ?Sized> CellClassifier for FullClassifier<'_, O> {
    fn classify(&self, coord: GridCoordinate) -> CellDescriptor {
        let claim = match self.oracle.claim_at(coord) {
            Ok(Some(claim)) => claim,
            Ok(None) => return CellDescriptor::wilderness(),
            Err(e) => {
                debug!("treating {} as wilderness: {}", coord, e);
                return CellDescriptor::wilderness();
            }
        };

        // Home wins over group membership so it always stands out
        if claim.is_home {
            return CellDescriptor::home(claim.owner);
        }
        match claim.group {
            Some(group) => CellDescriptor::group(claim.owner, group.id, group.type_name),
            None => CellDescriptor::owned(claim.owner),
        }
    }

    fn policy(&self) -> EdgePolicy {
        EdgePolicy::FullClassification
    }
}
