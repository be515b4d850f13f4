//! Grid materialization.
//!
//! Classifies every cell of a window once and keeps the descriptors in a
//! flat map, so the extractor can look neighbours up without touching the
//! ownership data again. Rows are classified in parallel with rayon.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::classify::{CellClassifier, EdgePolicy};
use crate::coords::{GridCoordinate, GridWindow};
use crate::region::CellDescriptor;

/// Classified cells of one window.
#[derive(Clone, Debug)]
pub struct CellGrid {
    cells: HashMap<GridCoordinate, CellDescriptor>,
    window: Option<GridWindow>,
    policy: EdgePolicy,
}

impl CellGrid {
    /// A grid with no cells; extraction over it yields nothing.
    pub fn empty(policy: EdgePolicy) -> Self {
        Self {
            cells: HashMap::new(),
            window: None,
            policy,
        }
    }

    /// Build a grid from explicit descriptors.
    pub fn from_cells<I>(cells: I, policy: EdgePolicy) -> Self
    where
        I: IntoIterator<Item = (GridCoordinate, CellDescriptor)>,
    {
        let cells: HashMap<_, _> = cells.into_iter().collect();
        let window = GridWindow::bounding(cells.keys());
        Self {
            cells,
            window,
            policy,
        }
    }

    /// Descriptor of a cell; `None` outside the materialized window.
    pub fn get(&self, coord: GridCoordinate) -> Option<&CellDescriptor> {
        self.cells.get(&coord)
    }

    /// Window covered, `None` for an empty grid.
    pub fn window(&self) -> Option<GridWindow> {
        self.window
    }

    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Classify every cell of `window`.
///
/// Callers pad the window at least one cell beyond the area whose borders
/// they extract.
pub fn build_grid<C: CellClassifier + ?Sized>(classifier: &C, window: &GridWindow) -> CellGrid {
    let (min_x, max_x) = (window.min_x, window.max_x);

    let cells: HashMap<GridCoordinate, CellDescriptor> = (window.min_z..=window.max_z)
        .into_par_iter()
        .flat_map_iter(|z| {
            (min_x..=max_x).map(move |x| {
                let coord = GridCoordinate::new(x, z);
                (coord, classifier.classify(coord))
            })
        })
        .collect();

    debug!("materialized {} cells over {}", cells.len(), window);

    CellGrid {
        cells,
        window: Some(*window),
        policy: classifier.policy(),
    }
}
