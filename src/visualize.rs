//! Renderer-facing entry points.
//!
//! Each entry point pads its window, materializes the grid with the right
//! classifier and extracts the borders. Calls share no state.

use std::collections::HashSet;

use tracing::info;

use crate::classify::{CellClassifier, SelectionClassifier};
use crate::config::OutlineConfig;
use crate::coords::{GridCoordinate, GridWindow};
use crate::edges::{extract_edges, BoundarySegment};
use crate::error::{OutlineError, Result};
use crate::grid::build_grid;

/// Outline every region border inside `area`.
///
/// The grid is materialized one cell beyond `area` so corner growth can
/// see every neighbour of the scanned borders.
pub fn build_area_edges<C: CellClassifier + ?Sized>(
    classifier: &C,
    area: &GridWindow,
    config: &OutlineConfig,
) -> Result<Vec<BoundarySegment>> {
    config.validate()?;

    let grid = build_grid(classifier, &area.padded(1)?);
    let segments = extract_edges(&grid, area, config)?;

    info!(
        "area {} ({} cells): {} segments",
        area,
        area.cell_count(),
        segments.len()
    );
    Ok(segments)
}

/// Outline a set of cells against everything around it.
///
/// An empty set yields no segments. The bounding box is scanned with one
/// cell of margin, so the selection is always fully surrounded by outside
/// cells, and materialized with one more for neighbour lookups.
pub fn build_selection_edges(
    candidates: &HashSet<GridCoordinate>,
    config: &OutlineConfig,
) -> Result<Vec<BoundarySegment>> {
    config.validate()?;

    let Some(bounds) = GridWindow::bounding(candidates) else {
        info!("empty selection, nothing to outline");
        return Ok(Vec::new());
    };

    let (scanned, materialized) = (bounds.padded(1)?, bounds.padded(2)?);
    let classifier = SelectionClassifier::new(candidates.clone());
    let grid = build_grid(&classifier, &materialized);
    let segments = extract_edges(&grid, &scanned, config)?;

    info!(
        "selection of {} cells in {}: {} segments",
        candidates.len(),
        bounds,
        segments.len()
    );
    Ok(segments)
}

/// Square area of `2 * radius + 1` cells per side centred on `center`.
///
/// Fails if the square does not fit in the coordinate range.
pub fn area_around(center: GridCoordinate, radius: u32) -> Result<GridWindow> {
    let cell = GridWindow::single(center);
    let cells = i32::try_from(radius).map_err(|_| OutlineError::PaddingOutOfRange {
        window: cell,
        cells: radius.into(),
    })?;
    cell.padded(cells)
}

/// Cells covered by the world-space rectangle spanned by two corners.
///
/// Corners may be given in any order; both corner cells are included.
pub fn selection_from_world_corners(
    a: (f64, f64),
    b: (f64, f64),
    cell_size: i32,
) -> Result<HashSet<GridCoordinate>> {
    if cell_size <= 0 {
        return Err(OutlineError::InvalidCellSize(cell_size));
    }
    let a = GridCoordinate::from_world(a.0, a.1, cell_size);
    let b = GridCoordinate::from_world(b.0, b.1, cell_size);
    let window = GridWindow::new(a.x.min(b.x), a.x.max(b.x), a.z.min(b.z), a.z.max(b.z))?;
    Ok(window.iter().collect())
}
