//! Boundary extraction.
//!
//! Scans a materialized [`CellGrid`] along both axes and emits one segment
//! per drawable side of every border between cells of different regions.
//!
//! ## Geometry
//! A border between cell columns `x` and `x+1` lies at world X `(x+1)*S`.
//! The near side (column `x`) draws at `(x+1)*S - inset`, the far side at
//! `(x+1)*S + inset`, so both sides of one border stay visually distinct.
//! Along the border a base segment covers `z*S + inset ..= (z+1)*S - inset`,
//! which makes an isolated cell's four segments close into a square.
//!
//! ## Corner growth
//! At each end of a segment, with `own` the side's column and `other` the
//! column across the border, in the neighbouring row:
//! - one `grow` step if the cell in the `other` column shares the side's
//!   region;
//! - a second step if the cell in the `own` column shares it as well.
//!
//! Growth per end is capped at `2 * inset`, which is exactly where the
//! perpendicular segment of the same region lies on a concave corner.
//! Neighbours outside the grid never match.
//!
//! The horizontal pass is the same scan with X and Z swapped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::EdgePolicy;
use crate::config::OutlineConfig;
use crate::coords::{Axis, GridCoordinate, GridWindow, Point3, Vector3};
use crate::error::Result;
use crate::grid::CellGrid;
use crate::region::{CellDescriptor, EdgeLabel};

/// Height given to every segment start; the renderer picks the real one.
pub const SEGMENT_Y: f64 = 0.0;

/// An axis-aligned line segment along one side of a region border.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundarySegment {
    pub start: Point3,
    /// Pure X or pure Z, strictly positive
    pub direction: Vector3,
    pub edge_label: EdgeLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux_id: Option<String>,
}

impl BoundarySegment {
    pub fn end(&self) -> Point3 {
        self.start + self.direction
    }

    pub fn length(&self) -> f64 {
        self.direction.x + self.direction.z
    }

    /// Axis the segment runs along.
    pub fn axis(&self) -> Axis {
        if self.direction.x > 0.0 {
            Axis::X
        } else {
            Axis::Z
        }
    }
}

/// Which side of a border a segment is drawn for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    /// Lower coordinate (west or north)
    Near,
    /// Higher coordinate (east or south)
    Far,
}

/// One scan direction. `across` indexes the columns a border separates,
/// `along` runs parallel to the border.
#[derive(Clone, Copy, Debug)]
struct Pass {
    /// Axis the emitted segments run along
    along_axis: Axis,
}

impl Pass {
    const VERTICAL: Pass = Pass { along_axis: Axis::Z };
    const HORIZONTAL: Pass = Pass { along_axis: Axis::X };

    fn cell(self, across: i32, along: i32) -> GridCoordinate {
        match self.along_axis {
            Axis::Z => GridCoordinate::new(across, along),
            Axis::X => GridCoordinate::new(along, across),
        }
    }

    /// `(across range of borders, along range)` for an area.
    fn ranges(self, area: &GridWindow) -> ((i32, i32), (i32, i32)) {
        match self.along_axis {
            Axis::Z => ((area.min_x, area.max_x), (area.min_z, area.max_z)),
            Axis::X => ((area.min_z, area.max_z), (area.min_x, area.max_x)),
        }
    }

    fn segment(self, line: f64, start: f64, length: f64) -> (Point3, Vector3) {
        match self.along_axis {
            Axis::Z => (
                Point3::new(line, SEGMENT_Y, start),
                Vector3::new(0.0, 0.0, length),
            ),
            Axis::X => (
                Point3::new(start, SEGMENT_Y, line),
                Vector3::new(length, 0.0, 0.0),
            ),
        }
    }
}

/// Extract boundary segments for every border inside `area`.
///
/// The grid must cover `area` padded by one cell for corner growth to see
/// every neighbour. Segments come out vertical pass first, each pass in
/// increasing border coordinate, then along the border, near side first.
pub fn extract_edges(
    grid: &CellGrid,
    area: &GridWindow,
    config: &OutlineConfig,
) -> Result<Vec<BoundarySegment>> {
    config.validate()?;

    let mut segments = Vec::new();
    if grid.is_empty() {
        return Ok(segments);
    }

    scan(grid, area, config, Pass::VERTICAL, &mut segments);
    let vertical = segments.len();
    scan(grid, area, config, Pass::HORIZONTAL, &mut segments);

    debug!(
        "extracted {} vertical and {} horizontal segments over {}",
        vertical,
        segments.len() - vertical,
        area
    );
    Ok(segments)
}

fn scan(
    grid: &CellGrid,
    area: &GridWindow,
    config: &OutlineConfig,
    pass: Pass,
    out: &mut Vec<BoundarySegment>,
) {
    let ((across_min, across_max), (along_min, along_max)) = pass.ranges(area);
    let policy = grid.policy();

    for across in across_min..across_max {
        for along in along_min..=along_max {
            let (Some(near), Some(far)) = (
                grid.get(pass.cell(across, along)),
                grid.get(pass.cell(across + 1, along)),
            ) else {
                continue;
            };
            if near.same_region(far) {
                continue;
            }

            for (side, cell) in [(Side::Near, near), (Side::Far, far)] {
                if let Some(segment) =
                    side_segment(grid, config, policy, pass, across, along, side, cell)
                {
                    out.push(segment);
                }
            }
        }
    }
}

/// Segment for one side of the border between `across` and `across + 1`.
#[allow(clippy::too_many_arguments)]
fn side_segment(
    grid: &CellGrid,
    config: &OutlineConfig,
    policy: EdgePolicy,
    pass: Pass,
    across: i32,
    along: i32,
    side: Side,
    cell: &CellDescriptor,
) -> Option<BoundarySegment> {
    let label = cell.edge_label();
    if !policy.is_eligible(&label) {
        return None;
    }

    let size = config.cell_size as f64;
    let border = (across as f64 + 1.0) * size;
    let (own, other, line) = match side {
        Side::Near => (across, across + 1, border - config.inset),
        Side::Far => (across + 1, across, border + config.inset),
    };

    let grow_start = corner_growth(grid, config, pass, cell, own, other, along.checked_sub(1));
    let grow_end = corner_growth(grid, config, pass, cell, own, other, along.checked_add(1));

    let start = along as f64 * size + config.inset - grow_start;
    let end = (along as f64 + 1.0) * size - config.inset + grow_end;
    let length = end - start;
    if length <= 0.0 {
        return None;
    }

    let (start, direction) = pass.segment(line, start, length);
    Some(BoundarySegment {
        start,
        direction,
        edge_label: label,
        aux_id: cell.aux_id().map(str::to_string),
    })
}

/// Growth at the end of a segment facing row `along`, which is `None`
/// past the edge of the coordinate range.
fn corner_growth(
    grid: &CellGrid,
    config: &OutlineConfig,
    pass: Pass,
    cell: &CellDescriptor,
    own: i32,
    other: i32,
    along: Option<i32>,
) -> f64 {
    let Some(along) = along else {
        return 0.0;
    };
    let matches = |across: i32| {
        grid.get(pass.cell(across, along))
            .is_some_and(|neighbor| neighbor.same_region(cell))
    };

    let steps = if !matches(other) {
        0.0
    } else if matches(own) {
        2.0
    } else {
        1.0
    };
    (steps * config.grow).min(config.max_growth())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::EdgePolicy;

    const EPS: f64 = 1e-9;

    fn config() -> OutlineConfig {
        OutlineConfig::new(16, 0.4, 0.5).unwrap()
    }

    /// Grid from rows of region names; `.` is wilderness. Row 0 is z = 0.
    fn grid_from_rows(rows: &[&str], policy: EdgePolicy) -> CellGrid {
        let mut cells = Vec::new();
        for (z, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let cell = match (policy, ch) {
                    (EdgePolicy::FullClassification, '.') => CellDescriptor::wilderness(),
                    (EdgePolicy::FullClassification, c) => CellDescriptor::owned(c.to_string()),
                    (EdgePolicy::SelectionUniverse, '#') => CellDescriptor::selection(),
                    (EdgePolicy::SelectionUniverse, _) => CellDescriptor::outside(),
                };
                cells.push((GridCoordinate::new(x as i32, z as i32), cell));
            }
        }
        CellGrid::from_cells(cells, policy)
    }

    fn full_area(rows: &[&str]) -> GridWindow {
        GridWindow::new(0, rows[0].len() as i32 - 1, 0, rows.len() as i32 - 1).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_uniform_grid_has_no_edges() {
        let rows = ["AAAA", "AAAA", "AAAA"];
        let grid = grid_from_rows(&rows, EdgePolicy::FullClassification);
        let edges = extract_edges(&grid, &full_area(&rows), &config()).unwrap();
        assert!(edges.is_empty());
    }

    #[test]
    fn test_single_cell_square() {
        let rows = ["...", ".A.", "..."];
        let grid = grid_from_rows(&rows, EdgePolicy::FullClassification);
        let edges = extract_edges(&grid, &full_area(&rows), &config()).unwrap();

        assert_eq!(edges.len(), 4);
        for e in &edges {
            assert!(approx(e.length(), 15.2), "{:?}", e);
            assert_eq!(e.edge_label, EdgeLabel::Town);
            assert_eq!(e.start.y, SEGMENT_Y);
        }

        // West, east, north, south sides in scan order
        assert!(approx(edges[0].start.x, 16.4) && approx(edges[0].start.z, 16.4));
        assert_eq!(edges[0].axis(), Axis::Z);
        assert!(approx(edges[1].start.x, 31.6));
        assert!(approx(edges[2].start.x, 16.4) && approx(edges[2].start.z, 16.4));
        assert_eq!(edges[2].axis(), Axis::X);
        assert!(approx(edges[3].start.z, 31.6));
    }

    #[test]
    fn test_both_eligible_sides_emit() {
        let rows = ["BBB", "BAB", "BBB"];
        let grid = grid_from_rows(&rows, EdgePolicy::FullClassification);
        let edges = extract_edges(&grid, &full_area(&rows), &config()).unwrap();
        assert_eq!(edges.len(), 8);

        // The centre's own outline is never grown
        let centre: Vec<_> = edges
            .iter()
            .filter(|e| {
                let mid = e.start + e.direction * 0.5;
                mid.x > 16.0 && mid.x < 32.0 && mid.z > 16.0 && mid.z < 32.0
            })
            .collect();
        assert_eq!(centre.len(), 4);
        for e in centre {
            assert!(approx(e.length(), 15.2));
        }

        // The surrounding region wraps the corners and closes on itself
        let west_outer = &edges[0];
        assert!(approx(west_outer.start.x, 15.6));
        assert!(approx(west_outer.start.z, 15.6));
        assert!(approx(west_outer.end().z, 32.4));
    }

    #[test]
    fn test_wilderness_side_is_suppressed() {
        let rows = ["A."];
        let grid = grid_from_rows(&rows, EdgePolicy::FullClassification);
        let edges = extract_edges(&grid, &full_area(&rows), &config()).unwrap();
        assert_eq!(edges.len(), 1);
        assert!(approx(edges[0].start.x, 15.6));
    }

    #[test]
    fn test_selection_only_selection_side_renders() {
        let rows = ["o#o"];
        let grid = grid_from_rows(&rows, EdgePolicy::SelectionUniverse);
        let edges = extract_edges(&grid, &full_area(&rows), &config()).unwrap();
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|e| e.edge_label == EdgeLabel::Selection));
        assert!(approx(edges[0].start.x, 16.4));
        assert!(approx(edges[1].start.x, 31.6));
    }

    #[test]
    fn test_checkerboard_corner_growth_is_symmetric() {
        let rows = ["AB", "BA"];
        let grid = grid_from_rows(&rows, EdgePolicy::FullClassification);
        let area = GridWindow::new(0, 1, 0, 1).unwrap();
        let cfg = config();
        let edges = extract_edges(&grid, &area, &cfg).unwrap();

        // Cell (0,0) side of the x=0 border and of the z=0 border
        let vertical = edges
            .iter()
            .find(|e| e.axis() == Axis::Z && approx(e.start.x, 15.6) && e.start.z < 1.0)
            .unwrap();
        let horizontal = edges
            .iter()
            .find(|e| e.axis() == Axis::X && approx(e.start.z, 15.6) && e.start.x < 1.0)
            .unwrap();

        assert!(approx(vertical.length(), 15.2 + cfg.grow));
        assert!(approx(horizontal.length(), 15.2 + cfg.grow));
        assert!(approx(vertical.start.z, 0.4));
        assert!(approx(horizontal.start.x, 0.4));
        assert!(approx(vertical.end().z, horizontal.end().x));
        assert!(approx(vertical.end().z, 16.0 - cfg.inset + cfg.grow));
    }

    #[test]
    fn test_concave_corner_closes_exactly() {
        // A wraps around the B cell at (1,0)
        let rows = ["AB", "AA"];
        let grid = grid_from_rows(&rows, EdgePolicy::FullClassification);
        let area = GridWindow::new(0, 1, 0, 1).unwrap();
        let edges = extract_edges(&grid, &area, &config()).unwrap();

        let a_vertical = edges
            .iter()
            .find(|e| e.axis() == Axis::Z && approx(e.start.x, 15.6))
            .unwrap();
        let a_horizontal = edges
            .iter()
            .find(|e| e.axis() == Axis::X && approx(e.start.z, 16.4))
            .unwrap();

        // Both ends stop on the other segment's line
        assert!(approx(a_vertical.end().z, 16.4));
        assert!(approx(a_horizontal.start.x, 15.6));
    }

    #[test]
    fn test_missing_neighbors_do_not_grow() {
        // Unpadded grid: corner lookups fall off the grid
        let rows = ["AB"];
        let grid = grid_from_rows(&rows, EdgePolicy::FullClassification);
        let edges = extract_edges(&grid, &full_area(&rows), &config()).unwrap();
        assert_eq!(edges.len(), 2);
        for e in &edges {
            assert!(approx(e.length(), 15.2));
        }
    }

    #[test]
    fn test_borders_at_coordinate_limit() {
        let top = i32::MAX;
        let area = GridWindow::new(top - 1, top, top - 1, top).unwrap();
        let grid = CellGrid::from_cells(
            area.iter().map(|c| {
                let cell = if c == GridCoordinate::new(top - 1, top) {
                    CellDescriptor::selection()
                } else {
                    CellDescriptor::outside()
                };
                (c, cell)
            }),
            EdgePolicy::SelectionUniverse,
        );

        let edges = extract_edges(&grid, &area, &config()).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].axis(), Axis::Z);
        assert_eq!(edges[1].axis(), Axis::X);
        for e in &edges {
            assert_eq!(e.edge_label, EdgeLabel::Selection);
            // World coordinates near 3.4e10 leave little f64 precision
            assert!((e.length() - 15.2).abs() < 1e-3);
        }
    }

    #[test]
    fn test_straight_run_emits_per_cell() {
        let rows = ["AB", "AB", "AB"];
        let grid = grid_from_rows(&rows, EdgePolicy::FullClassification);
        let edges = extract_edges(&grid, &full_area(&rows), &config()).unwrap();
        assert_eq!(edges.len(), 6);
        assert!(edges.iter().all(|e| e.axis() == Axis::Z));
        assert!(edges.iter().all(|e| e.length() > 0.0));
    }

    #[test]
    fn test_invalid_config_produces_no_output() {
        let rows = ["AB"];
        let grid = grid_from_rows(&rows, EdgePolicy::FullClassification);
        let bad = OutlineConfig { cell_size: 16, inset: 8.0, grow: 0.5 };
        assert!(extract_edges(&grid, &full_area(&rows), &bad).is_err());
    }

    #[test]
    fn test_empty_grid_yields_nothing() {
        let grid = CellGrid::empty(EdgePolicy::SelectionUniverse);
        let area = GridWindow::new(0, 3, 0, 3).unwrap();
        assert!(extract_edges(&grid, &area, &config()).unwrap().is_empty());
    }

    #[test]
    fn test_group_segments_carry_aux_id() {
        let grid = CellGrid::from_cells(
            [
                (GridCoordinate::new(0, 0), CellDescriptor::group("Avalon", "g1", "Farm")),
                (GridCoordinate::new(1, 0), CellDescriptor::owned("Avalon")),
            ],
            EdgePolicy::FullClassification,
        );
        let area = GridWindow::new(0, 1, 0, 0).unwrap();
        let edges = extract_edges(&grid, &area, &config()).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].edge_label.as_str(), "farm");
        assert_eq!(edges[0].aux_id.as_deref(), Some("g1"));
        assert_eq!(edges[1].edge_label, EdgeLabel::Town);
        assert_eq!(edges[1].aux_id, None);
    }
}
