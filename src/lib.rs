//! Region border outlines for a grid of claimed land.
//!
//! Classifies the cells of a window, materializes them into a grid and
//! extracts the line segments tracing every border between differently
//! classified cells, ready for a line renderer.

pub mod classify;
pub mod config;
pub mod coords;
pub mod edges;
pub mod error;
pub mod export;
pub mod grid;
pub mod region;
pub mod registry;
pub mod synth;
pub mod visualize;

pub use classify::{CellClassifier, EdgePolicy, FullClassifier, SelectionClassifier};
pub use config::OutlineConfig;
pub use coords::{Axis, GridCoordinate, GridWindow, Point3, Vector3};
pub use edges::{extract_edges, BoundarySegment, SEGMENT_Y};
pub use error::{LookupError, OutlineError, Result};
pub use grid::{build_grid, CellGrid};
pub use region::{CellDescriptor, EdgeLabel, Region, RegionKey};
pub use registry::{CellClaim, GroupClaim, LandDocument, LandSnapshot, OwnershipOracle};
pub use visualize::{
    area_around, build_area_edges, build_selection_edges, selection_from_world_corners,
};
