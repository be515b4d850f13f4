//! Error types for outline extraction

use thiserror::Error;

use crate::coords::{Axis, GridCoordinate, GridWindow};

/// Errors reported to callers before any scan starts, or while loading and
/// exporting documents.
#[derive(Debug, Error)]
pub enum OutlineError {
    /// Window bounds are inverted on one axis
    #[error("invalid window on {axis} axis: min {min} > max {max}")]
    InvalidWindow { axis: Axis, min: i32, max: i32 },

    /// Padding would push the window past the `i32` coordinate range
    #[error("padding window {window} by {cells} cells leaves the coordinate range")]
    PaddingOutOfRange { window: GridWindow, cells: i64 },

    /// Cell size must be strictly positive
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(i32),

    /// Inset must lie strictly between zero and half the cell size
    #[error("inset must satisfy 0 < inset < {half_cell}, got {inset}")]
    InvalidInset { inset: f64, half_cell: f64 },

    /// Grow step must be strictly positive
    #[error("grow must be positive, got {0}")]
    InvalidGrow(f64),

    /// Ownership document is inconsistent
    #[error("invalid land snapshot: {0}")]
    Snapshot(String),

    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document could not be parsed or encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ownership lookup that could not be answered.
///
/// Classifiers treat this as "unclaimed" for the single cell involved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Ownership data for the cell is not loaded
    #[error("ownership data for cell {0} is not loaded")]
    Unloaded(GridCoordinate),

    /// The backing store could not answer
    #[error("ownership lookup failed: {0}")]
    Unavailable(String),
}

/// Result type for outline operations
pub type Result<T> = std::result::Result<T, OutlineError>;
