//! Grid and world-space coordinates.
//!
//! Grid cells are addressed by signed `(x, z)` pairs. One grid unit spans
//! `cell_size` world units, so cell `(x, z)` covers the world rectangle
//! `[x*S, (x+1)*S) x [z*S, (z+1)*S)`.

use std::fmt;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

use crate::error::{OutlineError, Result};

/// A single cell of the ownership grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub x: i32,
    pub z: i32,
}

impl GridCoordinate {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Cell containing the world-space position `(x, z)`.
    ///
    /// Uses floor division so positions just below zero land in cell `-1`.
    pub fn from_world(x: f64, z: f64, cell_size: i32) -> Self {
        let size = cell_size as f64;
        Self {
            x: (x / size).floor() as i32,
            z: (z / size).floor() as i32,
        }
    }

    /// Cell containing an integer world position.
    pub fn from_block(x: i64, z: i64, cell_size: i32) -> Self {
        let size = cell_size as i64;
        Self {
            x: x.div_euclid(size) as i32,
            z: z.div_euclid(size) as i32,
        }
    }

    /// Offset by `(dx, dz)` cells.
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// The four edge-adjacent cells (west, east, north, south).
    pub fn neighbors(self) -> [GridCoordinate; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }
}

impl From<(i32, i32)> for GridCoordinate {
    fn from((x, z): (i32, i32)) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Grid axis, used to name window bounds and segment directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Inclusive rectangle of grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridWindow {
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl GridWindow {
    /// Create a window, rejecting inverted bounds.
    pub fn new(min_x: i32, max_x: i32, min_z: i32, max_z: i32) -> Result<Self> {
        if min_x > max_x {
            return Err(OutlineError::InvalidWindow {
                axis: Axis::X,
                min: min_x,
                max: max_x,
            });
        }
        if min_z > max_z {
            return Err(OutlineError::InvalidWindow {
                axis: Axis::Z,
                min: min_z,
                max: max_z,
            });
        }
        Ok(Self {
            min_x,
            max_x,
            min_z,
            max_z,
        })
    }

    /// Window of a single cell.
    pub fn single(cell: GridCoordinate) -> Self {
        Self {
            min_x: cell.x,
            max_x: cell.x,
            min_z: cell.z,
            max_z: cell.z,
        }
    }

    /// Smallest window containing every coordinate, or `None` when empty.
    pub fn bounding<'a, I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GridCoordinate>,
    {
        let mut iter = coords.into_iter();
        let first = *iter.next()?;
        let mut window = Self::single(first);
        for c in iter {
            window.min_x = window.min_x.min(c.x);
            window.max_x = window.max_x.max(c.x);
            window.min_z = window.min_z.min(c.z);
            window.max_z = window.max_z.max(c.z);
        }
        Some(window)
    }

    /// Grow the window by `cells` on every side.
    ///
    /// Fails if the grown window leaves the `i32` coordinate range, or if a
    /// negative pad inverts it.
    pub fn padded(&self, cells: i32) -> Result<Self> {
        let pad = |min: i32, max: i32| Some((min.checked_sub(cells)?, max.checked_add(cells)?));
        let ((min_x, max_x), (min_z, max_z)) =
            match (pad(self.min_x, self.max_x), pad(self.min_z, self.max_z)) {
                (Some(x), Some(z)) => (x, z),
                _ => {
                    return Err(OutlineError::PaddingOutOfRange {
                        window: *self,
                        cells: cells.into(),
                    })
                }
            };
        Self::new(min_x, max_x, min_z, max_z)
    }

    pub fn contains(&self, c: GridCoordinate) -> bool {
        c.x >= self.min_x && c.x <= self.max_x && c.z >= self.min_z && c.z <= self.max_z
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        (self.max_x as i64 - self.min_x as i64 + 1) as usize
    }

    /// Number of rows.
    pub fn depth(&self) -> usize {
        (self.max_z as i64 - self.min_z as i64 + 1) as usize
    }

    pub fn cell_count(&self) -> usize {
        self.width() * self.depth()
    }

    /// Iterate over all cells, row by row (z outer, x inner).
    pub fn iter(&self) -> impl Iterator<Item = GridCoordinate> {
        let (min_x, max_x) = (self.min_x, self.max_x);
        (self.min_z..=self.max_z)
            .flat_map(move |z| (min_x..=max_x).map(move |x| GridCoordinate { x, z }))
    }
}

impl fmt::Display for GridWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..={}] x [{}..={}]",
            self.min_x, self.max_x, self.min_z, self.max_z
        )
    }
}

/// World-space point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// World-space displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;

    fn add(self, rhs: Vector3) -> Self::Output {
        Point3 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Self::Output {
        Vector3 {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}
