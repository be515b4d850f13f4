//! Outline geometry configuration.
//!
//! Controls the world size of a grid cell and how far segments sit inside
//! their cell (`inset`) and grow at corners (`grow`).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OutlineError, Result};

/// Reference cell size in world units
const STANDARD_CELL_SIZE: i32 = 16;

/// Segment geometry configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// World units per grid cell (`S`)
    pub cell_size: i32,

    /// Distance segments are pulled inside their own cell, on both the
    /// border offset and the segment ends
    pub inset: f64,

    /// Length added to a segment end per matching corner neighbour
    pub grow: f64,
}

impl OutlineConfig {
    /// Create a configuration, validating it immediately.
    pub fn new(cell_size: i32, inset: f64, grow: f64) -> Result<Self> {
        let config = Self {
            cell_size,
            inset,
            grow,
        };
        config.validate()?;
        Ok(config)
    }

    /// Standard 16-unit cells.
    pub fn standard() -> Self {
        Self {
            cell_size: STANDARD_CELL_SIZE,
            inset: 0.4,
            grow: 0.5,
        }
    }

    /// Small 8-unit cells.
    pub fn fine() -> Self {
        Self {
            cell_size: 8,
            inset: 0.25,
            grow: 0.3,
        }
    }

    /// Large 32-unit cells.
    pub fn coarse() -> Self {
        Self {
            cell_size: 32,
            inset: 0.5,
            grow: 0.6,
        }
    }

    /// Check `S > 0`, `0 < inset < S/2` and `grow > 0`.
    pub fn validate(&self) -> Result<()> {
        if self.cell_size <= 0 {
            return Err(OutlineError::InvalidCellSize(self.cell_size));
        }
        let half_cell = self.cell_size as f64 / 2.0;
        if !self.inset.is_finite() || self.inset <= 0.0 || self.inset >= half_cell {
            return Err(OutlineError::InvalidInset {
                inset: self.inset,
                half_cell,
            });
        }
        if !self.grow.is_finite() || self.grow <= 0.0 {
            return Err(OutlineError::InvalidGrow(self.grow));
        }
        Ok(())
    }

    /// Largest total growth at one segment end.
    ///
    /// A grown end stops on the line where the perpendicular border's
    /// segment sits, `inset` beyond the shared corner.
    pub fn max_growth(&self) -> f64 {
        2.0 * self.inset
    }

    /// Load and validate a JSON configuration file. Missing fields keep
    /// their standard values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: OutlineConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self::standard()
    }
}
