//! JSON hand-off of extracted segments.
//!
//! Wraps a segment list with the geometry it was built with and a small
//! summary, so a renderer (or a person reading the file) does not need to
//! recompute either.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::OutlineConfig;
use crate::coords::{Axis, GridWindow};
use crate::edges::BoundarySegment;
use crate::error::Result;

/// Format version for forward compatibility
const EXPORT_VERSION: u32 = 1;

/// Per-label and per-axis totals of a segment set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummary {
    pub total: usize,
    pub along_x: usize,
    pub along_z: usize,
    pub total_length: f64,
    /// Segment count per edge label
    pub by_label: BTreeMap<String, usize>,
}

impl SegmentSummary {
    pub fn from_segments(segments: &[BoundarySegment]) -> Self {
        let mut summary = SegmentSummary {
            total: segments.len(),
            ..Default::default()
        };
        for segment in segments {
            match segment.axis() {
                Axis::X => summary.along_x += 1,
                Axis::Z => summary.along_z += 1,
            }
            summary.total_length += segment.length();
            *summary
                .by_label
                .entry(segment.edge_label.to_string())
                .or_insert(0) += 1;
        }
        summary
    }
}

/// Exported segment document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentExport {
    pub version: u32,
    pub config: OutlineConfig,
    /// Scanned area, absent for an empty selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<GridWindow>,
    pub summary: SegmentSummary,
    pub segments: Vec<BoundarySegment>,
}

impl SegmentExport {
    pub fn new(segments: Vec<BoundarySegment>, config: OutlineConfig, area: Option<GridWindow>) -> Self {
        Self {
            version: EXPORT_VERSION,
            config,
            area,
            summary: SegmentSummary::from_segments(&segments),
            segments,
        }
    }

    /// Write pretty-printed JSON to any writer.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Write pretty-printed JSON to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read an export back.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
