use super::{bbox::BBox, lerp, Point};
use crate::error::{PrivacyError, Result};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A grid cell's index
///
/// The row is the bin on the y axis, the column the one on the x axis.
/// Cells are ordered row-major.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline]
    pub fn new(row: usize, col: usize) -> Cell {
        Cell { row, col }
    }
}

/// Highest number of bins per axis
pub const MAX_RESOLUTION: usize = 1 << 16;

/// Evenly spaced bin edges along a single axis
///
/// `bins` bins are described by `bins + 1` non-decreasing edges,
/// the first being the axis' minimum and the last its maximum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    edges: Vec<f64>,
}

impl Partition {
    pub fn new(min: f64, max: f64, bins: usize) -> Result<Partition> {
        if bins == 0 || bins > MAX_RESOLUTION {
            return Err(PrivacyError::InvalidResolution(bins));
        }

        // Degenerate axis: every edge is the same value
        if min == max {
            return Ok(Partition {
                edges: vec![min; bins + 1],
            });
        }

        let mut edges: Vec<f64> = (0..=bins)
            .map(|i| lerp(min, max, i as f64 / bins as f64).clamp(min, max))
            .collect();
        edges[0] = min;
        edges[bins] = max;
        Ok(Partition { edges })
    }

    /// The `bins + 1` edges
    #[inline]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins
    #[inline]
    pub fn bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Lower and upper edge of a bin
    #[inline]
    pub fn bin_range(&self, bin: usize) -> (f64, f64) {
        (self.edges[bin], self.edges[bin + 1])
    }

    /// Find the bin `i` with `edges[i] <= value <= edges[i + 1]`
    ///
    /// A value on an inner edge belongs to the lower bin,
    /// which makes the axis' maximum fall into the last bin.
    /// Values outside of the axis are clamped into the first or last bin.
    pub fn lookup(&self, value: f64) -> usize {
        // Number of upper edges strictly below the value
        // i.e. the first bin whose upper edge is not below it
        let bin = self.edges[1..].partition_point(|&edge| edge < value);
        bin.min(self.bins() - 1)
    }
}

/// A grid dividing a bounding box into `resolution × resolution` cells
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub x: Partition,
    pub y: Partition,
}

impl Grid {
    /// Partition both axes of a bounding box independently
    pub fn new(bbox: &BBox, resolution: usize) -> Result<Grid> {
        Ok(Grid {
            x: Partition::new(bbox.min.x, bbox.max.x, resolution)?,
            y: Partition::new(bbox.min.y, bbox.max.y, resolution)?,
        })
    }

    /// Get the excluded upper bound for indexes
    pub fn index_range(&self) -> Cell {
        Cell::new(self.y.bins(), self.x.bins())
    }

    /// Grid index to BBox i.e. points
    pub fn tile_box(&self, cell: Cell) -> BBox {
        let (min_x, max_x) = self.x.bin_range(cell.col);
        let (min_y, max_y) = self.y.bin_range(cell.row);
        BBox {
            min: Vector2::new(min_x, min_y),
            max: Vector2::new(max_x, max_y),
        }
    }

    /// Point to grid index
    pub fn lookup_point(&self, point: Point) -> Cell {
        Cell::new(self.y.lookup(point.y), self.x.lookup(point.x))
    }
}
