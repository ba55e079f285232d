//! Collection of measurements describing how well a request's points are hidden
use std::fmt::Debug;
use std::ops::AddAssign;

use log::info;
use serde::Serialize;

/// Summary of a single anonymization request's cells
#[derive(Default, Copy, Clone, Debug, Serialize)]
pub struct OccupancyReport {
    /// Number of raw points per occupied cell (suppressed cells included)
    pub occupancy: Measurement<usize>,

    /// Cells holding exactly one raw point
    ///
    /// Their occupant is only hidden by the cell's extent.
    pub singletons: usize,

    /// Cells dropped for holding less than the minimum occupancy
    pub suppressed_cells: usize,

    /// Raw points dropped with their cells
    pub suppressed_points: usize,
}

impl OccupancyReport {
    /// Account for a cell holding `count` raw points
    pub fn add_cell(&mut self, count: usize, suppressed: bool) {
        self.occupancy.add(count);
        if count == 1 {
            self.singletons += 1;
        }
        if suppressed {
            self.suppressed_cells += 1;
            self.suppressed_points += count;
        }
    }

    /// Number of points actually released
    pub fn released(&self) -> usize {
        self.occupancy.acc - self.suppressed_points
    }

    /// Log the measured results
    pub fn log(&self) {
        let Measurement {
            number, min, max, ..
        } = self.occupancy;
        info!(
            "{number} occupied cells hold between {min} and {max} points, averaging at {:.2}",
            self.occupancy.avg()
        );
        info!(
            "{} cells hold a single point, {} cells with {} points were suppressed",
            self.singletons, self.suppressed_cells, self.suppressed_points
        );
    }
}

#[derive(Default, Copy, Clone, Serialize)]
pub struct Measurement<T: Measureable> {
    /// How many values have been:
    /// - accumulated into `acc`
    /// - compared with `max`
    pub number: u32,

    /// Sum of all seen values
    pub acc: T,

    /// The lowest of all seen values
    pub min: T,

    /// The highest of all seen values
    pub max: T,
}
impl<T: Measureable> Measurement<T> {
    /// Add a data point to the measurement
    pub fn add(&mut self, value: T) {
        self.number += 1;
        self.acc += value;

        if self.number == 1 {
            // Since Measure<T> is generic, min and max can't be initialised with some MAX and MIN constants.
            self.min = value;
            self.max = value;
        } else {
            if self.max < value {
                self.max = value;
            }
            if self.min > value {
                self.min = value;
            }
        }
    }

    /// Get the average value
    pub fn avg(&self) -> T::Avg {
        self.acc.avg(self.number)
    }
}
// Custom Debug impl
// - also outputs `avg`
impl<T: Measureable> Debug for Measurement<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Measurement")
            .field("number", &self.number)
            .field("acc", &self.acc)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("avg", &self.avg())
            .finish()
    }
}

/// Empty trait combining all traits required of measured values into a single shorthand.
pub trait Measureable: Default + Copy + PartialOrd + AddAssign<Self> + Debug {
    type Avg: Debug;
    fn avg(self, count: u32) -> Self::Avg;
}
macro_rules! impl_numeric {
    ($($T:ty),*) => {
        $(
            impl Measureable for $T {
                type Avg = f64;
                fn avg(self, count: u32) -> Self::Avg {
                    if count == 0 {
                        0.0
                    } else {
                        self as f64 / count as f64
                    }
                }
            }
        )*
    };
}
impl_numeric!(u32, usize);
