//! Replace exact locations by per cell representatives
//!
//! A request's points are covered by their bounding box, which is divided into a
//! `resolution × resolution` grid. Every point is then released as its cell's
//! representative (see [`ReleaseStrategy`]) so an observer only learns which cell a
//! record fell into, while the released density still matches the raw one.
//!
//! The output is grouped by cell. Cells are emitted in row-major order, each cell's
//! representative repeated once for every raw point it holds.
use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{BBox, Cell, Grid, Point};
use crate::measurements::OccupancyReport;
use crate::release::{ReleaseStrategy, Releaser};

/// Number of bins per axis if not configured otherwise
pub const DEFAULT_RESOLUTION: usize = 20;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct FilterConfig {
    /// Number of bins per axis
    pub resolution: usize,

    /// How a cell's representative is chosen
    pub release: ReleaseStrategy,

    /// Cells holding less points are dropped from the output
    ///
    /// `0` and `1` disable suppression.
    pub min_occupancy: usize,

    /// Seed for [`ReleaseStrategy::UniformJitter`], `None` uses the OS' entropy
    pub seed: Option<u64>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            resolution: DEFAULT_RESOLUTION,
            release: ReleaseStrategy::default(),
            min_occupancy: 1,
            seed: None,
        }
    }
}

/// Stateless anonymizer, every call builds and drops its own grid
#[derive(Copy, Clone, Debug, Default)]
pub struct PrivacyFilter {
    pub config: FilterConfig,
}

impl PrivacyFilter {
    pub fn new(config: FilterConfig) -> Self {
        PrivacyFilter { config }
    }

    /// Anonymize a batch of raw points
    pub fn anonymize(&self, points: &[Point]) -> Result<Vec<Point>> {
        self.anonymize_with_report(points).map(|(released, _)| released)
    }

    /// Anonymize a batch of raw points and describe how well they are hidden
    pub fn anonymize_with_report(
        &self,
        points: &[Point],
    ) -> Result<(Vec<Point>, OccupancyReport)> {
        let FilterConfig {
            resolution,
            release,
            min_occupancy,
            seed,
        } = self.config;

        let bbox = BBox::from_points(points)?;
        let grid = Grid::new(&bbox, resolution)?;
        debug!(
            "Anonymizing {} points in {:?} on a {resolution}×{resolution} grid",
            points.len(),
            bbox
        );

        let cells = count_cells(&grid, points);

        let mut releaser = Releaser::new(release, seed);
        debug!(
            "Releasing {} cells as {:?}",
            cells.len(),
            releaser.strategy()
        );
        let mut report = OccupancyReport::default();
        let mut released = Vec::with_capacity(points.len());
        for (cell, count) in cells {
            let suppressed = count < min_occupancy;
            report.add_cell(count, suppressed);
            if suppressed {
                warn!("Suppressing {count} points in cell {cell:?}");
                continue;
            }

            let representative = releaser.release(&grid.tile_box(cell));
            released.extend(std::iter::repeat(representative).take(count));
        }

        if report.singletons > 0 {
            info!(
                "{} of {} cells hold a single point",
                report.singletons, report.occupancy.number
            );
        }
        Ok((released, report))
    }
}

/// Anonymize with the deterministic [`ReleaseStrategy::Centroid`] and no suppression
pub fn anonymize(points: &[Point], resolution: usize) -> Result<Vec<Point>> {
    PrivacyFilter::new(FilterConfig {
        resolution,
        ..Default::default()
    })
    .anonymize(points)
}

/// Group the points by cell, only keeping their number
fn count_cells(grid: &Grid, points: &[Point]) -> BTreeMap<Cell, usize> {
    let mut cells = BTreeMap::new();
    for &point in points {
        *cells.entry(grid.lookup_point(point)).or_insert(0) += 1;
    }
    cells
}

#[cfg(test)]
mod test {
    use super::{anonymize, FilterConfig, PrivacyFilter};
    use crate::error::PrivacyError;
    use crate::geometry::{BBox, Grid, Point};
    use crate::release::ReleaseStrategy;
    use nalgebra::Vector2;

    /// Set of points "randomly" created by a human
    static POINTS: [Point; 8] = [
        Vector2::new(9.5526, 47.1175),
        Vector2::new(9.5531, 47.1181),
        Vector2::new(9.5532, 47.1182),
        Vector2::new(9.5560, 47.1212),
        Vector2::new(9.5563, 47.1213),
        Vector2::new(9.5540, 47.1190),
        Vector2::new(9.5540, 47.1190),
        Vector2::new(9.5563, 47.1175),
    ];

    #[test]
    fn scenario_three_points() {
        let points = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(9.0, 9.0),
        ];
        let released = anonymize(&points, 2).unwrap();
        assert_eq!(
            released,
            [
                Vector2::new(2.25, 2.25),
                Vector2::new(2.25, 2.25),
                Vector2::new(6.75, 6.75),
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(anonymize(&[], 20), Err(PrivacyError::EmptyInput));
        // Nothing to partition, so the resolution isn't checked
        assert_eq!(anonymize(&[], 0), Err(PrivacyError::EmptyInput));
    }

    #[test]
    fn invalid_input() {
        assert_eq!(
            anonymize(&POINTS, 0),
            Err(PrivacyError::InvalidResolution(0))
        );
        assert_eq!(
            anonymize(&POINTS, usize::MAX),
            Err(PrivacyError::InvalidResolution(usize::MAX))
        );
        assert_eq!(
            anonymize(&[Vector2::new(1.0, 1.0)], usize::MAX),
            Err(PrivacyError::InvalidResolution(usize::MAX))
        );
        let points = [Vector2::new(1.0, 1.0), Vector2::new(f64::INFINITY, 1.0)];
        assert!(matches!(
            anonymize(&points, 20),
            Err(PrivacyError::InvalidCoordinate { index: 1, .. })
        ));
    }

    #[test]
    fn cardinality_and_containment() {
        for release in [ReleaseStrategy::Centroid, ReleaseStrategy::UniformJitter] {
            for resolution in [1, 2, 3, 20, 100] {
                let filter = PrivacyFilter::new(FilterConfig {
                    resolution,
                    release,
                    ..Default::default()
                });
                let released = filter.anonymize(&POINTS).unwrap();
                assert_eq!(released.len(), POINTS.len());

                // Every raw point's cell receives exactly as many released points
                let bbox = BBox::from_points(&POINTS).unwrap();
                let grid = Grid::new(&bbox, resolution).unwrap();
                let mut raw_cells: Vec<_> = POINTS.iter().map(|&p| grid.lookup_point(p)).collect();
                raw_cells.sort();
                for (&cell, &point) in raw_cells.iter().zip(released.iter()) {
                    assert!(grid.tile_box(cell).contains(point));
                }
            }
        }
    }

    #[test]
    fn no_exact_leakage() {
        let released = anonymize(&POINTS, 20).unwrap();
        for point in &released {
            assert!(!POINTS.contains(point));
        }
    }

    #[test]
    fn deterministic() {
        let a = anonymize(&POINTS, 20).unwrap();
        let b = anonymize(&POINTS, 20).unwrap();
        assert_eq!(a, b);

        let filter = PrivacyFilter::new(FilterConfig {
            release: ReleaseStrategy::UniformJitter,
            seed: Some(3),
            ..Default::default()
        });
        assert_eq!(
            filter.anonymize(&POINTS).unwrap(),
            filter.anonymize(&POINTS).unwrap()
        );
    }

    #[test]
    fn single_and_identical_points() {
        let point = Vector2::new(13.4, 52.5);
        assert_eq!(anonymize(&[point], 20).unwrap(), [point]);
        assert_eq!(anonymize(&[point; 4], 20).unwrap(), [point; 4]);
    }

    #[test]
    fn degenerate_axis() {
        let points = [
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 4.0),
            Vector2::new(1.0, 10.0),
        ];
        let released = anonymize(&points, 5).unwrap();
        assert_eq!(
            released,
            [
                Vector2::new(1.0, 1.0),
                // 4.0 lies on an inner edge and belongs to the lower bin
                Vector2::new(1.0, 3.0),
                Vector2::new(1.0, 9.0),
            ]
        );
    }

    #[test]
    fn suppression() {
        let filter = PrivacyFilter::new(FilterConfig {
            resolution: 2,
            min_occupancy: 2,
            ..Default::default()
        });
        let points = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(9.0, 9.0),
        ];
        let (released, report) = filter.anonymize_with_report(&points).unwrap();
        assert_eq!(released, [Vector2::new(2.25, 2.25); 2]);
        assert_eq!(report.suppressed_cells, 1);
        assert_eq!(report.suppressed_points, 1);
        assert_eq!(report.singletons, 1);
        assert_eq!(report.released(), 2);
    }

    #[test]
    fn config_defaults() {
        let config: FilterConfig = serde_json::from_str(r#"{"resolution": 8}"#).unwrap();
        assert_eq!(
            config,
            FilterConfig {
                resolution: 8,
                ..Default::default()
            }
        );
        assert_eq!(FilterConfig::default().resolution, 20);
        assert_eq!(FilterConfig::default().release, ReleaseStrategy::Centroid);
    }
}
