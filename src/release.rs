//! Choose the coordinate released in place of a cell's occupants
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::geometry::{lerp, BBox, Point};

#[derive(Serialize, Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binary", derive(clap::ValueEnum))]
pub enum ReleaseStrategy {
    /// The cell's center, deterministic
    #[default]
    Centroid,

    /// A point drawn uniformly at random from the cell's box
    UniformJitter,
}

/// Produces one representative per cell for a single request
pub struct Releaser {
    strategy: ReleaseStrategy,
    rng: Option<SmallRng>,
}

impl Releaser {
    /// Create a releaser
    ///
    /// The random generator is only created for [`ReleaseStrategy::UniformJitter`].
    /// It is seeded with `seed` if given and from the OS' entropy otherwise.
    pub fn new(strategy: ReleaseStrategy, seed: Option<u64>) -> Self {
        let rng = match strategy {
            ReleaseStrategy::Centroid => None,
            ReleaseStrategy::UniformJitter => Some(match seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_entropy(),
            }),
        };
        Releaser { strategy, rng }
    }

    pub fn strategy(&self) -> ReleaseStrategy {
        self.strategy
    }

    /// Pick the point to release for a cell's box
    ///
    /// The result always lies inside `tile`.
    pub fn release(&mut self, tile: &BBox) -> Point {
        match self.rng.as_mut() {
            None => tile.center(),
            Some(rng) => {
                let x = lerp(tile.min.x, tile.max.x, rng.gen::<f64>());
                let y = lerp(tile.min.y, tile.max.y, rng.gen::<f64>());
                Point::new(
                    x.clamp(tile.min.x, tile.max.x),
                    y.clamp(tile.min.y, tile.max.y),
                )
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{ReleaseStrategy, Releaser};
    use crate::geometry::BBox;
    use nalgebra::Vector2;

    static TILE: BBox = BBox {
        min: Vector2::new(-1.0, 2.0),
        max: Vector2::new(3.0, 2.5),
    };

    #[test]
    fn centroid_is_center() {
        let mut releaser = Releaser::new(ReleaseStrategy::Centroid, Some(7));
        assert_eq!(releaser.release(&TILE), Vector2::new(1.0, 2.25));
        assert_eq!(releaser.release(&TILE), Vector2::new(1.0, 2.25));
    }

    #[test]
    fn jitter_stays_in_tile() {
        let mut releaser = Releaser::new(ReleaseStrategy::UniformJitter, None);
        for _ in 0..1000 {
            assert!(TILE.contains(releaser.release(&TILE)));
        }
    }

    #[test]
    fn jitter_seeded_is_reproducible() {
        let mut a = Releaser::new(ReleaseStrategy::UniformJitter, Some(42));
        let mut b = Releaser::new(ReleaseStrategy::UniformJitter, Some(42));
        for _ in 0..100 {
            assert_eq!(a.release(&TILE), b.release(&TILE));
        }
    }

    #[test]
    fn jitter_degenerate_tile() {
        let tile = BBox {
            min: Vector2::new(5.0, 0.0),
            max: Vector2::new(5.0, 1.0),
        };
        let mut releaser = Releaser::new(ReleaseStrategy::UniformJitter, Some(1));
        for _ in 0..100 {
            let point = releaser.release(&tile);
            assert_eq!(point.x, 5.0);
            assert!(tile.contains(point));
        }
    }

    #[test]
    fn strategy_names() {
        assert_eq!(
            serde_json::from_str::<ReleaseStrategy>("\"uniform_jitter\"").unwrap(),
            ReleaseStrategy::UniformJitter
        );
        assert_eq!(
            serde_json::to_string(&ReleaseStrategy::Centroid).unwrap(),
            "\"centroid\""
        );
    }
}
