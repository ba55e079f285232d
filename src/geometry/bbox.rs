use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::lerp;
use crate::error::{PrivacyError, Result};

/// An axis aligned bounding box
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl BBox {
    /// Create an "empty" bounding box which contains no point
    ///
    /// After creating use [`fit`] at least once to get an actual bounding box.
    ///
    /// [`fit`]: BBox::fit
    #[inline]
    pub fn new() -> BBox {
        BBox {
            min: Vector2::new(f64::INFINITY, f64::INFINITY),
            max: Vector2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Compute the smallest box covering a batch of raw points
    ///
    /// Unlike [`FromIterator`] this validates its input:
    /// an empty batch or a single non-finite coordinate is an error
    /// instead of an "empty" or poisoned box.
    pub fn from_points<'p>(points: impl IntoIterator<Item = &'p Vector2<f64>>) -> Result<BBox> {
        let mut bbox = BBox::new();
        let mut count = 0;
        for (index, point) in points.into_iter().enumerate() {
            if !(point.x.is_finite() && point.y.is_finite()) {
                return Err(PrivacyError::InvalidCoordinate {
                    index,
                    x: point.x,
                    y: point.y,
                });
            }
            bbox.fit(*point);
            count += 1;
        }
        if count == 0 {
            return Err(PrivacyError::EmptyInput);
        }
        Ok(bbox)
    }

    /// Check if a point is contained inside the bounding box
    ///
    /// If the point lies exactly on the edge it is said to be contained.
    #[inline]
    pub fn contains(&self, point: Vector2<f64>) -> bool {
        self.min.x <= point.x
            && self.min.y <= point.y
            && point.x <= self.max.x
            && point.y <= self.max.y
    }

    /// Adjust the bounding box's size to fit a given point
    #[inline]
    pub fn fit(&mut self, point: Vector2<f64>) {
        use std::cmp::Ordering::{Greater, Less};
        if matches!(self.min.x.partial_cmp(&point.x), Some(Greater)) {
            self.min.x = point.x;
        }
        if matches!(self.min.y.partial_cmp(&point.y), Some(Greater)) {
            self.min.y = point.y;
        }
        if matches!(self.max.x.partial_cmp(&point.x), Some(Less)) {
            self.max.x = point.x;
        }
        if matches!(self.max.y.partial_cmp(&point.y), Some(Less)) {
            self.max.y = point.y;
        }
    }

    /// The box's center
    #[inline]
    pub fn center(&self) -> Vector2<f64> {
        Vector2::new(
            lerp(self.min.x, self.max.x, 0.5),
            lerp(self.min.y, self.max.y, 0.5),
        )
    }

    /// The box's width and height
    #[inline]
    pub fn size(&self) -> Vector2<f64> {
        self.max - self.min
    }
}

impl Default for BBox {
    fn default() -> Self {
        BBox::new()
    }
}

impl FromIterator<Vector2<f64>> for BBox {
    fn from_iter<T: IntoIterator<Item = Vector2<f64>>>(iter: T) -> Self {
        let mut bbox = BBox::new();
        for v in iter {
            bbox.fit(v);
        }
        bbox
    }
}
