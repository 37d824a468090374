use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::contour::{Contour, FrameContourMap};
use crate::obox::min_area_box;

/// A zero-frame component was presented for aggregation. The component
/// search and the merger never emit empty components, so hitting this is an
/// internal invariant violation rather than a recoverable condition.
#[derive(Debug, Error)]
#[error("cannot aggregate a contact with zero frames")]
pub struct EmptyContactError;

/// Axis-aligned bounding box in sensor coordinates. Zero extents are valid
/// (a single-pixel contour collapses to a point).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    /// Component-wise min of minima, max of maxima.
    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Point2<f32> {
        Point2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Covered plate area, width x height.
    #[inline]
    pub fn surface(&self) -> f32 {
        self.width() * self.height()
    }
}

/// Union of the oriented-box bounds of every contour in one frame's list.
/// `None` for an empty list.
pub fn frame_bounds(contours: &[Contour]) -> Option<Bounds> {
    contours
        .iter()
        .map(|c| min_area_box(&c.points).bounds())
        .reduce(Bounds::union)
}

/// Aggregate box of a whole component or contact: the union of every
/// constituent contour's box across every active frame.
pub fn aggregate_bounds(contours: &FrameContourMap) -> Result<Bounds, EmptyContactError> {
    contours
        .values()
        .filter_map(|list| frame_bounds(list))
        .reduce(Bounds::union)
        .ok_or(EmptyContactError)
}
