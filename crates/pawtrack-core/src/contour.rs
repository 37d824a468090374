use std::collections::BTreeMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Ordered outer boundary of one connected above-threshold region in a
/// single frame. Coordinates are integer (x, y) = (column, row) pixel
/// indices. A region of exactly one pixel is a length-1 contour. Contours
/// never describe holes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<Point2<i32>>,
}

/// Contours keyed by frame index. Sparse: frames with no activity are
/// absent, never present with an empty list.
pub type FrameContourMap = BTreeMap<usize, Vec<Contour>>;

impl Contour {
    pub fn new(points: Vec<Point2<i32>>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn first_point(&self) -> Option<Point2<i32>> {
        self.points.first().copied()
    }
}

/// True if `p` lies inside or on the border of `polygon`.
///
/// Degenerate polygons are valid input: a single vertex matches only itself
/// and two vertices match any point on the segment between them.
pub fn contains_point(polygon: &[Point2<i32>], p: Point2<i32>) -> bool {
    match polygon {
        [] => false,
        [v] => *v == p,
        [a, b] => on_segment(*a, *b, p),
        _ => {
            let n = polygon.len();
            for i in 0..n {
                if on_segment(polygon[i], polygon[(i + 1) % n], p) {
                    return true;
                }
            }

            // Even-odd ray cast toward +x. The boundary pass above already
            // settled every on-edge point, so strict comparisons suffice.
            let mut inside = false;
            let mut j = n - 1;
            for i in 0..n {
                let a = polygon[i];
                let b = polygon[j];
                if (a.y > p.y) != (b.y > p.y) {
                    let t = f64::from(p.y - a.y) / f64::from(b.y - a.y);
                    let x = f64::from(a.x) + t * f64::from(b.x - a.x);
                    if f64::from(p.x) < x {
                        inside = !inside;
                    }
                }
                j = i;
            }
            inside
        }
    }
}

fn on_segment(a: Point2<i32>, b: Point2<i32>, p: Point2<i32>) -> bool {
    let cross = i64::from(b.x - a.x) * i64::from(p.y - a.y)
        - i64::from(b.y - a.y) * i64::from(p.x - a.x);
    cross == 0
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}
