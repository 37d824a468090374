use nalgebra::{Point2, Vector2};

use crate::bounds::Bounds;

/// Minimum-area rectangle fitted to a contour's point set.
///
/// The plate's long axis runs along y, so the fitted dimensions are
/// orientation-normalized: when the raw rotation angle lies within
/// [-45, 45] degrees the extent along the rectangle's first axis is the
/// `width`, otherwise the two extents swap roles.
#[derive(Clone, Copy, Debug)]
pub struct OrientedBox {
    pub center: Point2<f32>,
    pub width: f32,
    pub length: f32,
    /// Raw rotation of the fitted rectangle, degrees in (-90, 90].
    pub angle_deg: f32,
}

impl OrientedBox {
    /// Axis-aligned bounds derived from the normalized half extents.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min_x: self.center.x - self.width / 2.0,
            max_x: self.center.x + self.width / 2.0,
            min_y: self.center.y - self.length / 2.0,
            max_y: self.center.y + self.length / 2.0,
        }
    }
}

/// Fit the minimum-area enclosing rectangle of an integer point set.
///
/// Degenerate inputs stay well-defined: a single point (or empty set) yields
/// a zero-extent box and a collinear set yields a zero-width one.
pub fn min_area_box(points: &[Point2<i32>]) -> OrientedBox {
    let hull = convex_hull(points);

    match hull.len() {
        0 => normalized(Point2::origin(), 0.0, 0.0, 0.0),
        1 => normalized(to_f32(hull[0]), 0.0, 0.0, 0.0),
        2 => {
            let a = to_f32(hull[0]);
            let b = to_f32(hull[1]);
            let d = b - a;
            let angle = d.y.atan2(d.x).to_degrees();
            normalized(nalgebra::center(&a, &b), d.norm(), 0.0, angle)
        }
        _ => calipers(&hull),
    }
}

fn calipers(hull: &[Point2<i32>]) -> OrientedBox {
    let mut best: Option<(f32, Point2<f32>, f32, f32, f32)> = None;

    for i in 0..hull.len() {
        let a = to_f32(hull[i]);
        let b = to_f32(hull[(i + 1) % hull.len()]);
        let edge = b - a;
        let len = edge.norm();
        if len == 0.0 {
            continue;
        }
        let u = edge / len;
        let v = Vector2::new(-u.y, u.x);

        let mut s_min = f32::INFINITY;
        let mut s_max = f32::NEG_INFINITY;
        let mut t_min = f32::INFINITY;
        let mut t_max = f32::NEG_INFINITY;
        for &p in hull {
            let d = to_f32(p) - a;
            let s = u.dot(&d);
            let t = v.dot(&d);
            s_min = s_min.min(s);
            s_max = s_max.max(s);
            t_min = t_min.min(t);
            t_max = t_max.max(t);
        }

        let du = s_max - s_min;
        let dv = t_max - t_min;
        let area = du * dv;
        if best.is_none_or(|(best_area, ..)| area < best_area) {
            let center = a + u * ((s_min + s_max) / 2.0) + v * ((t_min + t_max) / 2.0);
            let angle = u.y.atan2(u.x).to_degrees();
            best = Some((area, center, du, dv, angle));
        }
    }

    // Hulls of 3+ points always have at least one non-zero edge.
    let (_, center, du, dv, angle) = best.unwrap_or((0.0, Point2::origin(), 0.0, 0.0, 0.0));
    normalized(center, du, dv, angle)
}

/// Fold the raw angle into (-90, 90] and apply the ±45° width/length swap.
fn normalized(center: Point2<f32>, first: f32, second: f32, angle_deg: f32) -> OrientedBox {
    let mut angle = angle_deg;
    while angle > 90.0 {
        angle -= 180.0;
    }
    while angle <= -90.0 {
        angle += 180.0;
    }

    let (width, length) = if (-45.0..=45.0).contains(&angle) {
        (first, second)
    } else {
        (second, first)
    };

    OrientedBox {
        center,
        width,
        length,
        angle_deg: angle,
    }
}

fn to_f32(p: Point2<i32>) -> Point2<f32> {
    Point2::new(p.x as f32, p.y as f32)
}

fn cross(o: Point2<i32>, a: Point2<i32>, b: Point2<i32>) -> i64 {
    i64::from(a.x - o.x) * i64::from(b.y - o.y) - i64::from(a.y - o.y) * i64::from(b.x - o.x)
}

/// Andrew monotone chain. Collinear interior points are dropped, so fully
/// collinear inputs reduce to their two endpoints.
fn convex_hull(points: &[Point2<i32>]) -> Vec<Point2<i32>> {
    let mut pts: Vec<Point2<i32>> = points.to_vec();
    pts.sort_unstable_by_key(|p| (p.x, p.y));
    pts.dedup();
    if pts.len() <= 2 {
        return pts;
    }

    let mut lower: Vec<Point2<i32>> = Vec::new();
    for &p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point2<i32>> = Vec::new();
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0 {
            upper.pop();
        }
        upper.push(p);
    }

    // Each chain ends on the other chain's starting point.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
