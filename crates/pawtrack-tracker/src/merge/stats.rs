//! Per-component measurements and the derived global thresholds.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use nalgebra::Point2;
use pawtrack_core::{aggregate_bounds, frame_bounds, Bounds, EmptyContactError};

use crate::components::RawComponent;

/// Aggregate measurements for one raw component.
#[derive(Clone, Debug)]
pub(crate) struct ComponentStats {
    pub bounds: Bounds,
    pub centroid: Point2<f32>,
    /// Active frames, ascending.
    pub frames: Vec<usize>,
    pub first_frame: usize,
    pub last_frame: usize,
    pub duration: usize,
    pub surface: f32,
    /// Midpoint of the per-frame union of contour boxes.
    pub frame_centroids: BTreeMap<usize, Point2<f32>>,
}

impl ComponentStats {
    pub fn compute(component: &RawComponent) -> Result<Self, EmptyContactError> {
        let bounds = aggregate_bounds(component)?;
        let frames: Vec<usize> = component.keys().copied().collect();
        let first_frame = frames[0]; // non-empty: aggregation succeeded
        let last_frame = frames[frames.len() - 1];
        let frame_centroids = component
            .iter()
            .filter_map(|(&frame, list)| frame_bounds(list).map(|b| (frame, b.center())))
            .collect();

        Ok(Self {
            centroid: bounds.center(),
            duration: frames.len(),
            surface: bounds.surface(),
            bounds,
            frames,
            first_frame,
            last_frame,
            frame_centroids,
        })
    }

    /// Number of frames active in both components.
    pub fn overlap(&self, other: &Self) -> usize {
        let (mut i, mut j, mut count) = (0, 0, 0);
        while i < self.frames.len() && j < other.frames.len() {
            match self.frames[i].cmp(&other.frames[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    count += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        count
    }

    /// Smallest index difference between the two active-frame sets.
    pub fn min_frame_gap(&self, other: &Self) -> usize {
        let (mut i, mut j) = (0, 0);
        let mut best = usize::MAX;
        while i < self.frames.len() && j < other.frames.len() {
            let a = self.frames[i];
            let b = other.frames[j];
            best = best.min(a.abs_diff(b));
            if a < b {
                i += 1;
            } else {
                j += 1;
            }
        }
        best
    }
}

/// Global thresholds derived from the whole component population.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MergeThresholds {
    /// Half the mean component duration.
    pub frame_threshold: f32,
    /// Mean of the pooled aggregate-box sides above 2 px; falls back to the
    /// configured distance when no side qualifies.
    pub match_distance: f32,
    /// Quarter of the mean component surface.
    pub average_surface: f32,
}

impl MergeThresholds {
    pub fn derive(stats: &[ComponentStats], fallback_distance: f32) -> Self {
        let n = stats.len() as f32;
        let frame_threshold = stats.iter().map(|s| s.duration as f32).sum::<f32>() / n * 0.5;

        let sides: Vec<f32> = stats
            .iter()
            .flat_map(|s| [s.bounds.width(), s.bounds.height()])
            .filter(|&side| side > 2.0)
            .collect();
        let match_distance = if sides.is_empty() {
            fallback_distance
        } else {
            sides.iter().sum::<f32>() / sides.len() as f32
        };

        let average_surface = stats.iter().map(|s| s.surface).sum::<f32>() / n * 0.25;

        Self {
            frame_threshold,
            match_distance,
            average_surface,
        }
    }
}
