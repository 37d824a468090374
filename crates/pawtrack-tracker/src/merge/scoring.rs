//! Candidate pair scoring and the merge priority queue.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::stats::{ComponentStats, MergeThresholds};

/// Frames of slack added on each side of a component's range when scoring
/// windowed proximity.
const FRAME_WINDOW: i64 = 5;

/// Frame gap (exclusive) under which zero-overlap short components may
/// still merge.
const GAP_LIMIT: usize = 5;

/// One scored merge candidate, directed source -> target.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MergeEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
    /// Insertion index. Equal weights resolve to the earliest edge so the
    /// clustering outcome is reproducible across runs and platforms.
    pub seq: usize,
}

impl PartialEq for MergeEdge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MergeEdge {}

impl PartialOrd for MergeEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MergeEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Score every ordered component pair into a max-priority queue.
///
/// (i, j) and (j, i) are evaluated independently: the predicates read the
/// source component's own duration and surface, so eligibility is not
/// symmetric.
pub(crate) fn score_candidates(
    stats: &[ComponentStats],
    thresholds: &MergeThresholds,
) -> BinaryHeap<MergeEdge> {
    let mut heap = BinaryHeap::new();
    let mut seq = 0;
    for i in 0..stats.len() {
        for j in 0..stats.len() {
            if i == j {
                continue;
            }
            if let Some(weight) = score_pair(&stats[i], &stats[j], thresholds) {
                heap.push(MergeEdge {
                    source: i,
                    target: j,
                    weight,
                    seq,
                });
                seq += 1;
            }
        }
    }
    heap
}

/// Evaluate the merge predicates for source `a` against target `b`. The
/// first predicate that holds decides; later ones are not consulted.
fn score_pair(a: &ComponentStats, b: &ComponentStats, th: &MergeThresholds) -> Option<f64> {
    let distance = nalgebra::distance(&a.centroid, &b.centroid);
    if distance > th.match_distance {
        return None;
    }

    let overlap = a.overlap(b);
    let ratio = overlap as f32 / a.duration as f32;
    let is_short = (a.duration as f32) <= th.frame_threshold;

    if overlap as f32 >= th.frame_threshold {
        return Some(f64::from((th.match_distance - distance) * overlap as f32));
    }

    let eligible = (is_short && overlap > 0)
        || ratio >= 0.5
        || (ratio >= 0.2 && a.surface < th.average_surface)
        || (overlap == 0 && is_short && a.min_frame_gap(b) < GAP_LIMIT);

    eligible.then(|| windowed_proximity(a, b, th.match_distance))
}

/// Windowed-proximity affinity for deferred weights.
///
/// Walks `a`'s frame range padded by [`FRAME_WINDOW`] on each side; every
/// padded frame where `b` is active contributes the clamped distance margin
/// between `a`'s centroid and `b`'s centroid at that frame. Padded frames
/// outside the recording simply never appear in `b`'s set. The divisor is
/// the padded range length, at least 1 by construction.
fn windowed_proximity(a: &ComponentStats, b: &ComponentStats, match_distance: f32) -> f64 {
    let start = a.first_frame as i64 - FRAME_WINDOW;
    let end = a.last_frame as i64 + FRAME_WINDOW;

    let mut sum = 0.0f64;
    for frame in start..=end {
        let Ok(frame) = usize::try_from(frame) else {
            continue;
        };
        let Some(center) = b.frame_centroids.get(&frame) else {
            continue;
        };
        let d = nalgebra::distance(&a.centroid, center);
        sum += f64::from((match_distance - d).max(0.0));
    }
    sum / (end - start + 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::RawComponent;
    use approx::assert_relative_eq;
    use nalgebra::Point2 as P;
    use pawtrack_core::Contour;

    fn component(x0: i32, y0: i32, side: i32, frames: &[usize]) -> RawComponent {
        let contour = Contour::new(vec![
            P::new(x0, y0),
            P::new(x0 + side, y0),
            P::new(x0 + side, y0 + side),
            P::new(x0, y0 + side),
        ]);
        frames.iter().map(|&f| (f, vec![contour.clone()])).collect()
    }

    fn stats(x0: i32, y0: i32, side: i32, frames: &[usize]) -> ComponentStats {
        ComponentStats::compute(&component(x0, y0, side, frames)).expect("stats")
    }

    #[test]
    fn distant_pairs_produce_no_edge() {
        let a = stats(0, 0, 4, &[0, 1, 2]);
        let b = stats(50, 0, 4, &[0, 1, 2]);
        let th = MergeThresholds {
            frame_threshold: 1.5,
            match_distance: 10.0,
            average_surface: 10.0,
        };
        assert!(score_pair(&a, &b, &th).is_none());
    }

    #[test]
    fn strong_overlap_uses_the_direct_weight() {
        let a = stats(0, 0, 4, &[0, 1, 2, 3]);
        let b = stats(4, 0, 4, &[0, 1, 2, 3]);
        let th = MergeThresholds {
            frame_threshold: 2.0,
            match_distance: 10.0,
            average_surface: 100.0,
        };

        // centroids 4 apart, overlap 4: weight = (10 - 4) * 4
        let weight = score_pair(&a, &b, &th).expect("edge");
        assert_relative_eq!(weight, 24.0, epsilon = 1e-4);
    }

    #[test]
    fn full_ratio_merges_a_brief_component_into_a_long_one() {
        let a = stats(0, 0, 4, &[10]);
        let b = stats(2, 0, 4, &(0..50).collect::<Vec<_>>());
        let th = MergeThresholds {
            frame_threshold: 12.75, // overlap 1 stays below it
            match_distance: 10.0,
            average_surface: 1.0,
        };

        // The one-frame component overlaps its whole duration, so the pair
        // is eligible with a deferred weight.
        let weight = score_pair(&a, &b, &th).expect("edge");
        assert!(weight > 0.0);
    }

    #[test]
    fn zero_overlap_merges_only_across_small_gaps() {
        let th = MergeThresholds {
            frame_threshold: 10.0,
            match_distance: 10.0,
            average_surface: 1.0,
        };

        let short = stats(0, 0, 4, &[0, 1, 2]);
        let near = stats(2, 0, 4, &[5, 6, 7]);
        assert!(score_pair(&short, &near, &th).is_some());

        let far = stats(2, 0, 4, &[20, 21]);
        assert!(score_pair(&short, &far, &th).is_none());
    }

    #[test]
    fn windowed_proximity_averages_over_the_padded_range() {
        let a = stats(0, 0, 4, &[10]);
        let b = stats(0, 0, 4, &[10, 11, 12]);

        // Padded range 5..=15 has length 11; b is active on 3 of those
        // frames at distance 0, each contributing the full margin.
        let score = windowed_proximity(&a, &b, 10.0);
        assert_relative_eq!(score, 30.0 / 11.0, epsilon = 1e-6);
    }

    #[test]
    fn edge_ordering_prefers_weight_then_insertion() {
        let mut heap = BinaryHeap::new();
        heap.push(MergeEdge {
            source: 0,
            target: 1,
            weight: 1.0,
            seq: 0,
        });
        heap.push(MergeEdge {
            source: 2,
            target: 3,
            weight: 2.0,
            seq: 1,
        });
        heap.push(MergeEdge {
            source: 4,
            target: 5,
            weight: 2.0,
            seq: 2,
        });

        assert_eq!(2, heap.pop().expect("edge").source); // higher weight, earlier seq
        assert_eq!(4, heap.pop().expect("edge").source);
        assert_eq!(0, heap.pop().expect("edge").source);
    }
}
