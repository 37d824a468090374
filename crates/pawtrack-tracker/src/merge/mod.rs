//! Spatio-temporal merging of raw components into contacts.
//!
//! Raw components over-fragment: sensor noise, pressure dropouts and
//! near-simultaneous paws split one physical contact into several graph
//! components. The merger derives global distance/duration/surface
//! thresholds from the component population, scores every eligible ordered
//! pair, and greedily unions clusters from the highest-scoring pair down.

mod clustering;
mod scoring;
mod stats;

use log::debug;
use pawtrack_core::{EmptyContactError, FrameContourMap};

use crate::components::RawComponent;
use crate::contact::Contact;
use crate::params::TrackerParams;

use clustering::cluster;
use scoring::score_candidates;
use stats::{ComponentStats, MergeThresholds};

/// Merge raw components into the final contact list.
///
/// Empty input yields an empty list; a single component passes through
/// unchanged (no pairs exist to score). `params.match_distance` only
/// applies when the derived match distance is unavailable.
pub fn merge_components(
    mut components: Vec<RawComponent>,
    params: &TrackerParams,
) -> Result<Vec<Contact>, EmptyContactError> {
    if components.is_empty() {
        return Ok(Vec::new());
    }

    let stats = components
        .iter()
        .map(ComponentStats::compute)
        .collect::<Result<Vec<_>, _>>()?;
    let thresholds = MergeThresholds::derive(&stats, params.match_distance);
    debug!("merging {} components with {thresholds:?}", components.len());

    let edges = score_candidates(&stats, &thresholds);
    let clusters = cluster(edges, components.len());

    let mut contacts = Vec::with_capacity(clusters.len());
    for members in clusters {
        let mut combined = FrameContourMap::new();
        for member in members {
            // Concatenation, never deduplication: repeated frames keep
            // every member's contours side by side.
            for (frame, list) in std::mem::take(&mut components[member]) {
                combined.entry(frame).or_default().extend(list);
            }
        }
        contacts.push(Contact::from_contours(combined)?);
    }
    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn empty_input_yields_empty_output() {
        let contacts =
            merge_components(Vec::new(), &TrackerParams::default()).expect("merge");
        assert!(contacts.is_empty());
    }

    #[test]
    fn single_component_passes_through_unchanged() {
        let raw = component(0, 0, 4, &[0, 1, 2]);
        let contacts =
            merge_components(vec![raw.clone()], &TrackerParams::default()).expect("merge");

        assert_eq!(1, contacts.len());
        assert_eq!(raw, contacts[0].contours);
        assert_eq!(vec![0, 1, 2], contacts[0].frames);
    }

    #[test]
    fn mutually_distant_components_stay_separate() {
        // Pairwise centroid distances (40, 40, 80) all clear the derived
        // match distance (mean side = 4) by far more than one unit.
        let components = vec![
            component(0, 0, 4, &[0, 1, 2]),
            component(40, 0, 4, &[0, 1, 2]),
            component(80, 0, 4, &[0, 1, 2]),
        ];
        let contacts =
            merge_components(components, &TrackerParams::default()).expect("merge");
        assert_eq!(3, contacts.len());
    }

    #[test]
    fn full_overlap_ratio_merges_regardless_of_frame_threshold() {
        // duration(a) = 1, duration(b) = 50: frame_threshold = 12.75 dwarfs
        // the single overlapping frame, but ratio = 1/1 forces the merge.
        let a = component(0, 0, 4, &[10]);
        let b = component(2, 0, 4, &(0..50).collect::<Vec<_>>());

        let contacts =
            merge_components(vec![a, b], &TrackerParams::default()).expect("merge");
        assert_eq!(1, contacts.len());
        assert_eq!(50, contacts[0].duration());
        // Frame 10 carries both members' contours, concatenated.
        assert_eq!(2, contacts[0].contours[&10].len());
    }

    #[test]
    fn merge_never_increases_the_contact_count() {
        let components = vec![
            component(0, 0, 4, &[0, 1, 2, 3]),
            component(2, 0, 4, &[2, 3, 4, 5]),
            component(60, 0, 4, &[0, 1, 2]),
        ];
        let n = components.len();
        let contacts =
            merge_components(components, &TrackerParams::default()).expect("merge");
        assert!(contacts.len() <= n);
    }

    #[test]
    fn adjacent_fragments_bridge_a_dropout() {
        // Same plate location, 3 then 17 active frames with a 2-frame gap:
        // the short fragment is rescued by the zero-overlap gap predicate.
        let head = component(10, 10, 4, &[0, 1, 2]);
        let tail = component(10, 10, 4, &(5..22).collect::<Vec<_>>());

        let contacts =
            merge_components(vec![head, tail], &TrackerParams::default()).expect("merge");
        assert_eq!(1, contacts.len());
        assert_eq!(20, contacts[0].duration());
    }

    #[test]
    fn aggregate_box_spans_all_members() {
        let a = component(0, 0, 4, &[0, 1, 2, 3]);
        let b = component(3, 1, 4, &[1, 2, 3, 4]);

        let contacts =
            merge_components(vec![a, b], &TrackerParams::default()).expect("merge");
        assert_eq!(1, contacts.len());

        let bounds = contacts[0].bounds;
        assert_eq!(0.0, bounds.min_x);
        assert_eq!(7.0, bounds.max_x);
        assert_eq!(0.0, bounds.min_y);
        assert_eq!(5.0, bounds.max_y);
    }
}
