//! Connected components of the adjacency graph.

use std::collections::{BTreeSet, VecDeque};

use pawtrack_core::FrameContourMap;

use crate::adjacency::{ContactGraph, ContourId};

/// One connected component of the contour graph: a provisional, possibly
/// fragmented contact candidate.
pub type RawComponent = FrameContourMap;

/// Partition the graph into raw components via breadth-first traversal.
///
/// Membership is a pure function of connectivity: traversal order can only
/// affect the order of the returned list, never which nodes group together.
/// Seeds iterate in ascending (frame, index) order, so the list order is
/// deterministic as well.
pub fn connected_components(graph: &ContactGraph, contours: &FrameContourMap) -> Vec<RawComponent> {
    let mut visited: BTreeSet<ContourId> = BTreeSet::new();
    let mut components = Vec::new();

    for seed in graph.nodes() {
        if visited.contains(&seed) {
            continue;
        }

        let mut component = RawComponent::new();
        let mut queue = VecDeque::from([seed]);
        while let Some(node) = queue.pop_front() {
            if !visited.insert(node) {
                continue;
            }

            let contour = contours[&node.frame][node.index].clone();
            component.entry(node.frame).or_default().push(contour);

            for next in graph.neighbors(node) {
                if !visited.contains(&next) {
                    queue.push_back(next);
                }
            }
        }

        components.push(component);
    }

    components
}
