//! Frame-to-frame contour adjacency.
//!
//! Contacts cannot skip a frame, so each contour in frame `f` is compared
//! only against the contours of frame `f - 1`. A cheap first-point x-offset
//! pre-filter rejects most pairs before the polygon containment test runs.

use std::collections::{BTreeMap, BTreeSet};

use pawtrack_core::{contains_point, Contour, FrameContourMap};
use serde::{Deserialize, Serialize};

/// Identity of one contour in the recording: frame index plus position in
/// that frame's contour list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContourId {
    pub frame: usize,
    pub index: usize,
}

impl ContourId {
    pub fn new(frame: usize, index: usize) -> Self {
        Self { frame, index }
    }
}

/// Undirected adjacency over contours in consecutive frames.
///
/// Symmetric by construction: inserting an edge records both directions.
/// Every extracted contour is registered as a node, so isolated contours
/// still surface as their own components later.
#[derive(Clone, Debug, Default)]
pub struct ContactGraph {
    adjacency: BTreeMap<ContourId, BTreeSet<ContourId>>,
}

impl ContactGraph {
    pub fn add_node(&mut self, id: ContourId) {
        self.adjacency.entry(id).or_default();
    }

    pub fn add_edge(&mut self, a: ContourId, b: ContourId) {
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    /// Nodes in ascending (frame, index) order.
    pub fn nodes(&self) -> impl Iterator<Item = ContourId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn neighbors(&self, id: ContourId) -> impl Iterator<Item = ContourId> + '_ {
        self.adjacency.get(&id).into_iter().flatten().copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// Link every contour to the spatially overlapping contours of the
/// previous frame.
pub fn build_adjacency(contours: &FrameContourMap, match_distance: f32) -> ContactGraph {
    let mut graph = ContactGraph::default();
    for (&frame, list) in contours {
        for index in 0..list.len() {
            graph.add_node(ContourId::new(frame, index));
        }
    }

    let horizon = 2.0 * match_distance;
    for (&frame, list) in contours {
        let Some(prev_list) = frame
            .checked_sub(1)
            .and_then(|prev| contours.get(&prev))
        else {
            continue;
        };

        for (i, contour) in list.iter().enumerate() {
            for (j, prev) in prev_list.iter().enumerate() {
                if !within_horizon(contour, prev, horizon) {
                    continue;
                }
                if touches(contour, prev) {
                    graph.add_edge(ContourId::new(frame, i), ContourId::new(frame - 1, j));
                }
            }
        }
    }
    graph
}

/// First-point horizontal pre-filter.
///
/// Deliberately approximate: only the two first boundary points are
/// compared, so the filter can reject genuine matches and admit spurious
/// ones. Admitted pairs are settled by the polygon test.
fn within_horizon(a: &Contour, b: &Contour, horizon: f32) -> bool {
    match (a.first_point(), b.first_point()) {
        (Some(p), Some(q)) => ((p.x - q.x).abs() as f32) <= horizon,
        _ => false,
    }
}

/// True when any vertex of the shorter contour lies inside or on the border
/// of the longer one. Stops at the first matching vertex.
fn touches(a: &Contour, b: &Contour) -> bool {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    short
        .points
        .iter()
        .any(|&p| contains_point(&long.points, p))
}
