//! Greedy leader clustering driven by the scored edge queue.

use std::collections::BinaryHeap;

use super::scoring::MergeEdge;

/// Union components greedily from the highest-weight edge down.
///
/// Every component starts as its own leader. Popping edge (i, j) merges
/// j's cluster into i's when their leaders differ and i has not already
/// sourced a successful merge; i is then spent as a source. The loop ends
/// when the queue drains or every component has sourced a merge.
///
/// Returns the surviving clusters ordered by smallest member index, each
/// with its members ascending.
pub(crate) fn cluster(mut edges: BinaryHeap<MergeEdge>, count: usize) -> Vec<Vec<usize>> {
    let mut leader: Vec<usize> = (0..count).collect();
    let mut members: Vec<Vec<usize>> = (0..count).map(|i| vec![i]).collect();
    let mut spent = vec![false; count];
    let mut spent_count = 0;

    while let Some(edge) = edges.pop() {
        if spent_count == count {
            break;
        }
        let (li, lj) = (leader[edge.source], leader[edge.target]);
        if li == lj || spent[edge.source] {
            continue;
        }

        let moved = std::mem::take(&mut members[lj]);
        for &m in &moved {
            leader[m] = li;
        }
        members[li].extend(moved);
        spent[edge.source] = true;
        spent_count += 1;
    }

    let mut clusters: Vec<Vec<usize>> = members.into_iter().filter(|m| !m.is_empty()).collect();
    for members in &mut clusters {
        members.sort_unstable();
    }
    clusters.sort_by_key(|members| members[0]);
    clusters
}
