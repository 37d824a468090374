use nalgebra::Point2;
use pawtrack_core::{aggregate_bounds, Bounds, EmptyContactError, FrameContourMap};
use serde::{Deserialize, Serialize};

/// One tracked paw contact: the merged per-frame contours plus the derived
/// aggregates that rendering and persistence collaborators read.
///
/// The core never mutates a contact after emitting it. Overlay editors may
/// rewrite `contours` externally; the pipeline does not re-validate edited
/// contacts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contact {
    /// Per-frame contour lists. Every present frame has a non-empty list.
    pub contours: FrameContourMap,
    /// Active frames, strictly ascending.
    pub frames: Vec<usize>,
    /// Union of every constituent contour's box across every active frame.
    pub bounds: Bounds,
    /// Midpoint of `bounds`; deliberately not pressure-weighted.
    pub centroid: Point2<f32>,
}

impl Contact {
    pub(crate) fn from_contours(contours: FrameContourMap) -> Result<Self, EmptyContactError> {
        let bounds = aggregate_bounds(&contours)?;
        let frames = contours.keys().copied().collect();
        Ok(Self {
            centroid: bounds.center(),
            frames,
            bounds,
            contours,
        })
    }

    /// Count of active frames.
    #[inline]
    pub fn duration(&self) -> usize {
        self.frames.len()
    }
}
