//! Graph-based paw contact tracker built on top of `pawtrack-core`.
//!
//! ## Quickstart
//!
//! ```
//! use pawtrack_core::PressureVolume;
//! use pawtrack_tracker::{ContactTracker, TrackerParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let volume = PressureVolume::new(4, 4, 2, vec![0.0; 32])?;
//! let tracker = ContactTracker::new(TrackerParams::default());
//! let contacts = tracker.track(&volume)?;
//! println!("contacts: {}", contacts.len());
//! # Ok(())
//! # }
//! ```
//!
//! Pipeline:
//! 1. Binarize each frame and trace the outer border of every region.
//! 2. Link each contour to the spatially overlapping contours of the
//!    previous frame (contacts cannot skip a frame).
//! 3. BFS the adjacency graph into raw connected components.
//! 4. Derive distance/duration/surface thresholds from the component
//!    population, score candidate pairs, and greedily merge clusters from
//!    the highest-scoring pair down.
//! 5. Emit one contact per surviving cluster with its aggregate box and
//!    centroid.

mod adjacency;
mod components;
mod contact;
mod error;
mod extract;
mod merge;
mod params;

pub use adjacency::{build_adjacency, ContactGraph, ContourId};
pub use components::{connected_components, RawComponent};
pub use contact::Contact;
pub use error::TrackError;
pub use extract::{extract_frame_contours, extract_volume_contours};
pub use merge::merge_components;
pub use params::TrackerParams;

use pawtrack_core::PressureVolume;

/// Whole-recording tracker: owns the configuration and runs the pipeline.
pub struct ContactTracker {
    params: TrackerParams,
}

impl ContactTracker {
    pub fn new(params: TrackerParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &TrackerParams {
        &self.params
    }

    /// Track every discrete paw contact in the recording.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "info",
            skip(self, volume),
            fields(frames = volume.frame_count())
        )
    )]
    pub fn track(&self, volume: &PressureVolume) -> Result<Vec<Contact>, TrackError> {
        let contours = extract_volume_contours(volume, &self.params);
        let graph = build_adjacency(&contours, self.params.match_distance);
        let components = connected_components(&graph, &contours);
        Ok(merge_components(components, &self.params)?)
    }
}
