use serde::{Deserialize, Serialize};

/// Configuration for the contact tracker.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackerParams {
    /// Binarization threshold for contour extraction. Samples strictly above
    /// this value are foreground.
    pub pressure_threshold: f32,

    /// Spatial match distance in sensor pixels.
    ///
    /// The frame-adjacency pre-filter rejects contour pairs whose first
    /// points differ by more than twice this value in x. During merging the
    /// value only serves as a fallback: the merger derives its own match
    /// distance from the mean component side length and deliberately
    /// overrides this setting whenever that derivation is possible.
    pub match_distance: f32,

    /// Binary dilation iterations applied to the mask before boundary
    /// extraction. Zero in the automatic pipeline; the manual-correction
    /// workflow uses small positive counts to close pressure dropouts.
    pub dilation_iterations: usize,

    /// Binary erosion iterations applied after dilation. Manual-correction
    /// only, like `dilation_iterations`.
    pub erosion_iterations: usize,
}

impl Default for TrackerParams {
    fn default() -> Self {
        Self {
            pressure_threshold: 0.0,
            match_distance: 15.0,
            dilation_iterations: 0,
            erosion_iterations: 0,
        }
    }
}
