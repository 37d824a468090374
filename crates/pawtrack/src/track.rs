//! End-to-end tracking helpers.

use pawtrack_core::PressureVolume;
use pawtrack_tracker::{Contact, ContactTracker, TrackError, TrackerParams};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Run the whole pipeline on a recording with explicit parameters.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(volume, params), fields(frames = volume.frame_count()))
)]
pub fn track_contacts(
    volume: &PressureVolume,
    params: &TrackerParams,
) -> Result<Vec<Contact>, TrackError> {
    ContactTracker::new(params.clone()).track(volume)
}

/// Convenience overload using `TrackerParams::default()`.
pub fn track_contacts_default(volume: &PressureVolume) -> Result<Vec<Contact>, TrackError> {
    track_contacts(volume, &TrackerParams::default())
}

/// Build a volume from stacked frame planes and track it in one call.
///
/// `samples` holds `frames` planes of `rows * cols` row-major values each.
pub fn track_contacts_from_frames(
    rows: usize,
    cols: usize,
    frames: usize,
    samples: &[f32],
    params: &TrackerParams,
) -> Result<Vec<Contact>, TrackError> {
    let volume = PressureVolume::new(rows, cols, frames, samples.to_vec())?;
    track_contacts(&volume, params)
}
