use pawtrack_core::{EmptyContactError, VolumeError};

/// Errors returned by the contact tracking pipeline.
#[derive(thiserror::Error, Debug)]
pub enum TrackError {
    #[error(transparent)]
    Volume(#[from] VolumeError),
    #[error(transparent)]
    EmptyContact(#[from] EmptyContactError),
}
