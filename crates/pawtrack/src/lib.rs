//! High-level facade crate for the `pawtrack-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the core and tracker crates
//! - end-to-end helpers that run the whole pipeline on a pressure recording.
//!
//! ## Quickstart
//!
//! ```
//! use pawtrack::{track, PressureVolume, TrackerParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let volume = PressureVolume::new(8, 8, 3, vec![0.0; 192])?;
//! let contacts = track::track_contacts(&volume, &TrackerParams::default())?;
//! println!("contacts: {}", contacts.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `pawtrack::core`: pressure volumes, contours, boxes and bounds.
//! - `pawtrack::tracker`: extraction, adjacency, components, merging.
//! - `pawtrack::track`: end-to-end helpers from a recording to contacts.

pub use pawtrack_core as core;
pub use pawtrack_tracker as tracker;

pub use pawtrack_core::{Bounds, Contour, FrameContourMap, PressureVolume, VolumeError};
pub use pawtrack_tracker::{Contact, ContactTracker, TrackError, TrackerParams};

pub mod track;
