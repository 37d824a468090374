//! Core types and utilities for paw contact tracking.
//!
//! This crate is intentionally small and purely geometric. It knows nothing
//! about the tracking pipeline; it only provides the pressure-volume storage,
//! the contour type with its containment test, and the bounding-box math that
//! both the tracker and rendering collaborators consume.

mod bounds;
mod contour;
mod logger;
mod obox;
mod volume;

pub use bounds::{aggregate_bounds, frame_bounds, Bounds, EmptyContactError};
pub use contour::{contains_point, Contour, FrameContourMap};
pub use obox::{min_area_box, OrientedBox};
pub use volume::{PressureFrameView, PressureVolume, VolumeError};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
