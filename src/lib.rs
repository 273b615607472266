//! # Grid Survey Planner
//!
//! Flight planning for photogrammetry survey missions over a rectangular
//! area. A mission is one or two serpentine (boustrophedon) passes whose
//! sample pitch is derived from the camera footprint and the requested image
//! overlap, converted into oriented flight steps.
//!
//! ## Features
//! - Pinhole footprint and overlap-driven sampling pitches
//! - Shared serpentine scan for both grid orientations
//! - Tolerant boundary inclusion so edge lines are never dropped
//! - Look-ahead orientation with configurable camera tilt
//! - `no_std` compatible (requires `alloc`)
//!
//! ## Safety Guarantees
//! - Inputs are validated before scanning; invalid overlaps cannot hang
//! - Waypoint count is bounded by configuration before allocation
//! - Pure functions: identical inputs produce identical missions

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)] // Many pure functions don't need #[must_use]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)] // Index to f32 casts stay below 2^24
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::neg_cmp_op_on_partial_ord)] // NaN-rejecting comparisons

extern crate alloc;

/// Planner configuration and defaults
pub mod config;
/// Vector, quaternion and tolerance helpers
pub mod geometry;
/// Grid missions, flight steps and mission assembly
pub mod mission_planning;
/// Serpentine scan generator
pub mod scan;
/// Survey area, camera intrinsics and footprint
pub mod survey;
/// Core types (errors, warnings, axes)
pub mod types;

pub use config::PlannerConfig;
pub use geometry::{approximately, Quaternion, Vec3};
pub use mission_planning::{
    plan_double_grid, DoubleGridMission, FlightStep, GridMission, GridOrientation, Mission,
    PassSummary,
};
pub use scan::{ScanLayout, ScanPattern};
pub use survey::{CameraDefinition, Footprint, PassParameters, SurveyArea};
pub use types::*;
