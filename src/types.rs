//! Core type definitions for the grid survey planner

use core::fmt;
use serde::{Deserialize, Serialize};

/// Result type for planner operations
pub type Result<T> = core::result::Result<T, PlannerError>;

/// Horizontal ground axis of the survey frame (Y is up)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroundAxis {
    /// World X axis
    X,
    /// World Z axis
    Z,
}

impl GroundAxis {
    /// The other horizontal axis
    pub const fn perpendicular(self) -> Self {
        match self {
            GroundAxis::X => GroundAxis::Z,
            GroundAxis::Z => GroundAxis::X,
        }
    }
}

impl fmt::Display for GroundAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroundAxis::X => write!(f, "X"),
            GroundAxis::Z => write!(f, "Z"),
        }
    }
}

/// Kind of survey mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionType {
    /// One serpentine pass with lines along Z
    Grid,
    /// Two perpendicular serpentine passes at independent altitudes
    DoubleGrid,
}

/// Reason an input was rejected before planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigIssue {
    /// Frontal overlap outside [0, 100)
    FrontalOverlapOutOfRange,
    /// Side overlap outside [0, 100)
    SideOverlapOutOfRange,
    /// Sensor width or height is not a positive finite number
    InvalidSensorSize,
    /// Focal length is not a positive finite number
    InvalidFocalLength,
    /// Survey area center or extents are negative or not finite
    InvalidAreaBounds,
    /// Pass altitude or camera angle is not finite
    InvalidPassParameters,
    /// Projected image footprint is not positive at the pass altitude
    NonPositiveFootprint,
    /// Frontal or side step pitch is not positive
    NonPositiveStep,
    /// Boundary tolerance outside the accepted range
    InvalidTolerance,
    /// Waypoint cap is zero
    InvalidWaypointLimit,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::FrontalOverlapOutOfRange => {
                write!(f, "frontal overlap must be within [0, 100)")
            }
            ConfigIssue::SideOverlapOutOfRange => write!(f, "side overlap must be within [0, 100)"),
            ConfigIssue::InvalidSensorSize => write!(f, "sensor size must be positive"),
            ConfigIssue::InvalidFocalLength => write!(f, "focal length must be positive"),
            ConfigIssue::InvalidAreaBounds => write!(f, "survey area bounds are invalid"),
            ConfigIssue::InvalidPassParameters => {
                write!(f, "pass altitude or camera angle is invalid")
            }
            ConfigIssue::NonPositiveFootprint => write!(f, "image footprint is not positive"),
            ConfigIssue::NonPositiveStep => write!(f, "step pitch is not positive"),
            ConfigIssue::InvalidTolerance => write!(f, "boundary tolerance is out of range"),
            ConfigIssue::InvalidWaypointLimit => write!(f, "waypoint limit must be at least 1"),
        }
    }
}

/// Error types for the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerError {
    /// Inputs rejected before any scanning started
    InvalidConfiguration(ConfigIssue),
    /// A pass would produce more waypoints than the configured cap
    TooManyWaypoints {
        /// Zero-based pass index
        pass: usize,
        /// Waypoints the pass would need
        requested: usize,
        /// Configured cap
        limit: usize,
    },
}

impl From<ConfigIssue> for PlannerError {
    fn from(issue: ConfigIssue) -> Self {
        PlannerError::InvalidConfiguration(issue)
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::InvalidConfiguration(issue) => {
                write!(f, "Invalid configuration: {}", issue)
            }
            PlannerError::TooManyWaypoints {
                pass,
                requested,
                limit,
            } => write!(
                f,
                "Pass {} needs {} waypoints, limit is {}",
                pass, requested, limit
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlannerError {}

/// Informative, non-fatal planning conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanWarning {
    /// Survey area has zero extent along a scanned axis
    DegenerateArea {
        /// Collapsed axis
        axis: GroundAxis,
    },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::DegenerateArea { axis } => {
                write!(f, "Survey area has zero extent along {}", axis)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_issue_converts_to_error() {
        let err: PlannerError = ConfigIssue::NonPositiveStep.into();
        assert_eq!(err, PlannerError::InvalidConfiguration(ConfigIssue::NonPositiveStep));
    }

    #[test]
    fn test_perpendicular_axis() {
        assert_eq!(GroundAxis::X.perpendicular(), GroundAxis::Z);
        assert_eq!(GroundAxis::Z.perpendicular(), GroundAxis::X);
    }
}
