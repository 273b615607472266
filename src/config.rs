//! Configuration management for the grid survey planner

use crate::types::*;
use serde::{Deserialize, Serialize};

/// Default relative tolerance for boundary inclusion (a few ulps)
pub const DEFAULT_BOUNDARY_EPSILON: f32 = 8.0 * f32::EPSILON;

/// Largest accepted boundary tolerance.
///
/// At 100 km from the origin this still keeps the slack under 2 cm, well
/// below any footprint pitch.
pub const MAX_BOUNDARY_EPSILON: f32 = 128.0 * f32::EPSILON;

/// Default cap on waypoints generated by a single pass
pub const DEFAULT_MAX_STEPS_PER_PASS: usize = 10_000;

/// Planner configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Relative tolerance used when a coordinate lands on a survey boundary
    pub boundary_epsilon: f32,
    /// Maximum waypoints a single pass may produce
    pub max_steps_per_pass: usize,
}

impl PlannerConfig {
    /// Create a configuration with production defaults
    pub fn new() -> Self {
        Self {
            boundary_epsilon: DEFAULT_BOUNDARY_EPSILON,
            max_steps_per_pass: DEFAULT_MAX_STEPS_PER_PASS,
        }
    }

    /// Create a configuration for testing (small waypoint cap)
    pub fn test_config() -> Self {
        Self {
            boundary_epsilon: DEFAULT_BOUNDARY_EPSILON,
            max_steps_per_pass: 500,
        }
    }

    /// Override the boundary tolerance
    pub fn with_boundary_epsilon(mut self, epsilon: f32) -> Self {
        self.boundary_epsilon = epsilon;
        self
    }

    /// Override the per-pass waypoint cap
    pub fn with_max_steps_per_pass(mut self, limit: usize) -> Self {
        self.max_steps_per_pass = limit;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.boundary_epsilon.is_finite()
            || self.boundary_epsilon <= 0.0
            || self.boundary_epsilon > MAX_BOUNDARY_EPSILON
        {
            return Err(ConfigIssue::InvalidTolerance.into());
        }
        if self.max_steps_per_pass == 0 {
            return Err(ConfigIssue::InvalidWaypointLimit.into());
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PlannerConfig::new().validate().is_ok());
        assert!(PlannerConfig::test_config().validate().is_ok());
        assert_eq!(PlannerConfig::default(), PlannerConfig::new());
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        for eps in [0.0, -1.0e-5, 1.0e-3, 0.5, f32::NAN, f32::INFINITY] {
            let config = PlannerConfig::new().with_boundary_epsilon(eps);
            assert_eq!(
                config.validate(),
                Err(PlannerError::InvalidConfiguration(ConfigIssue::InvalidTolerance))
            );
        }
    }

    #[test]
    fn test_default_tolerance_is_ulp_scale() {
        // A 0.4m gap at 100km must not count as a single boundary
        let (a, b) = (99_999.8_f32, 100_000.2_f32);
        assert!(!crate::geometry::approximately(a, b, DEFAULT_BOUNDARY_EPSILON));
        assert!(!crate::geometry::approximately(a, b, MAX_BOUNDARY_EPSILON));
        // One ulp at the same magnitude still does
        let next = f32::from_bits(b.to_bits() + 1);
        assert!(crate::geometry::approximately(b, next, DEFAULT_BOUNDARY_EPSILON));
    }

    #[test]
    fn test_rejects_zero_limit() {
        let config = PlannerConfig::new().with_max_steps_per_pass(0);
        assert_eq!(
            config.validate(),
            Err(PlannerError::InvalidConfiguration(ConfigIssue::InvalidWaypointLimit))
        );
    }
}
