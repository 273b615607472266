//! Tests for planner configuration and input validation
//!
//! These tests ensure configuration defaults and validation are correct

use grid_survey_planner::config::*;
use grid_survey_planner::*;

#[cfg(test)]
mod planner_config_tests {
    use super::*;

    #[test]
    fn test_new_config_defaults() {
        let config = PlannerConfig::new();

        assert_eq!(config.boundary_epsilon, DEFAULT_BOUNDARY_EPSILON);
        assert_eq!(config.max_steps_per_pass, DEFAULT_MAX_STEPS_PER_PASS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_test_config_has_small_cap() {
        let config = PlannerConfig::test_config();

        assert!(config.max_steps_per_pass < DEFAULT_MAX_STEPS_PER_PASS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = PlannerConfig::new()
            .with_boundary_epsilon(1.0e-6)
            .with_max_steps_per_pass(42);

        assert_eq!(config.boundary_epsilon, 1.0e-6);
        assert_eq!(config.max_steps_per_pass, 42);
    }

    #[test]
    fn test_tolerance_upper_bound() {
        assert!(PlannerConfig::new()
            .with_boundary_epsilon(MAX_BOUNDARY_EPSILON)
            .validate()
            .is_ok());
        assert!(PlannerConfig::new()
            .with_boundary_epsilon(MAX_BOUNDARY_EPSILON * 2.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_validated_before_planning() {
        let mission = GridMission::new(
            SurveyArea::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 10.0), 50.0, 50.0),
            CameraDefinition::full_frame_50mm(),
            PassParameters::new(30.0, 90.0),
        );
        let result = mission.plan(&PlannerConfig::new().with_max_steps_per_pass(0));

        assert_eq!(
            result,
            Err(PlannerError::InvalidConfiguration(
                ConfigIssue::InvalidWaypointLimit
            ))
        );
    }
}

#[cfg(test)]
mod survey_input_tests {
    use super::*;

    #[test]
    fn test_overlap_boundaries() {
        let mut area = SurveyArea::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 10.0), 0.0, 0.0);
        assert!(area.validate().is_ok());

        area.frontal_overlap = 99.9;
        assert!(area.validate().is_ok());

        area.frontal_overlap = 100.0;
        assert_eq!(
            area.validate(),
            Err(PlannerError::InvalidConfiguration(
                ConfigIssue::FrontalOverlapOutOfRange
            ))
        );

        area.frontal_overlap = f32::NAN;
        assert!(area.validate().is_err());
    }

    #[test]
    fn test_non_finite_center_rejected() {
        let area = SurveyArea::new(
            Vec3::new(f32::NAN, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 10.0),
            50.0,
            50.0,
        );
        assert_eq!(
            area.validate(),
            Err(PlannerError::InvalidConfiguration(
                ConfigIssue::InvalidAreaBounds
            ))
        );
    }

    #[test]
    fn test_pass_parameters_validation() {
        assert!(PassParameters::new(40.0, -30.0).validate().is_ok());
        assert!(PassParameters::new(f32::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_footprint_scales_with_altitude() {
        let area = SurveyArea::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 10.0), 50.0, 50.0);
        let camera = CameraDefinition::full_frame_50mm();
        let low = Footprint::at_altitude(25.0, &camera, &area).unwrap();
        let high = Footprint::at_altitude(50.0, &camera, &area).unwrap();

        assert!((high.image_width - 2.0 * low.image_width).abs() < 1.0e-4);
        assert!((high.side_step - 2.0 * low.side_step).abs() < 1.0e-4);
    }
}
