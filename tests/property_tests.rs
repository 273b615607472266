//! Property-based tests for the grid survey planner
//!
//! These tests verify invariants that should hold for all valid survey
//! areas and cameras, using randomized testing with proptest.

use grid_survey_planner::*;
use proptest::prelude::*;

/// Survey centers range up to this far from the origin (meters)
const MAX_OFFSET: f32 = 100_000.0;

/// Slack allowed past a bound: a few tolerance widths at its magnitude
fn slack(bound: f32) -> f32 {
    4.0 * config().boundary_epsilon * bound.abs().max(1.0)
}

fn area_strategy() -> impl Strategy<Value = SurveyArea> {
    (
        -MAX_OFFSET..MAX_OFFSET,
        0.0_f32..50.0,
        -MAX_OFFSET..MAX_OFFSET,
        1.0_f32..100.0,
        0.0_f32..20.0,
        1.0_f32..100.0,
        0.0_f32..80.0,
        0.0_f32..80.0,
    )
        .prop_map(|(cx, cy, cz, ex, ey, ez, frontal, side)| {
            SurveyArea::new(Vec3::new(cx, cy, cz), Vec3::new(ex, ey, ez), frontal, side)
        })
}

fn camera_strategy() -> impl Strategy<Value = CameraDefinition> {
    (10.0_f32..40.0, 10.0_f32..40.0, 10.0_f32..60.0)
        .prop_map(|(sx, sy, f)| CameraDefinition::new(sx, sy, f))
}

fn pass_strategy() -> impl Strategy<Value = PassParameters> {
    (40.0_f32..150.0, 0.0_f32..90.0).prop_map(|(alt, angle)| PassParameters::new(alt, angle))
}

fn config() -> PlannerConfig {
    PlannerConfig::new().with_max_steps_per_pass(1_000_000)
}

// ============================================================================
// COVERAGE PROPERTIES
// ============================================================================

#[cfg(test)]
mod coverage_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn both_passes_non_empty(
            area in area_strategy(),
            camera in camera_strategy(),
            first in pass_strategy(),
            second in pass_strategy(),
        ) {
            let mission = DoubleGridMission::new(area, camera, first, second)
                .plan(&config())
                .unwrap();

            prop_assert_eq!(mission.passes().len(), 2);
            prop_assert!(!mission.pass_steps(0).unwrap().is_empty());
            prop_assert!(!mission.pass_steps(1).unwrap().is_empty());
        }

        #[test]
        fn positions_stay_inside_area_at_pass_altitude(
            area in area_strategy(),
            camera in camera_strategy(),
            first in pass_strategy(),
            second in pass_strategy(),
        ) {
            let mission = DoubleGridMission::new(area, camera, first, second)
                .plan(&config())
                .unwrap();
            let (min_x, max_x) = area.bounds(GroundAxis::X);
            let (min_z, max_z) = area.bounds(GroundAxis::Z);

            for (index, pass) in mission.passes().iter().enumerate() {
                for step in mission.pass_steps(index).unwrap() {
                    let p = step.position();
                    prop_assert!(p.x >= min_x - slack(min_x), "x {} below {}", p.x, min_x);
                    prop_assert!(p.x <= max_x + slack(max_x), "x {} above {}", p.x, max_x);
                    prop_assert!(p.z >= min_z - slack(min_z), "z {} below {}", p.z, min_z);
                    prop_assert!(p.z <= max_z + slack(max_z), "z {} above {}", p.z, max_z);
                    prop_assert_eq!(p.y, pass.altitude);
                }
            }
        }

        #[test]
        fn line_count_matches_width(
            area in area_strategy(),
            camera in camera_strategy(),
            first in pass_strategy(),
        ) {
            let mission = GridMission::new(area, camera, first).plan(&config()).unwrap();
            let pass = mission.passes()[0];
            let (min_x, max_x) = area.bounds(GroundAxis::X);
            let width = area.size(GroundAxis::X);
            let side = pass.footprint.side_step;
            let tolerance = slack(min_x.abs().max(max_x.abs()));

            // floor(w / s) + 1 lines, give or take one near integer ratios
            let advances = (pass.layout.lines - 1) as f32;
            prop_assert!((advances - (width / side).floor()).abs() <= 1.0);
            prop_assert!(advances * side <= width + tolerance);
            prop_assert!((advances + 1.0) * side >= width - tolerance);
        }

        #[test]
        fn first_pass_alternates_per_line(
            area in area_strategy(),
            camera in camera_strategy(),
            first in pass_strategy(),
        ) {
            let mission = GridMission::new(area, camera, first).plan(&config()).unwrap();
            let pass = mission.passes()[0];
            prop_assume!(pass.layout.samples_per_line >= 2);

            let steps = mission.steps();
            for (line, chunk) in steps.chunks(pass.layout.samples_per_line).enumerate() {
                let dz = chunk[1].position().z - chunk[0].position().z;
                prop_assert_eq!(dz > 0.0, line % 2 == 0);
            }
        }
    }
}

// ============================================================================
// ORIENTATION AND DETERMINISM PROPERTIES
// ============================================================================

#[cfg(test)]
mod orientation_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn last_step_keeps_previous_orientation(
            area in area_strategy(),
            camera in camera_strategy(),
            first in pass_strategy(),
            second in pass_strategy(),
        ) {
            let mission = DoubleGridMission::new(area, camera, first, second)
                .plan(&config())
                .unwrap();

            for index in 0..2 {
                let steps = mission.pass_steps(index).unwrap();
                prop_assume!(steps.len() >= 2);
                let n = steps.len();
                prop_assert_eq!(steps[n - 1].rotation(), steps[n - 2].rotation());
            }
        }

        #[test]
        fn rotations_are_unit(
            area in area_strategy(),
            camera in camera_strategy(),
            first in pass_strategy(),
        ) {
            let mission = GridMission::new(area, camera, first).plan(&config()).unwrap();
            for step in mission.steps() {
                let q = step.rotation();
                let norm = (q.x * q.x + q.y * q.y + q.z * q.z + q.w * q.w).sqrt();
                prop_assert!((norm - 1.0).abs() < 1.0e-3);
            }
        }

        #[test]
        fn planning_is_pure(
            area in area_strategy(),
            camera in camera_strategy(),
            first in pass_strategy(),
            second in pass_strategy(),
        ) {
            let planner = DoubleGridMission::new(area, camera, first, second);
            prop_assert_eq!(planner.plan(&config()), planner.plan(&config()));
        }
    }
}

// ============================================================================
// VALIDATION PROPERTIES
// ============================================================================

#[cfg(test)]
mod validation_properties {
    use super::*;

    proptest! {
        #[test]
        fn overlap_at_or_above_100_fails_fast(
            area in area_strategy(),
            camera in camera_strategy(),
            first in pass_strategy(),
            overlap in 100.0_f32..1000.0,
            frontal in any::<bool>(),
        ) {
            let mut area = area;
            if frontal {
                area.frontal_overlap = overlap;
            } else {
                area.side_overlap = overlap;
            }
            let result = GridMission::new(area, camera, first).plan(&config());
            prop_assert!(matches!(result, Err(PlannerError::InvalidConfiguration(_))));
        }
    }
}
