//! Mission Planning for Photogrammetry Surveys
//!
//! This module turns a survey area and camera into oriented flight steps:
//! - Single grid missions (one serpentine pass)
//! - Double grid missions (two perpendicular passes at independent
//!   altitudes and camera tilts)
//! - Waypoint to flight step conversion with look-ahead orientation
//! - Per-pass summaries and path metrics
//!
//! All inputs are validated before any scanning starts, so an impossible
//! configuration (e.g. 100% overlap) fails immediately instead of looping.
//!
//! # Example
//! ```ignore
//! use grid_survey_planner::*;
//!
//! let area = SurveyArea::new(Vec3::ZERO, Vec3::new(50.0, 0.0, 30.0), 70.0, 60.0);
//! let camera = CameraDefinition::new(36.0, 24.0, 50.0);
//! let mission = DoubleGridMission::new(
//!     area,
//!     camera,
//!     PassParameters::new(50.0, 90.0),
//!     PassParameters::new(40.0, 60.0),
//! )
//! .plan(&PlannerConfig::new())?;
//! assert_eq!(mission.passes().len(), 2);
//! ```

use crate::config::PlannerConfig;
use crate::geometry::{Quaternion, Vec3};
use crate::scan::{ScanLayout, ScanPattern};
use crate::survey::{CameraDefinition, Footprint, PassParameters, SurveyArea};
use crate::types::*;
use alloc::vec::Vec;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Maximum recorded warnings per mission
pub const MAX_WARNINGS: usize = 4;

/// Drone pose at one photo position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightStep {
    position: Vec3,
    rotation: Quaternion,
}

impl FlightStep {
    pub fn new(position: Vec3, rotation: Quaternion) -> Self {
        Self { position, rotation }
    }

    /// Position in the survey frame (meters)
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Drone and camera orientation
    pub fn rotation(&self) -> Quaternion {
        self.rotation
    }
}

/// Orientation looking from `current` toward `next`, pitched by
/// `camera_angle_deg` about the resulting lateral axis.
///
/// Returns `None` when the two points coincide.
pub fn rotation_between_waypoints(
    current: Vec3,
    next: Vec3,
    camera_angle_deg: f32,
) -> Option<Quaternion> {
    Quaternion::look_rotation(next - current, Vec3::UP)
        .map(|look| with_camera_tilt(look, camera_angle_deg))
}

fn with_camera_tilt(look: Quaternion, camera_angle_deg: f32) -> Quaternion {
    look * Quaternion::from_axis_angle(Vec3::RIGHT, camera_angle_deg)
}

/// Convert raw waypoints into flight steps.
///
/// Each step looks toward the following waypoint. The last waypoint has no
/// successor and keeps the previous step's orientation. A lone waypoint uses
/// `initial_heading`. Consecutive duplicates also keep the previous
/// orientation.
pub fn waypoints_to_flight_steps(
    waypoints: &[Vec3],
    camera_angle_deg: f32,
    initial_heading: Vec3,
) -> Vec<FlightStep> {
    let mut steps = Vec::with_capacity(waypoints.len());
    let mut carried = Quaternion::look_rotation(initial_heading, Vec3::UP)
        .map(|look| with_camera_tilt(look, camera_angle_deg))
        .unwrap_or(Quaternion::IDENTITY);

    for pair in waypoints.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        match rotation_between_waypoints(current, next, camera_angle_deg) {
            Some(rotation) => carried = rotation,
            None => warn!(
                "Coincident waypoints at ({:.3}, {:.3}, {:.3}), keeping previous orientation",
                current.x, current.y, current.z
            ),
        }
        steps.push(FlightStep::new(current, carried));
    }

    if let Some(&last) = waypoints.last() {
        steps.push(FlightStep::new(last, carried));
    }

    steps
}

/// Line orientation of a grid pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridOrientation {
    /// Lines along Z from the bottom-left corner
    LinesAlongZ,
    /// Lines along X from the top-right corner
    LinesAlongX,
}

impl GridOrientation {
    /// Scan pattern for this orientation
    pub fn pattern(self, area: &SurveyArea, footprint: &Footprint) -> ScanPattern {
        match self {
            GridOrientation::LinesAlongZ => ScanPattern::first_grid(area, footprint),
            GridOrientation::LinesAlongX => ScanPattern::second_grid(area, footprint),
        }
    }
}

/// What one pass contributed to a mission
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassSummary {
    /// Line orientation
    pub orientation: GridOrientation,
    /// Flight altitude in the survey frame (meters)
    pub altitude: f32,
    /// Camera pitch (degrees)
    pub camera_angle_deg: f32,
    /// Image footprint and pitches at `altitude`
    pub footprint: Footprint,
    /// Line and sample counts
    pub layout: ScanLayout,
    /// Index of the pass's first step in the mission
    pub first_step: usize,
    /// Number of steps in the pass
    pub step_count: usize,
}

/// Ordered, immutable list of flight steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    mission_type: MissionType,
    steps: Vec<FlightStep>,
    passes: Vec<PassSummary>,
    warnings: heapless::Vec<PlanWarning, MAX_WARNINGS>,
}

impl Mission {
    fn new(mission_type: MissionType) -> Self {
        Self {
            mission_type,
            steps: Vec::new(),
            passes: Vec::new(),
            warnings: heapless::Vec::new(),
        }
    }

    fn append_pass(&mut self, plan: PlannedPass) {
        self.passes.push(PassSummary {
            first_step: self.steps.len(),
            step_count: plan.steps.len(),
            ..plan.summary
        });
        self.steps.extend(plan.steps);
    }

    fn record_warning(&mut self, warning: PlanWarning) {
        warn!("{}", warning);
        if !self.warnings.contains(&warning) {
            // Only two ground axes exist, capacity cannot be exceeded
            let _ = self.warnings.push(warning);
        }
    }

    pub fn mission_type(&self) -> MissionType {
        self.mission_type
    }

    /// All steps, pass by pass
    pub fn steps(&self) -> &[FlightStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn passes(&self) -> &[PassSummary] {
        &self.passes
    }

    /// Steps belonging to pass `index`
    pub fn pass_steps(&self, index: usize) -> Option<&[FlightStep]> {
        let pass = self.passes.get(index)?;
        self.steps
            .get(pass.first_step..pass.first_step + pass.step_count)
    }

    /// Informative conditions raised while planning
    pub fn warnings(&self) -> &[PlanWarning] {
        &self.warnings
    }

    /// Path length through all steps in order (meters)
    pub fn total_distance(&self) -> f32 {
        self.steps
            .windows(2)
            .map(|pair| pair[0].position().distance_to(pair[1].position()))
            .sum()
    }

    /// Flight time in seconds at constant `speed` (m/s)
    pub fn estimated_time(&self, speed: f32) -> Option<f32> {
        if !(speed > 0.0) || !speed.is_finite() {
            return None;
        }
        Some(self.total_distance() / speed)
    }
}

/// A validated pass ready to be scanned
struct PassSetup {
    orientation: GridOrientation,
    params: PassParameters,
    altitude: f32,
    footprint: Footprint,
    pattern: ScanPattern,
    layout: ScanLayout,
}

struct PlannedPass {
    summary: PassSummary,
    steps: Vec<FlightStep>,
}

/// Validate one pass and size it against the configured cap
fn prepare_pass(
    index: usize,
    area: &SurveyArea,
    camera: &CameraDefinition,
    params: PassParameters,
    orientation: GridOrientation,
    config: &PlannerConfig,
) -> Result<PassSetup> {
    params.validate()?;
    let altitude = area.ground_level() + params.relative_altitude;
    let footprint = Footprint::at_altitude(altitude, camera, area)?;
    let pattern = orientation.pattern(area, &footprint);
    let layout = pattern.layout(area, config.boundary_epsilon);

    let requested = layout.total().unwrap_or(usize::MAX);
    if requested > config.max_steps_per_pass {
        return Err(PlannerError::TooManyWaypoints {
            pass: index,
            requested,
            limit: config.max_steps_per_pass,
        });
    }

    Ok(PassSetup {
        orientation,
        params,
        altitude,
        footprint,
        pattern,
        layout,
    })
}

fn run_pass(index: usize, setup: PassSetup) -> PlannedPass {
    let waypoints = setup.pattern.waypoints(&setup.layout, setup.altitude);
    let steps = waypoints_to_flight_steps(
        &waypoints,
        setup.params.camera_angle_deg,
        setup.pattern.initial_heading(),
    );
    debug!(
        "Pass {} ({:?}): {} lines x {} samples at {:.2}m",
        index,
        setup.orientation,
        setup.layout.lines,
        setup.layout.samples_per_line,
        setup.altitude
    );

    PlannedPass {
        summary: PassSummary {
            orientation: setup.orientation,
            altitude: setup.altitude,
            camera_angle_deg: setup.params.camera_angle_deg,
            footprint: setup.footprint,
            layout: setup.layout,
            first_step: 0,
            step_count: steps.len(),
        },
        steps,
    }
}

/// Validate every pass first, then scan them in order.
fn plan_passes(
    mission_type: MissionType,
    area: &SurveyArea,
    camera: &CameraDefinition,
    passes: &[(PassParameters, GridOrientation)],
    config: &PlannerConfig,
) -> Result<Mission> {
    config.validate()?;
    area.validate()?;
    camera.validate()?;

    let setups = passes
        .iter()
        .enumerate()
        .map(|(index, &(params, orientation))| {
            prepare_pass(index, area, camera, params, orientation, config)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut mission = Mission::new(mission_type);
    for axis in area.degenerate_axes(config.boundary_epsilon) {
        mission.record_warning(PlanWarning::DegenerateArea { axis });
    }
    for (index, setup) in setups.into_iter().enumerate() {
        mission.append_pass(run_pass(index, setup));
    }

    debug!(
        "{:?} mission planned: {} steps over {} passes",
        mission.mission_type(),
        mission.len(),
        mission.passes().len()
    );
    Ok(mission)
}

/// One serpentine pass with lines along Z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMission {
    pub survey_area: SurveyArea,
    pub camera: CameraDefinition,
    pub pass: PassParameters,
}

impl GridMission {
    pub fn new(survey_area: SurveyArea, camera: CameraDefinition, pass: PassParameters) -> Self {
        Self {
            survey_area,
            camera,
            pass,
        }
    }

    /// Flight altitude in the survey frame
    pub fn altitude(&self) -> f32 {
        self.survey_area.ground_level() + self.pass.relative_altitude
    }

    pub fn plan(&self, config: &PlannerConfig) -> Result<Mission> {
        plan_passes(
            MissionType::Grid,
            &self.survey_area,
            &self.camera,
            &[(self.pass, GridOrientation::LinesAlongZ)],
            config,
        )
    }
}

/// Two perpendicular serpentine passes flown back to back
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoubleGridMission {
    pub survey_area: SurveyArea,
    pub camera: CameraDefinition,
    /// Lines along Z
    pub first: PassParameters,
    /// Lines along X
    pub second: PassParameters,
}

impl DoubleGridMission {
    pub fn new(
        survey_area: SurveyArea,
        camera: CameraDefinition,
        first: PassParameters,
        second: PassParameters,
    ) -> Self {
        Self {
            survey_area,
            camera,
            first,
            second,
        }
    }

    /// Flight altitudes of the two passes in the survey frame
    pub fn altitudes(&self) -> (f32, f32) {
        let ground = self.survey_area.ground_level();
        (
            ground + self.first.relative_altitude,
            ground + self.second.relative_altitude,
        )
    }

    /// Plan both passes; the second pass follows the first with no
    /// transition step.
    pub fn plan(&self, config: &PlannerConfig) -> Result<Mission> {
        plan_passes(
            MissionType::DoubleGrid,
            &self.survey_area,
            &self.camera,
            &[
                (self.first, GridOrientation::LinesAlongZ),
                (self.second, GridOrientation::LinesAlongX),
            ],
            config,
        )
    }
}

/// Plan a double grid mission with the default configuration
pub fn plan_double_grid(
    survey_area: SurveyArea,
    camera: CameraDefinition,
    first: PassParameters,
    second: PassParameters,
) -> Result<Mission> {
    DoubleGridMission::new(survey_area, camera, first, second).plan(&PlannerConfig::new())
}
