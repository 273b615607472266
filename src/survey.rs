//! Survey area, camera intrinsics and ground footprint
//!
//! The footprint of a pinhole camera at altitude `h` is the sensor size
//! scaled by `h / focal_length`. Subtracting the requested overlap from the
//! footprint yields the along-track (frontal) and cross-track (side) pitches
//! used by the scan generator.

use crate::geometry::{approximately, Vec3};
use crate::types::*;
use heapless::Vec;
use log::debug;
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) for overlap percentages
pub const MAX_OVERLAP_PERCENT: f32 = 100.0;

/// Rectangular ground area to photograph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyArea {
    /// Box center
    pub center: Vec3,
    /// Box half-sizes (X, Z span the ground, Y is height)
    pub extents: Vec3,
    /// Overlap between consecutive images along a line (percent)
    pub frontal_overlap: f32,
    /// Overlap between adjacent lines (percent)
    pub side_overlap: f32,
}

impl SurveyArea {
    /// Create a survey area from center and half-extents
    pub fn new(center: Vec3, extents: Vec3, frontal_overlap: f32, side_overlap: f32) -> Self {
        Self {
            center,
            extents,
            frontal_overlap,
            side_overlap,
        }
    }

    /// Height of the bottom face, the reference for relative altitudes
    pub fn ground_level(&self) -> f32 {
        self.center.y - self.extents.y
    }

    /// (min, max) of the area along a ground axis
    pub fn bounds(&self, axis: GroundAxis) -> (f32, f32) {
        let (c, e) = match axis {
            GroundAxis::X => (self.center.x, self.extents.x),
            GroundAxis::Z => (self.center.z, self.extents.z),
        };
        (c - e, c + e)
    }

    /// Corner with minimum X and Z, as [x, z]
    pub fn bottom_left(&self) -> [f32; 2] {
        [self.bounds(GroundAxis::X).0, self.bounds(GroundAxis::Z).0]
    }

    /// Corner with maximum X and Z, as [x, z]
    pub fn top_right(&self) -> [f32; 2] {
        [self.bounds(GroundAxis::X).1, self.bounds(GroundAxis::Z).1]
    }

    /// Full size along a ground axis
    pub fn size(&self, axis: GroundAxis) -> f32 {
        let (min, max) = self.bounds(axis);
        max - min
    }

    /// Ground axes along which the area has collapsed to zero width
    pub fn degenerate_axes(&self, epsilon: f32) -> Vec<GroundAxis, 2> {
        let mut axes = Vec::new();
        for axis in [GroundAxis::X, GroundAxis::Z] {
            let (min, max) = self.bounds(axis);
            if approximately(min, max, epsilon) {
                // Capacity matches the number of axes
                let _ = axes.push(axis);
            }
        }
        axes
    }

    /// Validate bounds and overlap percentages
    pub fn validate(&self) -> Result<()> {
        if !self.center.is_finite()
            || !self.extents.is_finite()
            || self.extents.x < 0.0
            || self.extents.y < 0.0
            || self.extents.z < 0.0
        {
            return Err(ConfigIssue::InvalidAreaBounds.into());
        }
        if !overlap_in_range(self.frontal_overlap) {
            return Err(ConfigIssue::FrontalOverlapOutOfRange.into());
        }
        if !overlap_in_range(self.side_overlap) {
            return Err(ConfigIssue::SideOverlapOutOfRange.into());
        }
        Ok(())
    }
}

fn overlap_in_range(overlap: f32) -> bool {
    overlap >= 0.0 && overlap < MAX_OVERLAP_PERCENT
}

/// Pinhole camera intrinsics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraDefinition {
    /// Sensor width (same unit as focal length)
    pub sensor_size_x: f32,
    /// Sensor height
    pub sensor_size_y: f32,
    /// Focal length
    pub focal_length: f32,
}

impl CameraDefinition {
    pub fn new(sensor_size_x: f32, sensor_size_y: f32, focal_length: f32) -> Self {
        Self {
            sensor_size_x,
            sensor_size_y,
            focal_length,
        }
    }

    /// Full-frame 36x24mm sensor behind a 50mm lens
    pub fn full_frame_50mm() -> Self {
        Self::new(36.0, 24.0, 50.0)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.sensor_size_x) || !is_positive(self.sensor_size_y) {
            return Err(ConfigIssue::InvalidSensorSize.into());
        }
        if !is_positive(self.focal_length) {
            return Err(ConfigIssue::InvalidFocalLength.into());
        }
        Ok(())
    }
}

/// Altitude and camera tilt of one pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassParameters {
    /// Altitude above the survey area's ground level (meters)
    pub relative_altitude: f32,
    /// Camera pitch below the flight direction (degrees)
    pub camera_angle_deg: f32,
}

impl PassParameters {
    pub fn new(relative_altitude: f32, camera_angle_deg: f32) -> Self {
        Self {
            relative_altitude,
            camera_angle_deg,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.relative_altitude.is_finite() || !self.camera_angle_deg.is_finite() {
            return Err(ConfigIssue::InvalidPassParameters.into());
        }
        Ok(())
    }
}

/// Projected image size and sampling pitches at one altitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Ground width covered by one image (meters)
    pub image_width: f32,
    /// Ground height covered by one image (meters)
    pub image_height: f32,
    /// Distance between consecutive samples along a line
    pub frontal_step: f32,
    /// Distance between adjacent lines
    pub side_step: f32,
}

impl Footprint {
    /// Compute the footprint of `camera` at `altitude` over `area`.
    ///
    /// Camera and area are expected to be validated by the caller. Fails with
    /// `InvalidConfiguration` if any resulting size or pitch is not strictly
    /// positive.
    pub fn at_altitude(
        altitude: f32,
        camera: &CameraDefinition,
        area: &SurveyArea,
    ) -> Result<Self> {
        let image_width = altitude * camera.sensor_size_x / camera.focal_length;
        let image_height = altitude * camera.sensor_size_y / camera.focal_length;
        if !is_positive(image_width) || !is_positive(image_height) {
            return Err(ConfigIssue::NonPositiveFootprint.into());
        }

        let frontal_step = image_height * (100.0 - area.frontal_overlap) / 100.0;
        let side_step = image_width * (100.0 - area.side_overlap) / 100.0;
        if !is_positive(frontal_step) || !is_positive(side_step) {
            return Err(ConfigIssue::NonPositiveStep.into());
        }

        debug!(
            "Footprint at {:.2}m: image {:.2}x{:.2}m, frontal step {:.3}m, side step {:.3}m",
            altitude, image_width, image_height, frontal_step, side_step
        );

        Ok(Self {
            image_width,
            image_height,
            frontal_step,
            side_step,
        })
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
