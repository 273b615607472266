//! Serpentine (boustrophedon) raster scan over a rectangular area
//!
//! A scan walks lines parallel to its *major* axis, sampling every
//! `major_step`, and moves `minor_step` along the perpendicular *minor* axis
//! between lines. Each new line starts where the previous one ended and runs
//! the opposite way.
//!
//! Sample positions are derived from integer indices (`start + i * step`)
//! so the last sample before a boundary does not drift with line length.

use crate::geometry::{approximately, Vec3};
use crate::survey::{Footprint, SurveyArea};
use crate::types::*;
use alloc::vec::Vec;
use log::trace;
use serde::{Deserialize, Serialize};

/// Axis sample counts at or above this are reported as `usize::MAX`.
/// Beyond 2^24 consecutive integers are no longer exact in `f32`.
const MAX_AXIS_SAMPLES: usize = 1 << 24;

/// Sign of travel along an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanDirection {
    /// Toward increasing coordinates
    Positive,
    /// Toward decreasing coordinates
    Negative,
}

impl ScanDirection {
    pub const fn sign(self) -> f32 {
        match self {
            ScanDirection::Positive => 1.0,
            ScanDirection::Negative => -1.0,
        }
    }
}

/// Parameters of one serpentine scan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanPattern {
    /// Axis the lines run along
    pub major_axis: GroundAxis,
    /// Starting corner as [x, z]
    pub start: [f32; 2],
    /// Sample pitch along a line
    pub major_step: f32,
    /// Spacing between lines
    pub minor_step: f32,
    /// Direction of the first line
    pub major_direction: ScanDirection,
    /// Direction lines advance in
    pub minor_direction: ScanDirection,
}

/// Line and sample counts of a scan over a particular area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanLayout {
    /// Number of lines
    pub lines: usize,
    /// Samples on every line
    pub samples_per_line: usize,
}

impl ScanLayout {
    /// Total waypoints, `None` on overflow
    pub fn total(&self) -> Option<usize> {
        self.lines.checked_mul(self.samples_per_line)
    }
}

impl ScanPattern {
    /// Lines along Z from the bottom-left corner, advancing toward +X.
    pub fn first_grid(area: &SurveyArea, footprint: &Footprint) -> Self {
        Self {
            major_axis: GroundAxis::Z,
            start: area.bottom_left(),
            major_step: footprint.frontal_step,
            minor_step: footprint.side_step,
            major_direction: ScanDirection::Positive,
            minor_direction: ScanDirection::Positive,
        }
    }

    /// Lines along X from the top-right corner, advancing toward -Z.
    ///
    /// Sample pitch along each line is the frontal step and line spacing is
    /// the side step, as in the first grid.
    pub fn second_grid(area: &SurveyArea, footprint: &Footprint) -> Self {
        Self {
            major_axis: GroundAxis::X,
            start: area.top_right(),
            major_step: footprint.frontal_step,
            minor_step: footprint.side_step,
            major_direction: ScanDirection::Negative,
            minor_direction: ScanDirection::Negative,
        }
    }

    fn start_on(&self, axis: GroundAxis) -> f32 {
        match axis {
            GroundAxis::X => self.start[0],
            GroundAxis::Z => self.start[1],
        }
    }

    /// Direction of travel on the first line, in the ground plane
    pub fn initial_heading(&self) -> Vec3 {
        let s = self.major_direction.sign();
        match self.major_axis {
            GroundAxis::X => Vec3::new(s, 0.0, 0.0),
            GroundAxis::Z => Vec3::new(0.0, 0.0, s),
        }
    }

    /// Count lines and samples per line without generating positions
    pub fn layout(&self, area: &SurveyArea, epsilon: f32) -> ScanLayout {
        let major = self.major_axis;
        let minor = major.perpendicular();
        let (major_min, major_max) = area.bounds(major);
        let (minor_min, minor_max) = area.bounds(minor);

        ScanLayout {
            lines: sample_count(
                self.start_on(minor),
                self.minor_step,
                self.minor_direction,
                (minor_min, minor_max),
                epsilon,
            ),
            samples_per_line: sample_count(
                self.start_on(major),
                self.major_step,
                self.major_direction,
                (major_min, major_max),
                epsilon,
            ),
        }
    }

    /// Generate the waypoints of `layout` at `altitude`
    pub fn waypoints(&self, layout: &ScanLayout, altitude: f32) -> Vec<Vec3> {
        let mut points = Vec::with_capacity(layout.total().unwrap_or(0));
        let major_start = self.start_on(self.major_axis);
        let minor_start = self.start_on(self.major_axis.perpendicular());
        let major_sign = self.major_direction.sign();
        let minor_sign = self.minor_direction.sign();

        for line in 0..layout.lines {
            let minor = minor_start + minor_sign * line as f32 * self.minor_step;
            trace!(
                "Scan line {} at {}={:.3}",
                line,
                self.major_axis.perpendicular(),
                minor
            );
            for k in 0..layout.samples_per_line {
                // Odd lines retrace the sample positions in reverse
                let i = if line % 2 == 0 {
                    k
                } else {
                    layout.samples_per_line - 1 - k
                };
                let major = major_start + major_sign * i as f32 * self.major_step;
                let point = match self.major_axis {
                    GroundAxis::Z => Vec3::new(minor, altitude, major),
                    GroundAxis::X => Vec3::new(major, altitude, minor),
                };
                points.push(point);
            }
        }

        points
    }
}

/// Boundary policy: inside the open range or approximately on an edge
pub fn within_range(value: f32, min: f32, max: f32, epsilon: f32) -> bool {
    (min < value || approximately(min, value, epsilon))
        && (value < max || approximately(value, max, epsilon))
}

/// Number of samples `start + sign * i * step` (i = 0, 1, ...) that stay
/// within `[min, max]`. Saturates to `usize::MAX` for absurdly fine pitches.
fn sample_count(
    start: f32,
    step: f32,
    direction: ScanDirection,
    (min, max): (f32, f32),
    epsilon: f32,
) -> usize {
    let sign = direction.sign();
    let at = |i: usize| start + sign * i as f32 * step;
    if !within_range(start, min, max, epsilon) {
        return 0;
    }

    let far = match direction {
        ScanDirection::Positive => max,
        ScanDirection::Negative => min,
    };
    let ratio = libm::fabsf(far - start) / step;
    if !(ratio < MAX_AXIS_SAMPLES as f32) {
        return usize::MAX;
    }
    let mut n = libm::floorf(ratio) as usize;
    while n > 0 && !within_range(at(n), min, max, epsilon) {
        n -= 1;
    }
    while n < MAX_AXIS_SAMPLES && within_range(at(n + 1), min, max, epsilon) {
        n += 1;
    }
    n + 1
}
