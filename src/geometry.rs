//! Vector and rotation primitives for the survey frame
//!
//! The frame is Y-up with the ground plane spanned by X and Z. Rotations
//! follow the usual "look" convention: an identity rotation faces +Z with +Y
//! up, and a positive pitch about +X tilts the view downward.

use core::ops::{Add, Mul, Neg, Sub};
use serde::{Deserialize, Serialize};

/// Squared length below which a direction is treated as zero
const MIN_DIRECTION_SQ: f32 = 1.0e-12;

/// Approximate equality scaled by operand magnitude.
///
/// Two values are considered equal when
/// `|a - b| <= epsilon * max(1, |a|, |b|)`.
pub fn approximately(a: f32, b: f32, epsilon: f32) -> bool {
    let scale = libm::fmaxf(1.0, libm::fmaxf(libm::fabsf(a), libm::fabsf(b)));
    libm::fabsf(a - b) <= epsilon * scale
}

/// 3D vector (meters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X coordinate (meters)
    pub x: f32,
    /// Y coordinate (altitude in meters)
    pub y: f32,
    /// Z coordinate (meters)
    pub z: f32,
}

impl Vec3 {
    /// Zero vector
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    /// +X
    pub const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    /// +Y
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    /// +Z
    pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    /// Create a new vector
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        libm::sqrtf(self.length_squared())
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Vec3) -> f32 {
        (self - other).length()
    }

    /// Unit vector in the same direction, `None` for (near) zero vectors
    pub fn try_normalize(self) -> Option<Vec3> {
        let len_sq = self.length_squared();
        if !(len_sq > MIN_DIRECTION_SQ) || !len_sq.is_finite() {
            return None;
        }
        Some(self * (1.0 / libm::sqrtf(len_sq)))
    }

    /// All components finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Component-wise approximate equality
    pub fn approx_eq(self, other: Vec3, epsilon: f32) -> bool {
        approximately(self.x, other.x, epsilon)
            && approximately(self.y, other.y, epsilon)
            && approximately(self.z, other.z, epsilon)
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// Unit quaternion rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// No rotation
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Rotation of `angle_deg` degrees about `axis` (need not be normalized).
    ///
    /// Returns the identity for a zero axis.
    pub fn from_axis_angle(axis: Vec3, angle_deg: f32) -> Self {
        let Some(axis) = axis.try_normalize() else {
            return Self::IDENTITY;
        };
        let half = angle_deg.to_radians() * 0.5;
        let s = libm::sinf(half);
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: libm::cosf(half),
        }
    }

    /// Rotation whose forward (+Z) axis points along `direction` and whose up
    /// axis is as close to `up` as possible.
    ///
    /// Returns `None` when `direction` is zero. When `direction` is parallel
    /// to `up`, +Z is used as the reference up instead.
    pub fn look_rotation(direction: Vec3, up: Vec3) -> Option<Self> {
        let forward = direction.try_normalize()?;
        let right = match up.cross(forward).try_normalize() {
            Some(r) => r,
            None => Vec3::FORWARD.cross(forward).try_normalize()?,
        };
        let up = forward.cross(right);
        Some(Self::from_basis(right, up, forward))
    }

    /// Rotation from an orthonormal basis (matrix columns right, up, forward)
    fn from_basis(r: Vec3, u: Vec3, f: Vec3) -> Self {
        let (m00, m01, m02) = (r.x, u.x, f.x);
        let (m10, m11, m12) = (r.y, u.y, f.y);
        let (m20, m21, m22) = (r.z, u.z, f.z);
        let trace = m00 + m11 + m22;

        let q = if trace > 0.0 {
            let s = libm::sqrtf(trace + 1.0) * 2.0;
            Self {
                w: 0.25 * s,
                x: (m21 - m12) / s,
                y: (m02 - m20) / s,
                z: (m10 - m01) / s,
            }
        } else if m00 > m11 && m00 > m22 {
            let s = libm::sqrtf(1.0 + m00 - m11 - m22) * 2.0;
            Self {
                w: (m21 - m12) / s,
                x: 0.25 * s,
                y: (m01 + m10) / s,
                z: (m02 + m20) / s,
            }
        } else if m11 > m22 {
            let s = libm::sqrtf(1.0 + m11 - m00 - m22) * 2.0;
            Self {
                w: (m02 - m20) / s,
                x: (m01 + m10) / s,
                y: 0.25 * s,
                z: (m12 + m21) / s,
            }
        } else {
            let s = libm::sqrtf(1.0 + m22 - m00 - m11) * 2.0;
            Self {
                w: (m10 - m01) / s,
                x: (m02 + m20) / s,
                y: (m12 + m21) / s,
                z: 0.25 * s,
            }
        };
        q.normalized()
    }

    pub fn normalized(self) -> Self {
        let n = libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w);
        if !(n > 0.0) {
            return Self::IDENTITY;
        }
        Self {
            x: self.x / n,
            y: self.y / n,
            z: self.z / n,
            w: self.w / n,
        }
    }

    /// Rotate a vector
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Direction the rotation faces (+Z rotated)
    pub fn forward(self) -> Vec3 {
        self.rotate(Vec3::FORWARD)
    }

    /// Same rotation within tolerance (q and -q are the same rotation)
    pub fn approx_eq(self, other: Quaternion, epsilon: f32) -> bool {
        let dot = self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w;
        libm::fabsf(dot) >= 1.0 - epsilon
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    /// Hamilton product: `self * rhs` applies `rhs` first
    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}
