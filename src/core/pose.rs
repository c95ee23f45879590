//! 2D pose type for robot position and orientation.
//!
//! Coordinate frame follows ROS REP-103:
//! - X-forward, Y-left, Z-up (right-handed)
//! - Counter-clockwise positive rotation

use super::math::{angles_approx_equal, normalize_angle};

/// A 2D rigid transform: position plus heading.
///
/// Position is (x, y) in meters; `theta` is the heading angle in radians,
/// counter-clockwise from the X-axis, canonically wrapped to (-π, π].
///
/// Poses form a group: they are closed under [`compose`](Self::compose)
/// (also available as the `*` operator) and [`inverse`](Self::inverse).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose2D {
    /// X position in meters.
    pub x: f32,
    /// Y position in meters.
    pub y: f32,
    /// Heading angle in radians, wrapped to (-π, π].
    pub theta: f32,
}

impl Pose2D {
    /// Create a new pose. `theta` is wrapped to (-π, π].
    #[inline]
    pub fn new(x: f32, y: f32, theta: f32) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// The identity pose (origin, facing along +X).
    #[inline]
    pub const fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
        }
    }

    /// A pure rotation by `theta` radians.
    #[inline]
    pub fn rotation(theta: f32) -> Self {
        Self::new(0.0, 0.0, theta)
    }

    /// A pure translation by (x, y) meters.
    #[inline]
    pub fn translation(x: f32, y: f32) -> Self {
        Self { x, y, theta: 0.0 }
    }

    /// Compose this pose with another: apply `other` in `self`'s frame.
    ///
    /// Equivalent to rigid-transform matrix multiplication `self * other`.
    #[inline]
    pub fn compose(self, other: Pose2D) -> Self {
        let (sin, cos) = self.theta.sin_cos();
        Self::new(
            self.x + other.x * cos - other.y * sin,
            self.y + other.x * sin + other.y * cos,
            self.theta + other.theta,
        )
    }

    /// The inverse transform: `pose.compose(pose.inverse())` is identity.
    #[inline]
    pub fn inverse(self) -> Self {
        let (sin, cos) = self.theta.sin_cos();
        Self::new(
            -self.x * cos - self.y * sin,
            self.x * sin - self.y * cos,
            -self.theta,
        )
    }

    /// The relative pose from `self` to `other`:
    /// `self.compose(self.relative_to(other)) ≈ other`.
    #[inline]
    pub fn relative_to(self, other: Pose2D) -> Self {
        self.inverse().compose(other)
    }

    /// Check approximate equality with separate position and angle
    /// tolerances. Angle comparison handles wrap-around at ±π.
    #[inline]
    pub fn approx_eq(self, other: Pose2D, pos_epsilon: f32, angle_epsilon: f32) -> bool {
        (self.x - other.x).abs() <= pos_epsilon
            && (self.y - other.y).abs() <= pos_epsilon
            && angles_approx_equal(self.theta, other.theta, angle_epsilon)
    }
}

impl std::ops::Mul for Pose2D {
    type Output = Self;

    /// Compose two poses (same as `compose`).
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.compose(rhs)
    }
}
