//! 2D pose type for vehicle position and orientation.
//!
//! Coordinate frame follows ROS REP-103:
//! - X-forward, Y-left, Z-up (right-handed)
//! - Counter-clockwise positive rotation

use serde::{Deserialize, Serialize};

use super::math::normalize_angle;
use super::point::WorldPoint;

/// A 2D pose representing position and orientation.
///
/// - Position: (x, y) in meters
/// - Theta: heading angle in radians, counter-clockwise from X-axis,
///   normalized to [-π, π)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position in meters.
    pub x: f32,
    /// Y position in meters.
    pub y: f32,
    /// Heading angle in radians [-π, π), CCW positive from X-axis.
    pub theta: f32,
}

impl Pose2D {
    /// Create a new pose. `theta` is normalized to [-π, π).
    #[inline]
    pub fn new(x: f32, y: f32, theta: f32) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Create an identity pose (origin, facing forward).
    #[inline]
    pub const fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
        }
    }

    /// Get the position as a WorldPoint.
    #[inline]
    pub fn position(self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// Get the forward direction (unit vector).
    #[inline]
    pub fn forward(self) -> WorldPoint {
        WorldPoint::new(self.theta.cos(), self.theta.sin())
    }

    /// Transform a point from this pose's local frame to world frame.
    #[inline]
    pub fn transform_point(self, point: WorldPoint) -> WorldPoint {
        let (sin, cos) = self.theta.sin_cos();
        WorldPoint {
            x: self.x + point.x * cos - point.y * sin,
            y: self.y + point.x * sin + point.y * cos,
        }
    }

    /// Transform a point from world frame to this pose's local frame.
    #[inline]
    pub fn inverse_transform_point(self, point: WorldPoint) -> WorldPoint {
        let (sin, cos) = self.theta.sin_cos();
        let dx = point.x - self.x;
        let dy = point.y - self.y;
        WorldPoint {
            x: dx * cos + dy * sin,
            y: -dx * sin + dy * cos,
        }
    }

    /// Compose this pose with another (apply `other` in `self`'s frame).
    #[inline]
    pub fn compose(self, other: Pose2D) -> Self {
        let pos = self.transform_point(other.position());
        Self::new(pos.x, pos.y, self.theta + other.theta)
    }

    /// Compute the inverse of this pose.
    ///
    /// `pose.compose(pose.inverse()) ≈ Pose2D::identity()`
    #[inline]
    pub fn inverse(self) -> Self {
        let (sin, cos) = self.theta.sin_cos();
        Self::new(
            -self.x * cos - self.y * sin,
            self.x * sin - self.y * cos,
            -self.theta,
        )
    }

    /// Check if this pose is approximately equal to another.
    #[inline]
    pub fn approx_eq(self, other: Pose2D, pos_epsilon: f32, angle_epsilon: f32) -> bool {
        use super::math::angles_approx_equal;
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_new_normalizes_angle() {
        let pose = Pose2D::new(0.0, 0.0, 3.0 * PI);
        assert!(pose.theta.abs() - PI < 1e-5);
    }

    #[test]
    fn test_transform_point() {
        let pose = Pose2D::new(1.0, 0.0, FRAC_PI_2);
        let world = pose.transform_point(WorldPoint::new(1.0, 0.0));
        assert_relative_eq!(world.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(world.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_inverse_transform_round_trip() {
        let pose = Pose2D::new(1.0, 2.0, FRAC_PI_2);
        let world = WorldPoint::new(3.0, 4.0);
        let back = pose.transform_point(pose.inverse_transform_point(world));
        assert_relative_eq!(back.x, world.x, epsilon = 1e-6);
        assert_relative_eq!(back.y, world.y, epsilon = 1e-6);
    }

    #[test]
    fn test_compose_then_inverse() {
        let pose = Pose2D::new(1.0, 2.0, 0.5);
        let identity = pose.compose(pose.inverse());
        assert_relative_eq!(identity.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(identity.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(identity.theta, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_compose_order_matters() {
        let translate = Pose2D::new(1.0, 0.0, 0.0);
        let rotate = Pose2D::new(0.0, 0.0, FRAC_PI_2);

        let a = translate.compose(rotate);
        assert_relative_eq!(a.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(a.y, 0.0, epsilon = 1e-6);

        let b = rotate.compose(translate);
        assert_relative_eq!(b.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(b.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_approx_eq() {
        let a = Pose2D::new(1.0, 2.0, 0.5);
        let b = Pose2D::new(1.001, 2.001, 0.501);
        assert!(a.approx_eq(b, 0.01, 0.01));
        assert!(!a.approx_eq(b, 0.0001, 0.0001));
    }
}
