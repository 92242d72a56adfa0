//! Integration, felt friction and the rolling-rotation hint.

use std::f32::consts::TAU;

use glam::{Quat, Vec2, Vec3};

/// Advance a position by `velocity * dt`.
pub fn integrate(position: &mut Vec2, velocity: Vec2, dt: f32) {
    *position += velocity * dt;
}

/// Slow a velocity down along its own direction.
///
/// `speed' = max(0, speed - (speed * quadratic + linear) * dt)`. The linear
/// term is rolling resistance, the speed-proportional term is drag.
pub fn apply_friction(velocity: &mut Vec2, dt: f32, quadratic: f32, linear: f32) {
    let speed = velocity.length();
    if speed == 0.0 {
        return;
    }
    let new_speed = (speed - (speed * quadratic + linear) * dt).max(0.0);
    *velocity *= new_speed / speed;
}

/// Rotation a rolling ball picked up over one substep.
///
/// The axis lives in the renderer's y-up frame, where table `(x, y)` maps to
/// world `(x, z)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub axis: Vec3,
    pub angle: f32,
}

impl Spin {
    /// Rotate `orientation` about the world-space spin axis.
    pub fn apply(&self, orientation: Quat) -> Quat {
        (Quat::from_axis_angle(self.axis, self.angle) * orientation).normalize()
    }
}

/// Spin for a ball of `radius` that moved by `delta` without slipping.
/// `None` when the ball did not move.
pub fn rolling_spin(delta: Vec2, radius: f32) -> Option<Spin> {
    if delta == Vec2::ZERO {
        return None;
    }
    let distance = delta.length();
    let circumference = TAU * radius;
    // Horizontal axis perpendicular to the motion.
    let axis = Vec3::new(delta.y, 0.0, -delta.x).normalize();
    Some(Spin {
        axis,
        angle: distance / circumference * TAU,
    })
}
