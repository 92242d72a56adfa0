//! Turning a drag gesture into a cue ball velocity.

use glam::Vec2;

/// Velocity delta for a shot aimed along `drag` (from the ball toward the
/// pointer).
///
/// The drag is clamped to `max_drag`; speed grows with the square of the
/// clamped length, reaching `max_speed` at a full-length drag.
pub fn shot_velocity(drag: Vec2, max_drag: f32, max_speed: f32) -> Vec2 {
    let length = drag.length();
    if length == 0.0 || max_drag <= 0.0 {
        return Vec2::ZERO;
    }
    let power = length.min(max_drag) / max_drag;
    drag / length * (power * power * max_speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_drag_gives_max_speed() {
        let v = shot_velocity(Vec2::new(30.0, 0.0), 30.0, 1000.0);
        assert!((v - Vec2::new(1000.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn speed_is_quadratic_in_drag() {
        let v = shot_velocity(Vec2::new(0.0, -15.0), 30.0, 1000.0);
        assert!((v - Vec2::new(0.0, -250.0)).length() < 1e-3, "v = {:?}", v);
    }

    #[test]
    fn long_drags_are_clamped() {
        let v = shot_velocity(Vec2::new(300.0, 400.0), 30.0, 1000.0);
        assert!((v.length() - 1000.0).abs() < 1e-2);
        assert!((v.normalize() - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn zero_drag_is_no_shot() {
        assert_eq!(shot_velocity(Vec2::ZERO, 30.0, 1000.0), Vec2::ZERO);
    }
}
