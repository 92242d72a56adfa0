//! Contact predicates for circles against circles, wall segments and pockets.
//!
//! All balls share one radius, so the circle-circle test takes a single `r`.

use glam::Vec2;

use crate::core::registry::{Bounds, Wall};

/// Which part of a wall segment a circle touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallContact {
    /// Along the straight span between the endpoints.
    Inner,
    /// Around one of the rounded endpoint caps.
    Outer,
}

/// True iff the two circles touch or overlap (`|a - b| <= 2r`).
pub fn circle_overlaps_circle(a: Vec2, b: Vec2, r: f32) -> bool {
    a.distance_squared(b) <= (2.0 * r) * (2.0 * r)
}

/// True iff the circle strictly overlaps either endpoint of the segment.
pub fn circle_overlaps_segment_outer(p: Vec2, r: f32, s0: Vec2, s1: Vec2) -> bool {
    let r_sq = r * r;
    p.distance_squared(s0) < r_sq || p.distance_squared(s1) < r_sq
}

/// True iff the foot of the perpendicular from `p` lies on the segment and
/// is within `r` of `p`.
///
/// The segment must have non-zero length.
pub fn circle_overlaps_segment_inner(p: Vec2, r: f32, s0: Vec2, s1: Vec2) -> bool {
    let dir = s1 - s0;
    let t = (p - s0).dot(dir) / dir.length_squared();
    let foot = s0 + dir * t;

    if foot.distance_squared(p) > r * r {
        return false;
    }
    // Foot must be on the s0 side of s1 and on the s1 side of s0.
    (foot - s0).dot(dir) >= 0.0 && (foot - s1).dot(-dir) >= 0.0
}

/// Classify a circle's contact with a wall, preferring the straight span.
pub fn classify_wall_contact(p: Vec2, r: f32, wall: &Wall) -> Option<WallContact> {
    if circle_overlaps_segment_inner(p, r, wall.p0, wall.p1) {
        Some(WallContact::Inner)
    } else if circle_overlaps_segment_outer(p, r, wall.p0, wall.p1) {
        Some(WallContact::Outer)
    } else {
        None
    }
}

/// True if `p` is inside the pocket or has left the table bounds.
pub fn circle_in_pocket(p: Vec2, pocket_center: Vec2, pocket_radius: f32, bounds: &Bounds) -> bool {
    if !bounds.contains(p) {
        return true;
    }
    p.distance_squared(pocket_center) <= pocket_radius * pocket_radius
}
