//! Collision response: velocity exchange first, then iterative de-penetration.
//!
//! Pairs are processed one at a time in index order, so with three or more
//! balls in contact the result depends on that order. That is a known
//! approximation of the pairwise scheme, not something the passes try to fix.

use glam::Vec2;

use crate::api::types::{BodyId, CollisionEvent, Contact, WallId};
use crate::core::geometry::{circle_overlaps_circle, classify_wall_contact, WallContact};
use crate::core::registry::{Body, Table, Wall};
use crate::core::rng::Rng;

/// Tuning shared by both resolution passes.
#[derive(Debug, Clone, Copy)]
pub struct ResolveParams {
    pub radius: f32,
    /// Coefficient of restitution for ball-ball contacts, in (0, 1].
    pub restitution: f32,
    /// Extra clearance left after separating, and size of degenerate nudges.
    pub epsilon: f32,
    pub max_passes: u32,
}

/// Outcome of one position-resolution loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionReport {
    pub passes: u32,
    /// `false` when the pass cap was hit with overlaps remaining.
    pub converged: bool,
}

// ---------------------------------------------------------------------------
// Pair-level response
// ---------------------------------------------------------------------------

/// Exchange velocities between two touching balls of equal mass.
///
/// The fully elastic result is blended with the momentum-conserving average:
/// `v' = cor * v_elastic + (1 - cor) * v_avg`.
pub fn resolve_velocity_circle_circle(
    p0: &mut Vec2,
    v0: &mut Vec2,
    p1: Vec2,
    v1: &mut Vec2,
    cor: f32,
    epsilon: f32,
    rng: &mut Rng,
) {
    if p0.distance_squared(p1) == 0.0 {
        *p0 += rng.jitter(epsilon);
    }

    let d01 = *p0 - p1;
    let d10 = -d01;
    let dist_sq = d01.length_squared();

    let ev0 = *v0 - d01 * ((*v0 - *v1).dot(d01) / dist_sq);
    let ev1 = *v1 - d10 * ((*v1 - *v0).dot(d10) / dist_sq);
    let avg = (ev0 + ev1) * 0.5;

    *v0 = ev0 * cor + avg * (1.0 - cor);
    *v1 = ev1 * cor + avg * (1.0 - cor);
}

/// Push two overlapping balls apart symmetrically about their midpoint.
pub fn resolve_position_circle_circle(
    p0: &mut Vec2,
    p1: &mut Vec2,
    radius: f32,
    epsilon: f32,
    rng: &mut Rng,
) {
    if p0.distance_squared(*p1) == 0.0 {
        *p0 += rng.jitter(epsilon);
    }

    let mid = (*p0 + *p1) * 0.5;
    let clearance = radius + epsilon;
    *p0 = mid + (*p0 - mid).normalize() * clearance;
    *p1 = mid + (*p1 - mid).normalize() * clearance;
}

/// Reflect off the straight span of a wall.
pub fn resolve_velocity_segment_inner(p: &mut Vec2, v: &mut Vec2, wall: &Wall, epsilon: f32, rng: &mut Rng) {
    unstick_from_endpoints(p, wall, epsilon, rng);
    let (_, normal) = span_normal(*p, wall, epsilon, rng);
    *v = reflect(*v, normal.normalize());
}

/// Reflect off the endpoint of a wall nearest to the ball.
pub fn resolve_velocity_segment_outer(p: &mut Vec2, v: &mut Vec2, wall: &Wall, epsilon: f32, rng: &mut Rng) {
    unstick_from_endpoints(p, wall, epsilon, rng);
    let cap = nearest_endpoint(*p, wall);
    *v = reflect(*v, (*p - cap).normalize());
}

/// Move a ball off the straight span of a wall to `radius + epsilon` clearance.
pub fn resolve_position_segment_inner(p: &mut Vec2, wall: &Wall, radius: f32, epsilon: f32, rng: &mut Rng) {
    unstick_from_endpoints(p, wall, epsilon, rng);
    let (along, normal) = span_normal(*p, wall, epsilon, rng);
    *p = wall.p0 + along + normal.normalize() * (radius + epsilon);
}

/// Move a ball off the nearest wall endpoint to `radius + epsilon` clearance.
pub fn resolve_position_segment_outer(p: &mut Vec2, wall: &Wall, radius: f32, epsilon: f32, rng: &mut Rng) {
    unstick_from_endpoints(p, wall, epsilon, rng);
    let cap = nearest_endpoint(*p, wall);
    *p = cap + (*p - cap).normalize() * (radius + epsilon);
}

fn reflect(v: Vec2, normal: Vec2) -> Vec2 {
    v - normal * (2.0 * v.dot(normal))
}

fn unstick_from_endpoints(p: &mut Vec2, wall: &Wall, epsilon: f32, rng: &mut Rng) {
    if p.distance_squared(wall.p0) == 0.0 || p.distance_squared(wall.p1) == 0.0 {
        *p += rng.jitter(epsilon);
    }
}

fn nearest_endpoint(p: Vec2, wall: &Wall) -> Vec2 {
    if p.distance_squared(wall.p0) < p.distance_squared(wall.p1) {
        wall.p0
    } else {
        wall.p1
    }
}

/// Split `p - p0` into its projection on the wall and the orthogonal rest.
/// The orthogonal part is never zero: a center lying on the wall line gets
/// a nudge to a random side.
fn span_normal(p: Vec2, wall: &Wall, epsilon: f32, rng: &mut Rng) -> (Vec2, Vec2) {
    let a = p - wall.p0;
    let b = wall.p1 - wall.p0;
    let along = b * (a.dot(b) / b.dot(b));
    let mut normal = a - along;
    if normal.length_squared() == 0.0 {
        let side = if rng.next_f32() < 0.5 { -epsilon } else { epsilon };
        normal = b.perp().normalize() * side;
    }
    (along, normal)
}

// ---------------------------------------------------------------------------
// Passes over the whole table
// ---------------------------------------------------------------------------

fn takes_part(body: &Body, id: BodyId, held: Option<BodyId>) -> bool {
    body.active && held != Some(id)
}

/// Borrow two distinct bodies mutably. Requires `i < j`.
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// One velocity pass: every participating ball against every wall, then
/// against every later ball. Each resolved contact is pushed to `events`.
pub fn velocity_pass(
    bodies: &mut [Body],
    table: &Table,
    held: Option<BodyId>,
    params: &ResolveParams,
    rng: &mut Rng,
    events: &mut Vec<CollisionEvent>,
) {
    let r = params.radius;
    for i in 0..bodies.len() {
        if !takes_part(&bodies[i], BodyId(i), held) {
            continue;
        }

        for (w, wall) in table.walls().iter().enumerate() {
            let body = &mut bodies[i];
            let before = body.velocity;
            match classify_wall_contact(body.position, r, wall) {
                Some(WallContact::Inner) => resolve_velocity_segment_inner(
                    &mut body.position,
                    &mut body.velocity,
                    wall,
                    params.epsilon,
                    rng,
                ),
                Some(WallContact::Outer) => resolve_velocity_segment_outer(
                    &mut body.position,
                    &mut body.velocity,
                    wall,
                    params.epsilon,
                    rng,
                ),
                None => continue,
            }
            events.push(CollisionEvent {
                body: BodyId(i),
                contact: Contact::Wall(WallId(w)),
                impact_speed: (body.velocity - before).length(),
            });
        }

        for j in (i + 1)..bodies.len() {
            if !takes_part(&bodies[j], BodyId(j), held) {
                continue;
            }
            let (a, b) = pair_mut(bodies, i, j);
            if !circle_overlaps_circle(a.position, b.position, r) {
                continue;
            }
            let impact_speed = a.velocity.distance(b.velocity);
            resolve_velocity_circle_circle(
                &mut a.position,
                &mut a.velocity,
                b.position,
                &mut b.velocity,
                params.restitution,
                params.epsilon,
                rng,
            );
            events.push(CollisionEvent {
                body: BodyId(i),
                contact: Contact::Ball(BodyId(j)),
                impact_speed,
            });
        }
    }
}

/// One de-penetration pass. Returns the number of overlaps it fixed.
pub fn position_pass(
    bodies: &mut [Body],
    table: &Table,
    held: Option<BodyId>,
    params: &ResolveParams,
    rng: &mut Rng,
) -> usize {
    let r = params.radius;
    let eps = params.epsilon;
    let mut fixed = 0;
    for i in 0..bodies.len() {
        if !takes_part(&bodies[i], BodyId(i), held) {
            continue;
        }

        for wall in table.walls() {
            let p = &mut bodies[i].position;
            match classify_wall_contact(*p, r, wall) {
                Some(WallContact::Inner) => resolve_position_segment_inner(p, wall, r, eps, rng),
                Some(WallContact::Outer) => resolve_position_segment_outer(p, wall, r, eps, rng),
                None => continue,
            }
            fixed += 1;
        }

        for j in (i + 1)..bodies.len() {
            if !takes_part(&bodies[j], BodyId(j), held) {
                continue;
            }
            let (a, b) = pair_mut(bodies, i, j);
            if circle_overlaps_circle(a.position, b.position, r) {
                resolve_position_circle_circle(&mut a.position, &mut b.position, r, eps, rng);
                fixed += 1;
            }
        }
    }
    fixed
}

/// Repeat [`position_pass`] until a pass finds nothing or the cap is reached.
pub fn resolve_positions(
    bodies: &mut [Body],
    table: &Table,
    held: Option<BodyId>,
    params: &ResolveParams,
    rng: &mut Rng,
) -> PositionReport {
    let mut report = PositionReport::default();
    while report.passes < params.max_passes {
        report.passes += 1;
        if position_pass(bodies, table, held, params, rng) == 0 {
            report.converged = true;
            break;
        }
    }
    if !report.converged {
        log::debug!(
            "Position resolution stopped after {} passes with overlaps left",
            report.passes
        );
    }
    report
}
