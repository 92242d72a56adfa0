//! The simulation: owns the table, the balls and the step loop.
//!
//! Each frame is cut into fixed substeps. A substep runs, in order: hole
//! check, one velocity pass, position resolution to convergence (or the cap),
//! then integration with friction and the rolling hint. Commands are applied
//! between frames only.

use glam::Vec2;

use crate::api::config::PhysicsConfig;
use crate::api::types::{BodyId, CollisionEvent, HoldMode};
use crate::core::motion::{apply_friction, integrate, rolling_spin};
use crate::core::pocket::{find_capture, park, Capture};
use crate::core::registry::{Body, BodyRegistry, Table};
use crate::core::resolver::{resolve_positions, velocity_pass, ResolveParams};
use crate::core::rng::Rng;
use crate::core::time::FrameSubsteps;
use crate::error::ConfigError;
use crate::input::queue::{Command, CommandQueue};
use crate::input::shot::shot_velocity;
use crate::setup::rack::RackLayout;
use crate::setup::shuffle::shuffle_parallel;
use crate::setup::tables::{standard_rack, standard_table};

/// Counters for the last call to [`Simulation::step`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepStats {
    pub substeps: u32,
    /// Most position passes any single substep needed.
    pub max_passes: u32,
    /// Substeps whose position resolution hit the pass cap.
    pub unconverged: u32,
    /// Balls taken out of play this frame, in capture order.
    pub captured: Vec<(BodyId, Capture)>,
}

/// Where [`Simulation::reset`] puts the balls back.
#[derive(Debug, Clone)]
enum Home {
    Rack(RackLayout),
    Layout(Vec<Vec2>),
}

pub struct Simulation {
    config: PhysicsConfig,
    params: ResolveParams,
    substeps: FrameSubsteps,
    table: Table,
    bodies: BodyRegistry,
    held: Option<(BodyId, HoldMode)>,
    rng: Rng,
    events: Vec<CollisionEvent>,
    stats: StepStats,
    home: Home,
}

impl Simulation {
    /// Build a simulation over the given balls. Their starting positions
    /// become the layout [`reset`](Self::reset) returns to.
    pub fn new(config: PhysicsConfig, table: Table, bodies: Vec<Body>) -> Result<Self, ConfigError> {
        let home = Home::Layout(bodies.iter().map(|b| b.position).collect());
        Self::with_home(config, table, BodyRegistry::from_bodies(bodies), home)
    }

    /// The full pool game: standard table, fifteen balls racked in a
    /// shuffled order, cue ball last on the cue spot.
    pub fn standard(config: PhysicsConfig) -> Result<Self, ConfigError> {
        let table = standard_table()?;
        let mut rack = standard_rack(config.ball_radius);

        let mut order = rack.order.to_vec();
        shuffle_parallel(config.seed, &mut [&mut order])?;
        rack.order.copy_from_slice(&order);

        let bodies = rack
            .positions()
            .into_iter()
            .map(|(number, position)| Body::new(number, position))
            .collect();

        log::info!("Racked balls in order {:?}", rack.order);
        Self::with_home(config, table, BodyRegistry::from_bodies(bodies), Home::Rack(rack))
    }

    fn with_home(
        config: PhysicsConfig,
        table: Table,
        bodies: BodyRegistry,
        home: Home,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            params: config.resolve_params(),
            substeps: config.frame_substeps(),
            rng: Rng::new(config.seed),
            config,
            table,
            bodies,
            held: None,
            events: Vec::with_capacity(64),
            stats: StepStats::default(),
            home,
        })
    }

    // -- Stepping --

    /// Advance one rendered frame. Returns every contact resolved during
    /// the frame's substeps.
    pub fn step(&mut self, frame_dt: f32) -> &[CollisionEvent] {
        self.events.clear();
        self.stats = StepStats::default();

        let substeps = self.substeps;
        for dt in substeps.split(frame_dt) {
            self.substep(dt);
        }
        &self.events
    }

    fn substep(&mut self, dt: f32) {
        self.capture_pocketed();

        let held = self.held_id();
        let bodies = self.bodies.as_mut_slice();

        velocity_pass(bodies, &self.table, held, &self.params, &mut self.rng, &mut self.events);

        let report = resolve_positions(bodies, &self.table, held, &self.params, &mut self.rng);
        self.stats.max_passes = self.stats.max_passes.max(report.passes);
        if !report.converged {
            self.stats.unconverged += 1;
        }

        let radius = self.config.ball_radius;
        for (i, body) in bodies.iter_mut().enumerate() {
            if !body.active || held == Some(BodyId(i)) {
                continue;
            }
            let before = body.position;
            integrate(&mut body.position, body.velocity, dt);
            apply_friction(
                &mut body.velocity,
                dt,
                self.config.friction_quadratic,
                self.config.friction_linear,
            );
            body.spin = rolling_spin(body.position - before, radius);
            if let Some(spin) = body.spin {
                body.orientation = spin.apply(body.orientation);
            }
        }

        self.stats.substeps += 1;
    }

    /// Take every active ball that sits in a pocket (or left the bounds)
    /// out of play.
    fn capture_pocketed(&mut self) {
        let radius = self.config.ball_radius;
        for i in 0..self.bodies.len() {
            let id = BodyId(i);
            let body = self.bodies.get(id);
            if !body.active {
                continue;
            }
            let capture = match find_capture(body.position, &self.table) {
                Some(capture) => capture,
                None => continue,
            };

            match capture {
                Capture::Pocket(pocket) => {
                    log::info!("Ball {} pocketed into pocket {}", body.number, pocket.0)
                }
                Capture::OutOfBounds => {
                    log::warn!("Ball {} fell out of bounds at {:?}", body.number, body.position)
                }
            }

            park(self.bodies.get_mut(id), &self.table, radius);
            if self.held_id() == Some(id) {
                self.held = None;
            }
            self.stats.captured.push((id, capture));
        }
    }

    // -- Direct commands --

    /// Add `delta` to a ball's velocity.
    pub fn apply_impulse(&mut self, id: BodyId, delta: Vec2) {
        self.bodies.get_mut(id).velocity += delta;
    }

    pub fn set_velocity(&mut self, id: BodyId, velocity: Vec2) {
        self.bodies.get_mut(id).velocity = velocity;
    }

    /// Hold a ball (or let go with `None`). Only one ball is held at a time;
    /// holding another replaces the previous hold. Grabbing for a drag
    /// stops the ball.
    pub fn set_held(&mut self, id: Option<BodyId>, mode: HoldMode) {
        self.held = id.map(|id| (id, mode));
        if let Some(id) = id {
            if mode == HoldMode::Drag {
                self.bodies.get_mut(id).velocity = Vec2::ZERO;
            }
        }
    }

    pub fn release(&mut self) {
        self.held = None;
    }

    pub fn held(&self) -> Option<(BodyId, HoldMode)> {
        self.held
    }

    fn held_id(&self) -> Option<BodyId> {
        self.held.map(|(id, _)| id)
    }

    /// Move a ball. A parked ball dropped back on the table rejoins play.
    pub fn teleport(&mut self, id: BodyId, position: Vec2) {
        let body = self.bodies.get_mut(id);
        if body.active {
            body.position = position;
        } else {
            body.place(position);
        }
    }

    /// Put every ball back where its number sits in `rack`.
    pub fn reset_to_rack(&mut self, rack: &RackLayout) {
        for (_, body) in self.bodies.iter_mut() {
            match rack.position_of(body.number) {
                Some(position) => body.place(position),
                None => log::warn!("Ball {} has no place in the rack", body.number),
            }
        }
        self.held = None;
        log::info!("Balls reset to rack");
    }

    /// Put ball `i` at `positions[i]`.
    ///
    /// # Panics
    /// If `positions` does not hold exactly one entry per ball.
    pub fn reset_to_layout(&mut self, positions: &[Vec2]) {
        assert_eq!(
            positions.len(),
            self.bodies.len(),
            "reset_to_layout needs one position per ball"
        );
        for ((_, body), &position) in self.bodies.iter_mut().zip(positions) {
            body.place(position);
        }
        self.held = None;
        log::info!("Balls reset to layout");
    }

    /// Back to the starting layout.
    pub fn reset(&mut self) {
        match self.home.clone() {
            Home::Rack(rack) => self.reset_to_rack(&rack),
            Home::Layout(positions) => self.reset_to_layout(&positions),
        }
    }

    /// Shift every ball in play by `offset`.
    pub fn scatter(&mut self, offset: Vec2) {
        for (_, body) in self.bodies.iter_mut() {
            if body.active {
                body.position += offset;
            }
        }
    }

    /// Apply all queued commands, in order.
    pub fn apply_commands(&mut self, queue: &mut CommandQueue) {
        for command in queue.drain() {
            match command {
                Command::Aim { body } => self.set_held(Some(body), HoldMode::Aim),
                Command::Shoot { drag } => match self.held {
                    Some((id, HoldMode::Aim)) => {
                        let velocity =
                            shot_velocity(drag, self.config.max_drag, self.config.max_shot_speed);
                        self.release();
                        self.apply_impulse(id, velocity);
                        log::info!("Shot ball {} with velocity {:?}", id.0, velocity);
                    }
                    _ => log::debug!("Shoot ignored: no ball is being aimed"),
                },
                Command::Grab { body } => self.set_held(Some(body), HoldMode::Drag),
                Command::DragTo { position } => match self.held {
                    Some((id, HoldMode::Drag)) => self.teleport(id, position),
                    _ => log::debug!("DragTo ignored: no ball is grabbed"),
                },
                Command::Release => self.release(),
                Command::Reset => self.reset(),
                Command::ResetLayout(positions) => self.reset_to_layout(&positions),
                Command::Launch(velocities) => {
                    for (id, velocity) in velocities {
                        self.set_velocity(id, velocity);
                    }
                }
                Command::Scatter { offset } => self.scatter(offset),
            }
        }
    }

    // -- Accessors --

    pub fn bodies(&self) -> &BodyRegistry {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> &Body {
        self.bodies.get(id)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn stats(&self) -> &StepStats {
        &self.stats
    }

    /// Events from the last frame.
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Playback volume for `event` using the configured impact scale.
    pub fn impact_volume(&self, event: &CollisionEvent) -> f32 {
        event.volume(self.config.impact_volume_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Contact;
    use crate::core::geometry::circle_in_pocket;
    use crate::core::registry::{Bounds, StagingTray};
    use crate::setup::tables::collision_lab;

    const DT: f32 = 1.0 / 60.0;

    fn open_table() -> Table {
        Table::new(
            Vec::new(),
            Vec::new(),
            Bounds::new(Vec2::new(-200.0, -200.0), Vec2::new(200.0, 200.0)),
            StagingTray {
                origin: Vec2::new(-100.0, -150.0),
                gap: 0.5,
            },
        )
        .unwrap()
    }

    fn sim(bodies: Vec<Body>) -> Simulation {
        Simulation::new(PhysicsConfig::default(), open_table(), bodies).unwrap()
    }

    #[test]
    fn resting_overlap_is_separated_without_moving() {
        let mut s = sim(vec![
            Body::new(1, Vec2::new(0.0, 0.0)),
            Body::new(2, Vec2::new(3.0, 0.0)),
        ]);
        s.step(DT);

        let eps = s.config().epsilon;
        let a = s.body(BodyId(0));
        let b = s.body(BodyId(1));
        assert!(
            a.position.distance(b.position) >= 4.0 + eps * 0.99,
            "distance was {}",
            a.position.distance(b.position)
        );
        assert_eq!(a.velocity, Vec2::ZERO);
        assert_eq!(b.velocity, Vec2::ZERO);
        assert!(s.stats().max_passes >= 2);
        assert_eq!(s.stats().unconverged, 0);
    }

    #[test]
    fn impact_volume_uses_configured_scale() {
        let config = PhysicsConfig {
            impact_volume_scale: 0.02,
            ..PhysicsConfig::default()
        };
        let mut s = Simulation::new(
            config,
            open_table(),
            vec![
                Body::new(1, Vec2::new(0.0, 0.0)).with_velocity(Vec2::new(10.0, 0.0)),
                Body::new(2, Vec2::new(3.9, 0.0)),
            ],
        )
        .unwrap();
        let event = s.step(DT)[0];
        assert!((event.impact_speed - 10.0).abs() < 1e-4);
        assert!((s.impact_volume(&event) - 0.2).abs() < 1e-4);
    }

    #[test]
    fn sixteen_substeps_per_frame() {
        let mut s = sim(vec![Body::new(1, Vec2::ZERO)]);
        s.step(DT);
        assert_eq!(s.stats().substeps, 16);
        s.step(0.0);
        assert_eq!(s.stats().substeps, 0);
    }

    #[test]
    fn ball_in_pocket_is_parked_and_leaves_play() {
        let table = standard_table().unwrap();
        let pocket = table.pockets()[2];
        let mut s = Simulation::new(
            PhysicsConfig::default(),
            table,
            vec![Body::new(5, pocket.center), Body::new(6, Vec2::new(-20.0, 0.0))],
        )
        .unwrap();

        s.step(DT);

        let parked = s.body(BodyId(0)).clone();
        assert!(!parked.active);
        assert_eq!(parked.velocity, Vec2::ZERO);
        assert!(!circle_in_pocket(
            parked.position,
            pocket.center,
            pocket.radius,
            s.table().bounds()
        ));
        assert_eq!(s.stats().captured.len(), 1);
        assert!(matches!(s.stats().captured[0], (BodyId(0), Capture::Pocket(_))));

        // Dropping a live ball onto the parked one never touches it: the
        // live ball is off the cloth and gets captured first.
        s.teleport(BodyId(1), parked.position + Vec2::new(1.0, 0.0));
        s.set_velocity(BodyId(1), Vec2::new(-10.0, 0.0));
        let events = s.step(DT).to_vec();
        assert!(events.iter().all(|e| e.body != BodyId(0) && e.contact != Contact::Ball(BodyId(0))));
        assert_eq!(s.body(BodyId(0)).position, parked.position);
        assert_eq!(s.stats().captured, vec![(BodyId(1), Capture::OutOfBounds)]);
    }

    #[test]
    fn escaped_ball_is_captured_out_of_bounds() {
        let mut s = Simulation::new(
            PhysicsConfig::default(),
            standard_table().unwrap(),
            vec![Body::new(3, Vec2::new(150.0, 0.0))],
        )
        .unwrap();
        s.step(DT);
        assert!(!s.body(BodyId(0)).active);
        assert_eq!(s.stats().captured, vec![(BodyId(0), Capture::OutOfBounds)]);
    }

    #[test]
    fn ball_past_the_rail_is_captured() {
        let mut s = Simulation::standard(PhysicsConfig::default()).unwrap();
        let cue = BodyId(15);
        s.teleport(cue, Vec2::new(94.5, 54.0));
        s.set_velocity(cue, Vec2::new(-3.0, 4.0));
        s.step(DT);

        assert!(!s.body(cue).active);
        assert_eq!(s.stats().captured, vec![(cue, Capture::OutOfBounds)]);
        assert_eq!(s.body(cue).position, s.table().staging().slot(0, 2.0));
    }

    #[test]
    fn held_ball_is_neither_resolved_nor_moved() {
        let mut s = sim(vec![
            Body::new(0, Vec2::new(0.0, 0.0)).with_velocity(Vec2::new(5.0, 0.0)),
            Body::new(1, Vec2::new(3.0, 0.0)),
        ]);
        s.set_held(Some(BodyId(0)), HoldMode::Aim);
        let events = s.step(DT).to_vec();

        assert!(events.is_empty());
        assert_eq!(s.body(BodyId(0)).position, Vec2::new(0.0, 0.0));
        assert_eq!(s.body(BodyId(1)).position, Vec2::new(3.0, 0.0));

        s.release();
        s.step(DT);
        assert!(s.body(BodyId(0)).position.distance(s.body(BodyId(1)).position) >= 4.0);
    }

    #[test]
    fn drag_grab_stops_the_ball() {
        let mut s = sim(vec![Body::new(0, Vec2::ZERO).with_velocity(Vec2::new(20.0, 0.0))]);
        s.set_held(Some(BodyId(0)), HoldMode::Drag);
        assert_eq!(s.body(BodyId(0)).velocity, Vec2::ZERO);
        assert_eq!(s.held(), Some((BodyId(0), HoldMode::Drag)));
    }

    #[test]
    fn capturing_held_ball_releases_it() {
        let table = standard_table().unwrap();
        let corner = table.pockets()[0].center;
        let mut s = Simulation::new(PhysicsConfig::default(), table, vec![Body::new(0, Vec2::ZERO)])
            .unwrap();
        s.set_held(Some(BodyId(0)), HoldMode::Drag);
        s.teleport(BodyId(0), corner);
        s.step(DT);
        assert!(!s.body(BodyId(0)).active);
        assert_eq!(s.held(), None);

        // Dropping it back on the table brings it back into play.
        s.teleport(BodyId(0), Vec2::new(10.0, 10.0));
        assert!(s.body(BodyId(0)).active);
        assert_eq!(s.body(BodyId(0)).position, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn friction_brings_a_lone_ball_to_rest() {
        let mut s = sim(vec![Body::new(0, Vec2::ZERO).with_velocity(Vec2::new(50.0, 0.0))]);
        let mut last = 50.0;
        for _ in 0..400 {
            s.step(DT);
            let speed = s.body(BodyId(0)).velocity.length();
            assert!(speed <= last);
            last = speed;
        }
        assert_eq!(s.body(BodyId(0)).velocity, Vec2::ZERO);
        assert!(s.body(BodyId(0)).position.x > 0.0);
    }

    #[test]
    fn rolling_ball_turns() {
        let mut s = sim(vec![Body::new(0, Vec2::ZERO).with_velocity(Vec2::new(30.0, 0.0))]);
        s.step(DT);
        let body = s.body(BodyId(0));
        assert!(body.spin.is_some());
        assert_ne!(body.orientation, glam::Quat::IDENTITY);
    }

    #[test]
    fn standard_game_racks_sixteen_balls() {
        let mut s = Simulation::standard(PhysicsConfig::default()).unwrap();
        assert_eq!(s.bodies().len(), 16);

        let cue = s.body(BodyId(15));
        assert_eq!(cue.number, 0);
        assert_eq!(cue.position, Vec2::new(30.0, 0.0));

        let mut numbers: Vec<u8> = s.bodies().iter().map(|(_, b)| b.number).collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (0..16).collect::<Vec<u8>>());

        // Nothing touches at rest.
        assert!(s.step(DT).is_empty());
        assert_eq!(s.bodies().active_count(), 16);
    }

    #[test]
    fn same_seed_same_rack() {
        let a = Simulation::standard(PhysicsConfig::default()).unwrap();
        let b = Simulation::standard(PhysicsConfig::default()).unwrap();
        assert_eq!(a.bodies().as_slice(), b.bodies().as_slice());
    }

    #[test]
    fn aim_and_shoot() {
        let mut s = sim(vec![Body::new(0, Vec2::ZERO)]);
        let mut queue = CommandQueue::new();
        queue.push(Command::Aim { body: BodyId(0) });
        queue.push(Command::Shoot { drag: Vec2::new(15.0, 0.0) });
        s.apply_commands(&mut queue);

        assert!(queue.is_empty());
        assert_eq!(s.held(), None);
        // Half drag, quarter speed.
        assert!((s.body(BodyId(0)).velocity - Vec2::new(250.0, 0.0)).length() < 1e-2);
    }

    #[test]
    fn shoot_without_aim_does_nothing() {
        let mut s = sim(vec![Body::new(0, Vec2::ZERO)]);
        let mut queue = CommandQueue::new();
        queue.push(Command::Shoot { drag: Vec2::new(15.0, 0.0) });
        s.apply_commands(&mut queue);
        assert_eq!(s.body(BodyId(0)).velocity, Vec2::ZERO);
    }

    #[test]
    fn grab_drag_and_reset() {
        let mut s = sim(vec![Body::new(0, Vec2::ZERO), Body::new(1, Vec2::new(10.0, 0.0))]);
        let mut queue = CommandQueue::new();
        queue.push(Command::Grab { body: BodyId(1) });
        queue.push(Command::DragTo { position: Vec2::new(20.0, 5.0) });
        queue.push(Command::Release);
        s.apply_commands(&mut queue);
        assert_eq!(s.body(BodyId(1)).position, Vec2::new(20.0, 5.0));
        assert_eq!(s.held(), None);

        queue.push(Command::Scatter { offset: Vec2::new(0.0, 30.0) });
        s.apply_commands(&mut queue);
        assert_eq!(s.body(BodyId(0)).position, Vec2::new(0.0, 30.0));

        queue.push(Command::Reset);
        s.apply_commands(&mut queue);
        assert_eq!(s.body(BodyId(0)).position, Vec2::ZERO);
        assert_eq!(s.body(BodyId(1)).position, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn reset_to_rack_restores_every_ball() {
        let mut s = Simulation::standard(PhysicsConfig::default()).unwrap();
        let start: Vec<Vec2> = s.bodies().iter().map(|(_, b)| b.position).collect();
        s.apply_impulse(BodyId(15), Vec2::new(-400.0, 3.0));
        for _ in 0..60 {
            s.step(DT);
        }
        s.reset();
        for ((_, body), &p) in s.bodies().iter().zip(&start) {
            assert_eq!(body.position, p);
            assert_eq!(body.velocity, Vec2::ZERO);
            assert!(body.active);
        }
    }

    #[test]
    #[should_panic(expected = "one position per ball")]
    fn reset_to_layout_rejects_wrong_length() {
        let mut s = sim(vec![Body::new(0, Vec2::ZERO), Body::new(1, Vec2::new(10.0, 0.0))]);
        s.reset_to_layout(&[Vec2::ZERO]);
    }

    #[test]
    fn collision_lab_runs_clean() {
        let lab = collision_lab().unwrap();
        let mut s = Simulation::new(PhysicsConfig::default(), lab.table, lab.bodies).unwrap();
        let mut queue = CommandQueue::new();
        queue.push(Command::Launch(lab.launch));
        s.apply_commands(&mut queue);

        let mut walls = 0;
        let mut balls = 0;
        for _ in 0..120 {
            for event in s.step(DT) {
                match event.contact {
                    Contact::Wall(_) => walls += 1,
                    Contact::Ball(_) => balls += 1,
                }
                assert!(event.impact_speed.is_finite());
            }
            assert!(s.stats().max_passes <= s.config().max_resolve_passes);
        }
        assert!(walls > 0);
        assert!(balls > 0);
        assert!(s
            .bodies()
            .iter()
            .all(|(_, b)| b.position.is_finite() && b.velocity.is_finite() && b.active));
    }
}
