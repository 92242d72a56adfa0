use glam::{Quat, Vec2};
use serde::{Deserialize, Serialize};

use crate::api::types::BodyId;
use crate::core::motion::Spin;
use crate::error::ConfigError;

/// One simulated ball.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// `false` once the ball has been pocketed and parked in the staging tray.
    pub active: bool,
    /// Catalog number (0 = cue ball). Picks the staging slot on capture.
    pub number: u8,
    /// Accumulated rolling orientation, for rendering only.
    pub orientation: Quat,
    /// Rotation produced by the most recent substep, for rendering only.
    pub spin: Option<Spin>,
}

impl Body {
    pub fn new(number: u8, position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            active: true,
            number,
            orientation: Quat::IDENTITY,
            spin: None,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Put the ball back at rest at `position` with a fresh orientation.
    pub fn place(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.active = true;
        self.orientation = Quat::IDENTITY;
        self.spin = None;
    }
}

/// A straight cushion segment. Must have non-zero length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub p0: Vec2,
    pub p1: Vec2,
}

impl Wall {
    pub const fn new(p0: Vec2, p1: Vec2) -> Self {
        Self { p0, p1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pocket {
    pub center: Vec2,
    pub radius: f32,
}

impl Pocket {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Axis-aligned rectangle. Bodies outside it are treated as fallen through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Row of parking slots for pocketed balls, keyed by ball number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StagingTray {
    pub origin: Vec2,
    /// Free space left between neighbouring parked balls.
    pub gap: f32,
}

impl StagingTray {
    /// Slot used by the cue ball, after the fifteen numbered balls.
    pub const CUE_SLOT: u8 = 16;

    /// Parking position for `number`. Distinct numbers never overlap.
    pub fn slot(&self, number: u8, ball_radius: f32) -> Vec2 {
        let slot = if number == 0 { Self::CUE_SLOT } else { number };
        self.origin + Vec2::new(slot as f32 * (2.0 * ball_radius + self.gap), 0.0)
    }
}

/// Serialized form of a [`Table`], validated by [`Table::from_json`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableDesc {
    walls: Vec<Wall>,
    #[serde(default)]
    pockets: Vec<Pocket>,
    bounds: Bounds,
    staging: StagingTray,
}

/// Immutable table geometry: cushions, pockets, bounds and staging tray.
///
/// Bounds are only enforced by the hole check, so a table without pockets
/// never captures anything and balls may roll off it freely.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    walls: Vec<Wall>,
    pockets: Vec<Pocket>,
    bounds: Bounds,
    staging: StagingTray,
}

impl Table {
    /// Build a table, rejecting zero-length walls.
    pub fn new(
        walls: Vec<Wall>,
        pockets: Vec<Pocket>,
        bounds: Bounds,
        staging: StagingTray,
    ) -> Result<Self, ConfigError> {
        if let Some(index) = walls.iter().position(|w| w.p0 == w.p1) {
            return Err(ConfigError::DegenerateWall { index });
        }
        Ok(Self {
            walls,
            pockets,
            bounds,
            staging,
        })
    }

    /// Parse and validate a table from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let desc: TableDesc = serde_json::from_str(json)?;
        Self::new(desc.walls, desc.pockets, desc.bounds, desc.staging)
    }

    /// Serialize the table geometry to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        let desc = TableDesc {
            walls: self.walls.clone(),
            pockets: self.pockets.clone(),
            bounds: self.bounds,
            staging: self.staging,
        };
        Ok(serde_json::to_string_pretty(&desc)?)
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn pockets(&self) -> &[Pocket] {
        &self.pockets
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn staging(&self) -> &StagingTray {
        &self.staging
    }
}

/// Ordered, fixed-size ball storage. Slots are never removed, so a
/// [`BodyId`] stays valid for the life of the registry.
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self {
            bodies: Vec::with_capacity(16),
        }
    }

    pub fn from_bodies(bodies: Vec<Body>) -> Self {
        Self { bodies }
    }

    /// Append a body and return its handle. Setup only.
    pub fn insert(&mut self, body: Body) -> BodyId {
        self.bodies.push(body);
        BodyId(self.bodies.len() - 1)
    }

    /// Panics on an id that was not issued by this registry.
    pub fn get(&self, id: BodyId) -> &Body {
        &self.bodies[id.0]
    }

    pub fn get_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyId, &mut Body)> {
        self.bodies.iter_mut().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Find the body carrying a catalog number.
    pub fn find_by_number(&self, number: u8) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.number == number).map(BodyId)
    }

    pub fn active_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.active).count()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
