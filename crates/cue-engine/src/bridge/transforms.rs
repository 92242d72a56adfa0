use bytemuck::{Pod, Zeroable};

use crate::api::types::{CollisionEvent, Contact};
use crate::core::registry::Body;
use crate::core::simulation::Simulation;

/// Per-ball transform written to shared memory for the renderer.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyTransform {
    /// Table-plane position.
    pub x: f32,
    pub y: f32,
    /// Rolling orientation quaternion, renderer's y-up frame.
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
    /// 1.0 in play, 0.0 parked in the staging tray.
    pub active: f32,
    /// Catalog number, so the renderer can pick mesh and shading.
    pub number: f32,
}

impl BodyTransform {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_body(body: &Body) -> Self {
        let q = body.orientation;
        Self {
            x: body.position.x,
            y: body.position.y,
            qx: q.x,
            qy: q.y,
            qz: q.z,
            qw: q.w,
            active: if body.active { 1.0 } else { 0.0 },
            number: body.number as f32,
        }
    }
}

/// Event kind tags for [`EventRecord::kind`].
pub const EVENT_KIND_BALL: f32 = 0.0;
pub const EVENT_KIND_WALL: f32 = 1.0;

/// One collision for the audio layer. 4 floats = 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EventRecord {
    pub body: f32,
    /// Other ball index, or wall index when `kind` is [`EVENT_KIND_WALL`].
    pub other: f32,
    pub kind: f32,
    pub impact_speed: f32,
}

impl EventRecord {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_event(event: &CollisionEvent) -> Self {
        let (other, kind) = match event.contact {
            Contact::Ball(id) => (id.0, EVENT_KIND_BALL),
            Contact::Wall(id) => (id.0, EVENT_KIND_WALL),
        };
        Self {
            body: event.body.0 as f32,
            other: other as f32,
            kind,
            impact_speed: event.impact_speed,
        }
    }
}

/// Flat per-frame output: one transform per ball, one record per event.
pub struct TransformBuffer {
    pub transforms: Vec<BodyTransform>,
    pub events: Vec<EventRecord>,
}

impl TransformBuffer {
    pub fn new() -> Self {
        Self {
            transforms: Vec::with_capacity(16),
            events: Vec::with_capacity(64),
        }
    }

    pub fn clear(&mut self) {
        self.transforms.clear();
        self.events.clear();
    }

    /// Refill from the simulation's current balls and last frame's events.
    pub fn fill(&mut self, sim: &Simulation) {
        self.clear();
        self.transforms
            .extend(sim.bodies().iter().map(|(_, body)| BodyTransform::from_body(body)));
        self.events.extend(sim.events().iter().map(EventRecord::from_event));
    }

    pub fn transform_count(&self) -> u32 {
        self.transforms.len() as u32
    }

    pub fn event_count(&self) -> u32 {
        self.events.len() as u32
    }

    pub fn transform_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.transforms)
    }

    pub fn event_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.events)
    }

    /// Raw pointer to transform data for shared-memory reads.
    pub fn transforms_ptr(&self) -> *const f32 {
        self.transforms.as_ptr() as *const f32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }
}

impl Default for TransformBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Write current transforms and last frame's events into `buffer`.
    pub fn write_transforms(&self, buffer: &mut TransformBuffer) {
        buffer.fill(self);
    }
}
