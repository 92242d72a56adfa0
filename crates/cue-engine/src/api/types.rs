/// Stable index of a ball in the body registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// Index of a cushion segment on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallId(pub usize);

/// Index of a pocket on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PocketId(pub usize);

/// How a held body is being manipulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldMode {
    /// Lining up a shot. The ball stays put until released.
    Aim,
    /// Picked up and moved around with `teleport`.
    Drag,
}

/// What a ball hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Ball(BodyId),
    Wall(WallId),
}

/// A resolved contact, emitted once per velocity pass for the audio layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub body: BodyId,
    pub contact: Contact,
    /// Relative speed at impact (ball-ball) or speed change (ball-wall).
    pub impact_speed: f32,
}

impl CollisionEvent {
    /// Playback volume for this impact, `impact_speed * scale` clamped to [0, 1].
    pub fn volume(&self, scale: f32) -> f32 {
        (self.impact_speed * scale).clamp(0.0, 1.0)
    }
}
