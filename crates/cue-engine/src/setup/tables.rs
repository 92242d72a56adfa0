//! Built-in tables and scenarios.

use glam::Vec2;

use crate::api::types::BodyId;
use crate::core::registry::{Body, Bounds, Pocket, StagingTray, Table, Wall};
use crate::error::ConfigError;
use crate::setup::rack::RackLayout;

pub const POCKET_RADIUS: f32 = 4.5;

const CUSHIONS: [Wall; 6] = [
    // Long rails, split by the side pockets.
    Wall::new(Vec2::new(92.75, 51.0), Vec2::new(6.25, 51.0)),
    Wall::new(Vec2::new(92.75, -51.0), Vec2::new(6.25, -51.0)),
    Wall::new(Vec2::new(-91.75, 51.0), Vec2::new(-5.25, 51.0)),
    Wall::new(Vec2::new(-91.75, -51.0), Vec2::new(-5.25, -51.0)),
    // Short rails.
    Wall::new(Vec2::new(-96.5, -47.25), Vec2::new(-96.5, 47.25)),
    Wall::new(Vec2::new(97.5, -47.25), Vec2::new(97.5, 47.25)),
];

const POCKETS: [Pocket; 6] = [
    Pocket::new(Vec2::new(99.0, 53.0), POCKET_RADIUS),
    Pocket::new(Vec2::new(99.0, -53.0), POCKET_RADIUS),
    Pocket::new(Vec2::new(0.5, 53.0), POCKET_RADIUS),
    Pocket::new(Vec2::new(0.5, -53.0), POCKET_RADIUS),
    Pocket::new(Vec2::new(-98.0, 53.0), POCKET_RADIUS),
    Pocket::new(Vec2::new(-98.0, -53.0), POCKET_RADIUS),
];

/// Table rectangle out to the pocket centers. Anything past it has left
/// the cloth.
const CLOTH: Bounds = Bounds::new(Vec2::new(-98.5, -53.0), Vec2::new(99.5, 53.0));

/// On the floor in front of the near rail, off the cloth.

const STAGING: StagingTray = StagingTray {
    origin: Vec2::new(-100.0, -75.0),
    gap: 0.5,
};

/// Six cushions, six pockets.
pub fn standard_table() -> Result<Table, ConfigError> {
    Table::new(CUSHIONS.to_vec(), POCKETS.to_vec(), CLOTH, STAGING)
}

/// Rack layout matching [`standard_table`].
pub fn standard_rack(ball_radius: f32) -> RackLayout {
    RackLayout::standard(ball_radius)
}

/// A table, its balls and the velocities to kick them off with.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub table: Table,
    pub bodies: Vec<Body>,
    pub launch: Vec<(BodyId, Vec2)>,
}

/// Collision test bench: one wall, no pockets, nine balls. The scripted
/// launch covers ball-ball, inner-wall and wall-endpoint contacts plus a
/// pre-overlapping cluster.
pub fn collision_lab() -> Result<Scenario, ConfigError> {
    let table = Table::new(
        vec![Wall::new(Vec2::new(-1.5, 0.0), Vec2::new(38.5, 0.0))],
        Vec::new(),
        Bounds::new(Vec2::new(-200.0, -200.0), Vec2::new(200.0, 200.0)),
        STAGING,
    )?;

    let bodies = vec![
        Body::new(0, Vec2::new(-40.0, 50.0)),
        Body::new(3, Vec2::new(-20.0, 50.0)),
        Body::new(9, Vec2::new(0.0, 50.0)),
        Body::new(14, Vec2::new(20.0, 50.0)),
        Body::new(8, Vec2::new(40.0, 50.0)),
        Body::new(6, Vec2::new(-39.0, 0.0)),
        Body::new(11, Vec2::new(-41.0, 0.0)),
        Body::new(1, Vec2::new(-40.0, 2.0 * 3f32.sqrt())),
        Body::new(2, Vec2::new(-20.0, 0.0)),
    ];

    let launch = vec![
        (BodyId(0), Vec2::new(0.0, -100.0)),
        (BodyId(1), Vec2::new(0.0, -100.0)),
        (BodyId(2), Vec2::new(20.0, -100.0)),
        (BodyId(3), Vec2::new(0.0, -100.0)),
        (BodyId(4), Vec2::new(0.0, -100.0)),
        (BodyId(8), Vec2::new(0.0, 30.0)),
    ];

    Ok(Scenario {
        table,
        bodies,
        launch,
    })
}
