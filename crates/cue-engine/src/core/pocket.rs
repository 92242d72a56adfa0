//! Hole capture: pocketed or escaped balls leave play and go to the tray.

use glam::Vec2;

use crate::api::types::PocketId;
use crate::core::geometry::circle_in_pocket;
use crate::core::registry::{Body, Table};

/// Why a ball left play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Pocket(PocketId),
    /// Left the table bounds (tunneled through a cushion).
    OutOfBounds,
}

/// Check a position against every pocket on the table.
///
/// Tables without pockets never capture, bounds included.
pub fn find_capture(position: Vec2, table: &Table) -> Option<Capture> {
    let hit = table
        .pockets()
        .iter()
        .position(|pocket| circle_in_pocket(position, pocket.center, pocket.radius, table.bounds()))?;

    if table.bounds().contains(position) {
        Some(Capture::Pocket(PocketId(hit)))
    } else {
        Some(Capture::OutOfBounds)
    }
}

/// Take a ball out of play and park it in its staging slot.
pub fn park(body: &mut Body, table: &Table, ball_radius: f32) {
    let slot = table.staging().slot(body.number, ball_radius);
    body.place(slot);
    body.active = false;
}
