//! Triangle rack: where each numbered ball starts.

use glam::Vec2;

/// Rack order, back row first. Each row holds one ball fewer than the last.
pub const RACK_ORDER: [u8; 15] = [12, 5, 10, 2, 7, 9, 4, 15, 13, 14, 8, 6, 3, 11, 1];

const ROWS: usize = 5;

/// Starting layout for a game: a five-row triangle plus the cue spot.
#[derive(Debug, Clone, PartialEq)]
pub struct RackLayout {
    /// Center of the back (five-ball) row.
    pub base: Vec2,
    /// Radius used for spacing. Slightly above the ball radius so racked
    /// balls start just apart.
    pub spacing_radius: f32,
    /// Ball numbers in rack order, see [`RACK_ORDER`].
    pub order: [u8; 15],
    pub cue_spot: Vec2,
}

impl RackLayout {
    /// The layout used by the standard table.
    pub fn standard(ball_radius: f32) -> Self {
        Self {
            base: Vec2::new(-60.0, 0.0),
            spacing_radius: ball_radius + 0.001,
            order: RACK_ORDER,
            cue_spot: Vec2::new(30.0, 0.0),
        }
    }

    /// Racked slot positions in rack order (not yet tied to numbers).
    pub fn slots(&self) -> Vec<Vec2> {
        let r = self.spacing_radius;
        let dx = 3f32.sqrt() * r;
        let mut slots = Vec::with_capacity(15);
        for row in 0..ROWS {
            let x = self.base.x + row as f32 * dx;
            for i in 0..(ROWS - row) {
                let y = self.base.y - 4.0 * r + i as f32 * 2.0 * r + row as f32 * r;
                slots.push(Vec2::new(x, y));
            }
        }
        slots
    }

    /// Starting position for a ball number. The cue ball (0) goes on the
    /// cue spot. `None` for numbers not in the rack.
    pub fn position_of(&self, number: u8) -> Option<Vec2> {
        if number == 0 {
            return Some(self.cue_spot);
        }
        let index = self.order.iter().position(|&n| n == number)?;
        self.slots().get(index).copied()
    }

    /// Every ball number paired with its starting position, cue ball last.
    pub fn positions(&self) -> Vec<(u8, Vec2)> {
        self.order
            .iter()
            .copied()
            .zip(self.slots())
            .chain(std::iter::once((0, self.cue_spot)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifteen_slots_in_five_rows() {
        let rack = RackLayout::standard(2.0);
        let slots = rack.slots();
        assert_eq!(slots.len(), 15);
        // Back row all share the base x.
        assert!(slots[..5].iter().all(|p| p.x == rack.base.x));
        // Tip sits on the center line.
        assert!((slots[14].y - rack.base.y).abs() < 1e-5);
    }

    #[test]
    fn racked_balls_do_not_overlap() {
        let rack = RackLayout::standard(2.0);
        let slots = rack.slots();
        for i in 0..slots.len() {
            for j in (i + 1)..slots.len() {
                assert!(
                    slots[i].distance(slots[j]) > 4.0,
                    "slots {} and {} overlap",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn every_number_once() {
        let rack = RackLayout::standard(2.0);
        let mut numbers: Vec<u8> = rack.positions().iter().map(|(n, _)| *n).collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (0..16).collect::<Vec<u8>>());
    }

    #[test]
    fn lookup_by_number() {
        let rack = RackLayout::standard(2.0);
        assert_eq!(rack.position_of(0), Some(Vec2::new(30.0, 0.0)));
        // Ball 1 is last in rack order: the tip.
        let tip = rack.position_of(1).unwrap();
        assert!((tip.y).abs() < 1e-5);
        assert!(tip.x > rack.base.x);
        assert_eq!(rack.position_of(12), Some(rack.slots()[0]));
        assert_eq!(rack.position_of(20), None);
    }
}
