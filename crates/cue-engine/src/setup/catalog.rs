//! Pool ball data: numbers, types, colors and shading style.

/// Ball type: solid (1-8) or striped (9-15)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallType {
    Cue,
    Solid,
    Striped,
}

/// Lighting model the renderer uses for a ball. Purely a rendering tag;
/// the physics never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingModel {
    Gouraud,
    Phong,
    BlinnPhong,
    Toon,
}

/// Pool ball definition
#[derive(Debug, Clone, Copy)]
pub struct BallDef {
    pub number: u8,
    pub ball_type: BallType,
    /// 0xRRGGBB
    pub color: u32,
}

impl BallDef {
    pub fn shading(&self) -> ShadingModel {
        shading_for(self.number)
    }
}

/// All 16 pool balls (cue + 15 numbered)
pub const BALLS: [BallDef; 16] = [
    BallDef { number: 0, ball_type: BallType::Cue, color: 0xEEEEEE },
    BallDef { number: 1, ball_type: BallType::Solid, color: 0xFEED01 },    // Yellow
    BallDef { number: 2, ball_type: BallType::Solid, color: 0x182983 },    // Blue
    BallDef { number: 3, ball_type: BallType::Solid, color: 0xE53118 },    // Red
    BallDef { number: 4, ball_type: BallType::Solid, color: 0x93117E },    // Purple
    BallDef { number: 5, ball_type: BallType::Solid, color: 0xEF7F01 },    // Orange
    BallDef { number: 6, ball_type: BallType::Solid, color: 0x00914E },    // Green
    BallDef { number: 7, ball_type: BallType::Solid, color: 0x871421 },    // Maroon
    BallDef { number: 8, ball_type: BallType::Solid, color: 0x202020 },    // Black
    BallDef { number: 9, ball_type: BallType::Striped, color: 0xFEED01 },
    BallDef { number: 10, ball_type: BallType::Striped, color: 0x182983 },
    BallDef { number: 11, ball_type: BallType::Striped, color: 0xE53118 },
    BallDef { number: 12, ball_type: BallType::Striped, color: 0x93117E },
    BallDef { number: 13, ball_type: BallType::Striped, color: 0xEF7F01 },
    BallDef { number: 14, ball_type: BallType::Striped, color: 0x00914E },
    BallDef { number: 15, ball_type: BallType::Striped, color: 0x871421 },
];

/// Shading style by ball number range.
const SHADING_RANGES: [(u8, ShadingModel); 3] = [
    (3, ShadingModel::Gouraud),
    (7, ShadingModel::Phong),
    (11, ShadingModel::BlinnPhong),
];

pub fn shading_for(number: u8) -> ShadingModel {
    SHADING_RANGES
        .iter()
        .find(|(upper, _)| number <= *upper)
        .map(|(_, model)| *model)
        .unwrap_or(ShadingModel::Toon)
}

/// Look up a ball by number.
pub fn ball(number: u8) -> Option<&'static BallDef> {
    BALLS.get(number as usize)
}
