// The fixed ink palette (keys 1..9, 0) and the canvas background.

/// A packed 0x00RRGGBB color, the pixel format minifb presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x00_00_00_00);
    pub const WHITE: Color = Color(0x00_FF_FF_FF);
    pub const RED: Color = Color(0x00_FF_43_43);
    pub const GREEN: Color = Color(0x00_46_FF_6E);
    pub const BLUE: Color = Color(0x00_46_6E_FF);
    pub const YELLOW: Color = Color(0x00_FF_CC_46);
    pub const ORANGE: Color = Color(0x00_FF_91_46);
    pub const PINK: Color = Color(0x00_FF_9B_DA);
    pub const ROSE: Color = Color(0x00_FF_46_8C);
    pub const CYAN: Color = Color(0x00_46_DC_FF);
    pub const PURPLE: Color = Color(0x00_A0_46_FF);
}

/// Ink colors in key order: index 0 is key `1`, index 9 is key `0`.
pub const PALETTE: [Color; 10] = [
    Color::WHITE,
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::ORANGE,
    Color::PINK,
    Color::ROSE,
    Color::CYAN,
    Color::PURPLE,
];

pub const BACKGROUND: Color = Color::BLACK;
