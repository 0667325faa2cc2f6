use serde::{Deserialize, Serialize};

/// A packed 8-bit RGBA pixel.
///
/// Stored little-endian as `r | g << 8 | b << 16 | a << 24`, so a slice of
/// colors casts directly to an RGBA8 byte run on little-endian hosts.
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[serde(from = "ColorNode", into = "ColorNode")]
pub struct Color(pub u32);

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum ColorNode {
    Color { int32: u32 },
}

impl From<ColorNode> for Color {
    fn from(node: ColorNode) -> Self {
        let ColorNode::Color { int32 } = node;
        Self(int32)
    }
}

impl From<Color> for ColorNode {
    fn from(color: Color) -> Self {
        ColorNode::Color { int32: color.0 }
    }
}

impl Color {
    pub const WHITE: Color = Color::from_rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::from_rgba(0, 0, 0, 255);
    pub const CLEAR: Color = Color::from_rgba(0, 0, 0, 0);
    pub const DARK_GRAY: Color = Color::from_rgba(60, 60, 60, 255);
    pub const LIGHT_GRAY: Color = Color::from_rgba(180, 180, 180, 255);
    pub const RED: Color = Color::from_rgba(255, 0, 0, 255);
    pub const GREEN: Color = Color::from_rgba(0, 255, 0, 255);
    pub const BLUE: Color = Color::from_rgba(0, 0, 255, 255);
    /// Substituted for an edit's own color when it is drawn in preview mode.
    pub const GHOST: Color = Color::from_rgba(0, 120, 255, 96);

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(u32::from_le_bytes([r, g, b, a]))
    }

    /// Take the color channels of `value` and force the pixel opaque.
    pub const fn from_u32_ignore_alpha(value: u32) -> Self {
        Self(value | 0xFF00_0000)
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    pub const fn alpha(self) -> u8 {
        self.to_rgba()[3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packing_matches_rgba_bytes() {
        let c = Color::from_rgba(1, 2, 3, 4);
        assert_eq!(c.0, 0x0403_0201);
        assert_eq!(c.to_rgba(), [1, 2, 3, 4]);
        assert_eq!(c.alpha(), 4);
    }

    #[test]
    fn test_ignore_alpha() {
        assert_eq!(Color::from_u32_ignore_alpha(Color::CLEAR.0), Color::BLACK);
    }
}
