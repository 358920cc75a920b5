//! Brush palette.

use image::Rgb;

/// The all-zero pixel: unpainted on the canvas, and what the eraser writes.
pub const TRANSPARENT: Rgb<u8> = Rgb([0, 0, 0]);

/// Colors reachable through the select gestures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaletteColor { Red, Green, Blue }

impl PaletteColor {
    pub const fn rgb(self) -> Rgb<u8> {
        match self {
            PaletteColor::Red   => Rgb([255, 0, 0]),
            PaletteColor::Green => Rgb([0, 255, 0]),
            PaletteColor::Blue  => Rgb([0, 0, 255]),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PaletteColor::Red   => "RED",
            PaletteColor::Green => "GREEN",
            PaletteColor::Blue  => "BLUE",
        }
    }

    /// Reverse lookup for an arbitrary brush color.
    pub fn from_rgb(color: Rgb<u8>) -> Option<Self> {
        [PaletteColor::Red, PaletteColor::Green, PaletteColor::Blue]
            .into_iter()
            .find(|c| c.rgb() == color)
    }
}
