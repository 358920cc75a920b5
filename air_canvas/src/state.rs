//! Per-session drawing state.

use std::fmt;

use glam::IVec2;
use image::Rgb;

use crate::color::PaletteColor;

pub const DEFAULT_THICKNESS: u32 = 15;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Idle,
    Select,
    Erase,
    Draw,
    ScaleDual,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Idle      => "IDLE",
            Mode::Select    => "SELECT",
            Mode::Erase     => "ERASER",
            Mode::Draw      => "DRAW",
            Mode::ScaleDual => "SCALE",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Brush settings plus stroke continuity.
///
/// `previous_point` is only `Some` inside an uninterrupted run of Draw
/// frames; every other path through the state machine clears it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawState {
    pub color:          Rgb<u8>,
    thickness:          u32,
    pub previous_point: Option<IVec2>,
    pub mode:           Mode,
}

impl Default for DrawState {
    fn default() -> Self {
        DrawState::new(PaletteColor::Red.rgb(), DEFAULT_THICKNESS)
    }
}

impl DrawState {
    pub fn new(color: Rgb<u8>, thickness: u32) -> Self {
        DrawState {
            color,
            thickness: thickness.max(1),
            previous_point: None,
            mode: Mode::Idle,
        }
    }

    pub fn thickness(&self) -> u32 { self.thickness }

    /// Thickness is always at least one pixel.
    pub fn set_thickness(&mut self, thickness: u32) {
        self.thickness = thickness.max(1);
    }

    /// End the current stroke so the next Draw frame starts a fresh dot.
    pub fn break_stroke(&mut self) {
        self.previous_point = None;
    }
}
