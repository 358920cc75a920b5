//! Software-rendered display using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ ┌──────────────────┐                         │
//! │ │ MODE: DRAW       │                         │
//! │ │ COLOR: RED  ■    │   composited frame      │
//! │ │ SIZE: 15 HANDS: 1│   (canvas over video)   │
//! │ └──────────────────┘                         │
//! │                                              │
//! │ key legend (simulation only)                 │
//! └──────────────────────────────────────────────┘
//! ```

use std::sync::mpsc::Sender;

use air_canvas::{FrameReport, Mode, PaletteColor};
use image::RgbImage;
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::error::{PainterError, Result};
use crate::sim::{SimInput, SimKey};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

const HUD_X:       usize = 8;
const HUD_Y:       usize = 8;
const HUD_W:       usize = 170;
const HUD_H:       usize = 52;
const TEXT_SCALE:  usize = 2;
const LINE_H:      usize = 6 * TEXT_SCALE + 2;
const SWATCH:      usize = 10;
const HUD_BG:      u32   = 0x00101820;
const TEXT_COLOR:  u32   = 0x00EEEEEE;
const LEGEND_FG:   u32   = 0x00AAAAAA;
const BLANK:       u32   = 0x00000000;

const LEGEND: &str = "1=DRAW 2/3/4=RED/GREEN/BLUE 5=ERASE 0=FIST H=HIDE B=TWO HANDS Q=QUIT";

/// Pose keys forwarded to the simulator.
const SIM_KEYS: [(Key, SimKey); 8] = [
    (Key::Key0, SimKey::Fist),
    (Key::Key1, SimKey::Point),
    (Key::Key2, SimKey::TwoFingers),
    (Key::Key3, SimKey::ThreeFingers),
    (Key::Key4, SimKey::FourFingers),
    (Key::Key5, SimKey::OpenPalm),
    (Key::H,    SimKey::ToggleHand),
    (Key::B,    SimKey::ToggleSecondHand),
];

// ════════════════════════════════════════════════════════════════════════════
// FrameSink trait
// ════════════════════════════════════════════════════════════════════════════

/// Where composited frames go.
pub trait FrameSink {
    /// Handle pending input.  False once the user asked to quit or the
    /// display went away.
    fn poll_input(&mut self) -> bool;

    /// Keep the display responsive on an iteration with nothing to show.
    fn pump(&mut self);

    /// Show one frame.  An error here is per-frame.
    fn render(&mut self, frame: &RgbImage, report: &FrameReport) -> Result<()>;
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:     Window,
    buf:        Vec<u32>,
    width:      usize,
    height:     usize,
    /// Present only when hands are simulated.
    sim_tx:     Option<Sender<SimInput>>,
    last_mouse: Option<(f32, f32)>,
}

impl Visualizer {
    pub fn new(title: &str, width: u32, height: u32, sim_tx: Option<Sender<SimInput>>) -> Result<Self> {
        let (width, height) = (width as usize, height as usize);
        let mut window = Window::new(
            title,
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| PainterError::Window(e.to_string()))?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BLANK; width * height],
            width,
            height,
            sim_tx,
            last_mouse: None,
        })
    }

    // ── HUD ───────────────────────────────────────────────────────────────

    fn draw_hud(&mut self, report: &FrameReport) {
        self.fill_rect(HUD_X, HUD_Y, HUD_W, HUD_H, HUD_BG);
        let x = HUD_X + 6;
        let mut y = HUD_Y + 4;

        self.draw_label(&format!("MODE: {}", report.mode.label()), x, y, TEXT_COLOR, TEXT_SCALE);
        y += LINE_H;

        let name = PaletteColor::from_rgb(report.color).map_or("CUSTOM", PaletteColor::name);
        let label = format!("COLOR: {name}");
        self.draw_label(&label, x, y, TEXT_COLOR, TEXT_SCALE);
        let swatch_x = x + label.chars().count() * 4 * TEXT_SCALE + 6;
        self.fill_rect(swatch_x, y, SWATCH, SWATCH, rgb_to_u32(report.color.0));
        y += LINE_H;

        let sizing = match (&report.preview, report.mode) {
            (Some(p), Mode::ScaleDual) => format!("SIZE: {} DIST: {:.0}", report.thickness, p.distance),
            _ => format!("SIZE: {} HANDS: {}", report.thickness, report.hand_count),
        };
        self.draw_label(&sizing, x, y, TEXT_COLOR, TEXT_SCALE);
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    /// Text in the 3×5 font, each dot a `scale`×`scale` block, one blank
    /// column between glyphs.  Stops at the right edge.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32, scale: usize) {
        let advance = (GLYPH_W + 1) * scale;
        for (i, ch) in text.chars().enumerate() {
            let gx = x + i * advance;
            if gx + advance > self.width { break; }
            let bits = glyph(ch);
            for row in 0..GLYPH_H {
                for col in (0..GLYPH_W).filter(|&col| dot(bits, col, row)) {
                    self.fill_rect(gx + col * scale, y + row * scale, scale, scale, color);
                }
            }
        }
    }
}

impl FrameSink for Visualizer {
    /// Poll keyboard and mouse.  Returns false when the user asked to quit.
    fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        let pressed = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        if pressed(Key::Q) || pressed(Key::Escape) {
            return false;
        }

        let Some(tx) = &self.sim_tx else { return true };

        for (key, sim) in SIM_KEYS {
            if pressed(key) {
                let _ = tx.send(SimInput::KeyDown(sim));
            }
        }

        if let Some((x, y)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            if self.last_mouse != Some((x, y)) {
                self.last_mouse = Some((x, y));
                let _ = tx.send(SimInput::Pointer { x, y });
            }
        }

        true
    }

    fn pump(&mut self) {
        self.window.update();
    }

    /// Composited frame with the HUD on top.
    fn render(&mut self, frame: &RgbImage, report: &FrameReport) -> Result<()> {
        blit(&mut self.buf, self.width, self.height, frame);
        self.draw_hud(report);

        if self.sim_tx.is_some() {
            let y = self.height.saturating_sub(6 * TEXT_SCALE + 4);
            self.draw_label(LEGEND, HUD_X, y, LEGEND_FG, 1);
        }

        self.window
            .update_with_buffer(&self.buf, self.width, self.height)
            .map_err(|e| PainterError::Window(e.to_string()))
    }
}

/// Copy `frame` into a 0RGB window buffer; anything the frame does not
/// cover is cleared.
fn blit(buf: &mut [u32], width: usize, height: usize, frame: &RgbImage) {
    let (fw, fh) = (frame.width() as usize, frame.height() as usize);
    if (fw, fh) == (width, height) {
        for (dst, px) in buf.iter_mut().zip(frame.pixels()) {
            *dst = rgb_to_u32(px.0);
        }
        return;
    }
    buf.fill(BLANK);
    for (x, y, px) in frame.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        if x < width && y < height {
            buf[y * width + x] = rgb_to_u32(px.0);
        }
    }
}

fn rgb_to_u32([r, g, b]: [u8; 3]) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

// ────────────────────────────────────────────────────────────────────────────
// 3×5 font
// ────────────────────────────────────────────────────────────────────────────

/// Glyph width and height in dots.
const GLYPH_W: usize = 3;
const GLYPH_H: usize = 5;
/// Shown for characters the font lacks.
const MISSING: u16 = 0b000_000_010_000_000;

/// Five 3-bit rows packed top row first; bit 2 of a row is its left dot.
/// Only the characters the HUD and legend print are defined.
fn glyph(c: char) -> u16 {
    match c.to_ascii_uppercase() {
        '0' => 0b111_101_101_101_111,
        '1' => 0b010_110_010_010_111,
        '2' => 0b110_001_010_100_111,
        '3' => 0b110_001_010_001_110,
        '4' => 0b101_101_111_001_001,
        '5' => 0b111_100_110_001_110,
        '6' => 0b011_100_111_101_111,
        '7' => 0b111_001_010_010_010,
        '8' => 0b111_101_111_101_111,
        '9' => 0b111_101_111_001_110,
        'A' => 0b010_101_111_101_101,
        'B' => 0b110_101_110_101_110,
        'C' => 0b011_100_100_100_011,
        'D' => 0b110_101_101_101_110,
        'E' => 0b111_100_110_100_111,
        'F' => 0b111_100_110_100_100,
        'G' => 0b011_100_101_101_011,
        'H' => 0b101_101_111_101_101,
        'I' => 0b111_010_010_010_111,
        'L' => 0b100_100_100_100_111,
        'M' => 0b101_111_111_101_101,
        'N' => 0b110_101_101_101_101,
        'O' => 0b010_101_101_101_010,
        'Q' => 0b010_101_101_110_011,
        'R' => 0b110_101_110_101_101,
        'S' => 0b011_100_010_001_110,
        'T' => 0b111_010_010_010_010,
        'U' => 0b101_101_101_101_111,
        'W' => 0b101_101_111_111_101,
        'Z' => 0b111_001_010_100_111,
        ':' => 0b000_010_000_010_000,
        '=' => 0b000_111_000_111_000,
        '/' => 0b001_001_010_100_100,
        '.' => 0b000_000_000_000_010,
        '-' => 0b000_000_111_000_000,
        ' ' => 0,
        _   => MISSING,
    }
}

/// Is the dot at (`col`, `row`) of `bits` lit?
fn dot(bits: u16, col: usize, row: usize) -> bool {
    let shift = GLYPH_W * (GLYPH_H - 1 - row) + (GLYPH_W - 1 - col);
    (bits >> shift) & 1 == 1
}
