//! The persistent drawing surface.
//!
//! A [`Canvas`] is an RGB buffer the size of the video frame.  A pixel whose
//! channels are all zero is unpainted; the compositor lets the live frame
//! show through there.  The size is fixed when the canvas is created.

use glam::IVec2;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

use crate::clip::{clip_disc, clip_segment, radius_limit};
use crate::color::TRANSPARENT;
use crate::error::{CanvasError, Result};

#[derive(Clone, Debug)]
pub struct Canvas {
    pixels: RgbImage,
}

impl Canvas {
    /// A fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::ZeroSized { width, height });
        }
        Ok(Canvas { pixels: RgbImage::new(width, height) })
    }

    pub fn width(&self)      -> u32        { self.pixels.width() }
    pub fn height(&self)     -> u32        { self.pixels.height() }
    pub fn dimensions(&self) -> (u32, u32) { self.pixels.dimensions() }
    pub fn pixels(&self)     -> &RgbImage  { &self.pixels }

    pub(crate) fn pixels_mut(&mut self) -> &mut RgbImage { &mut self.pixels }

    /// `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb<u8>> {
        if x < 0 || y < 0 {
            return None;
        }
        self.pixels.get_pixel_checked(x as u32, y as u32).copied()
    }

    /// True for unpainted pixels; also true outside the canvas.
    pub fn is_transparent(&self, x: i32, y: i32) -> bool {
        self.pixel(x, y).map_or(true, |p| p == TRANSPARENT)
    }

    pub fn painted_pixels(&self) -> usize {
        self.pixels.pixels().filter(|p| **p != TRANSPARENT).count()
    }

    // ── Raster operations ─────────────────────────────────────────────────
    // All of these clip to the canvas; points may lie outside it.

    pub fn fill_disc(&mut self, center: IVec2, radius: i32, color: Rgb<u8>) {
        let (w, h) = self.dimensions();
        if let Some(r) = clip_disc(w, h, center, radius) {
            draw_filled_circle_mut(&mut self.pixels, (center.x, center.y), r, color);
        }
    }

    pub fn erase_disc(&mut self, center: IVec2, radius: i32) {
        self.fill_disc(center, radius, TRANSPARENT);
    }

    /// Round-capped segment stamped with a disc of radius `thickness / 2`.
    ///
    /// The stroke is `thickness` pixels wide for odd thicknesses; an even
    /// thickness rounds up to the next odd width so the stroke stays centred
    /// on the pixel path.  A zero-length segment is a single dot.  Only the
    /// part of the segment within reach of the canvas is stamped.
    pub fn stroke_segment(&mut self, from: IVec2, to: IVec2, thickness: u32, color: Rgb<u8>) {
        let (w, h) = self.dimensions();
        let radius = i32::try_from(thickness / 2).unwrap_or(i32::MAX).min(radius_limit(w, h));

        if from == to {
            self.fill_disc(from, radius, color);
            return;
        }
        let margin = f64::from(radius) + 1.0;
        let Some((start, end)) = clip_segment(w, h, from.as_dvec2(), to.as_dvec2(), margin) else {
            return;
        };
        let delta = end - start;
        let steps = delta.abs().max_element().ceil() as i32;
        for i in 0..=steps {
            let p = start + delta * (f64::from(i) / f64::from(steps.max(1)));
            self.fill_disc(p.round().as_ivec2(), radius, color);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
