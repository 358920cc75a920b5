//! Canvas-over-frame compositing.
//!
//! One rule covers both painting and erasing: a canvas pixel with any
//! non-zero channel replaces the frame pixel; an all-zero canvas pixel lets
//! the frame through.

use image::RgbImage;

use crate::canvas::Canvas;
use crate::error::{CanvasError, Result};

pub fn composite(canvas: &Canvas, frame: &RgbImage) -> Result<RgbImage> {
    let mut out = frame.clone();
    composite_onto(canvas, &mut out)?;
    Ok(out)
}

/// In-place variant; `frame` is left untouched on a size mismatch.
pub fn composite_onto(canvas: &Canvas, frame: &mut RgbImage) -> Result<()> {
    if canvas.dimensions() != frame.dimensions() {
        let (canvas_width, canvas_height) = canvas.dimensions();
        let (frame_width, frame_height) = frame.dimensions();
        return Err(CanvasError::DimensionMismatch {
            canvas_width, canvas_height, frame_width, frame_height,
        });
    }
    for (dst, src) in frame.pixels_mut().zip(canvas.pixels().pixels()) {
        if src.0.iter().any(|&c| c != 0) {
            *dst = *src;
        }
    }
    Ok(())
}
