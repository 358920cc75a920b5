//! Video frame sources.
//!
//! The painter only needs "give me the next RGB frame".  A synthetic
//! backdrop is always available; a real webcam is behind the `camera`
//! feature (see [`crate::camera`]).

use image::{imageops, Rgb, RgbImage};
use tracing::info;

use crate::config::PainterConfig;
use crate::error::{PainterError, Result};

// ════════════════════════════════════════════════════════════════════════════
// FrameSource trait
// ════════════════════════════════════════════════════════════════════════════

pub trait FrameSource {
    /// Human-readable description for logs.
    fn describe(&self) -> String;

    /// Next frame.  An error here is per-frame and the caller may retry.
    fn read(&mut self) -> Result<RgbImage>;
}

/// Read one frame to learn the frame size.
///
/// Failure means the source is unusable and is reported as
/// [`PainterError::CaptureUnavailable`].
pub fn probe_frame_size(source: &mut dyn FrameSource) -> Result<(u32, u32)> {
    let frame = source
        .read()
        .map_err(|e| PainterError::CaptureUnavailable(format!("{}: {e}", source.describe())))?;
    let (w, h) = frame.dimensions();
    if w == 0 || h == 0 {
        return Err(PainterError::CaptureUnavailable(format!("{} produced an empty frame", source.describe())));
    }
    Ok((w, h))
}

/// Mirror `frame` left-right so on-screen motion follows the user's hand.
pub fn mirror(frame: &mut RgbImage) {
    imageops::flip_horizontal_in_place(frame);
}

/// Pick the configured source.
pub fn open_frame_source(cfg: &PainterConfig) -> Result<Box<dyn FrameSource>> {
    #[cfg(feature = "camera")]
    if let Some(index) = cfg.camera_index {
        let camera = crate::camera::CameraFrames::open(index)?;
        info!(source = %camera.describe(), "video source");
        return Ok(Box::new(camera));
    }

    #[cfg(not(feature = "camera"))]
    if let Some(index) = cfg.camera_index {
        tracing::warn!(index, "camera requested but built without the `camera` feature; using synthetic frames");
    }

    let synthetic = SyntheticFrames::new(cfg.frame_width, cfg.frame_height)?;
    info!(source = %synthetic.describe(), "video source");
    Ok(Box::new(synthetic))
}

// ════════════════════════════════════════════════════════════════════════════
// SyntheticFrames — generated backdrop (always available)
// ════════════════════════════════════════════════════════════════════════════

/// A slowly drifting dark gradient with diagonal bands, so strokes and the
/// erase-reveal are easy to see without a camera.
pub struct SyntheticFrames {
    width:  u32,
    height: u32,
    tick:   u32,
}

impl SyntheticFrames {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PainterError::CaptureUnavailable(format!(
                "synthetic frame size {width}x{height} is empty"
            )));
        }
        Ok(SyntheticFrames { width, height, tick: 0 })
    }

    fn shade(&self, x: u32, y: u32) -> Rgb<u8> {
        let band = ((x + y + self.tick * 2) / 24) % 2 == 0;
        let r = 24 + (40 * x / self.width) as u8;
        let g = 28 + (30 * y / self.height) as u8;
        let b = if band { 70 } else { 58 };
        Rgb([r, g, b])
    }
}

impl FrameSource for SyntheticFrames {
    fn describe(&self) -> String {
        format!("synthetic {}x{}", self.width, self.height)
    }

    fn read(&mut self) -> Result<RgbImage> {
        let frame = RgbImage::from_fn(self.width, self.height, |x, y| self.shade(x, y));
        self.tick = self.tick.wrapping_add(1);
        Ok(frame)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
