//! Transient marks on the live frame.
//!
//! These are redrawn every frame from the [`FrameReport`] and never reach
//! the canvas:
//!
//! | Mode | Mark |
//! |---|---|
//! | Draw | brush-colored dot (radius 10) on the fingertip |
//! | Erase | black eraser disc, same radius as the canvas erase |
//! | ScaleDual | line between the fingertips, thickness preview disc at the midpoint |

use glam::IVec2;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut};

use crate::clip::{clip_disc, clip_segment};
use crate::gesture::{eraser_radius, FrameReport};
use crate::state::Mode;

pub const POINTER_RADIUS: i32 = 10;

const ERASER_FILL:  Rgb<u8> = Rgb([0, 0, 0]);
const PREVIEW_RING: Rgb<u8> = Rgb([255, 255, 255]);

pub fn annotate_live_frame(frame: &mut RgbImage, report: &FrameReport) {
    match report.mode {
        Mode::Draw => {
            if let Some(tip) = report.fingertip {
                disc(frame, tip, POINTER_RADIUS, report.color);
            }
        }
        Mode::Erase => {
            if let Some(tip) = report.fingertip {
                disc(frame, tip, eraser_radius(report.thickness), ERASER_FILL);
            }
        }
        Mode::ScaleDual => {
            if let Some(preview) = report.preview {
                line(frame, preview.from, preview.to, report.color);

                let mid    = preview.midpoint();
                let radius = i32::try_from(preview.thickness / 2).unwrap_or(i32::MAX).max(1);
                disc(frame, mid, radius, report.color);
                if let Some(r) = clip_disc(frame.width(), frame.height(), mid, radius.saturating_add(1)) {
                    draw_hollow_circle_mut(frame, (mid.x, mid.y), r, PREVIEW_RING);
                }
            }
        }
        Mode::Idle | Mode::Select => {}
    }
}

fn disc(frame: &mut RgbImage, center: IVec2, radius: i32, color: Rgb<u8>) {
    if let Some(r) = clip_disc(frame.width(), frame.height(), center, radius) {
        draw_filled_circle_mut(frame, (center.x, center.y), r, color);
    }
}

fn line(frame: &mut RgbImage, from: IVec2, to: IVec2, color: Rgb<u8>) {
    let (w, h) = frame.dimensions();
    if let Some((a, b)) = clip_segment(w, h, from.as_dvec2(), to.as_dvec2(), 0.0) {
        draw_line_segment_mut(frame, (a.x as f32, a.y as f32), (b.x as f32, b.y as f32), color);
    }
}
