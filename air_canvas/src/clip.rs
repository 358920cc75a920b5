//! Clipping raster primitives to an image before they reach `imageproc`.
//!
//! `imageproc` adds offsets to the centre / endpoints in `i32` and walks
//! every step of a line, so a fingertip far off-screen would overflow or
//! stall.  Everything drawn on the canvas or the live frame is passed
//! through here first.

use glam::{DVec2, IVec2};

/// Largest radius worth drawing on a `width`×`height` image.
pub fn radius_limit(width: u32, height: u32) -> i32 {
    i32::try_from(u64::from(width) + u64::from(height)).unwrap_or(i32::MAX)
}

/// Clamp `radius` to `0..=radius_limit`, or `None` if the disc cannot touch
/// the image at all.
pub fn clip_disc(width: u32, height: u32, center: IVec2, radius: i32) -> Option<i32> {
    let r  = radius.clamp(0, radius_limit(width, height));
    let (cx, cy, r64) = (i64::from(center.x), i64::from(center.y), i64::from(r));
    let touches = cx + r64 >= 0
        && cy + r64 >= 0
        && cx - r64 < i64::from(width)
        && cy - r64 < i64::from(height);
    touches.then_some(r)
}

/// Liang–Barsky clip of `from → to` against the image grown by `margin`
/// pixels on every side.  `None` if nothing of the segment is left.
pub fn clip_segment(width: u32, height: u32, from: DVec2, to: DVec2, margin: f64) -> Option<(DVec2, DVec2)> {
    let min = DVec2::splat(-margin);
    let max = DVec2::new(f64::from(width) - 1.0 + margin, f64::from(height) - 1.0 + margin);
    let d = to - from;

    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-d.x, from.x - min.x),
        ( d.x, max.x - from.x),
        (-d.y, from.y - min.y),
        ( d.y, max.y - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 { return None; }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 { return None; }
            t0 = t0.max(r);
        } else {
            if r < t0 { return None; }
            t1 = t1.min(r);
        }
    }
    Some((from + d * t0, from + d * t1))
}
