//! Stroke continuity for Draw mode.

use glam::IVec2;

use crate::canvas::Canvas;
use crate::state::DrawState;

/// Extend the current stroke to `tip`.
///
/// With no previous point this lays down a single dot; otherwise it joins
/// the previous point to `tip`.  Either way `tip` becomes the previous
/// point.  This is the only place a previous point is ever set.
pub fn extend_stroke(canvas: &mut Canvas, state: &mut DrawState, tip: IVec2) {
    let from = state.previous_point.unwrap_or(tip);
    canvas.stroke_segment(from, tip, state.thickness(), state.color);
    state.previous_point = Some(tip);
}
