//! Two-hand brush sizing.
//!
//! The distance between both index fingertips is clamped to a domain
//! (50–300 px by default) and mapped linearly onto a thickness range
//! (5–50 px).  Distances outside the domain pin to its ends.

use glam::IVec2;
use tracing::trace;

use crate::state::DrawState;

/// Display-only feedback for a scaling frame.  Never touches the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePreview {
    pub from:      IVec2,
    pub to:        IVec2,
    pub distance:  f32,
    pub thickness: u32,
}

impl ScalePreview {
    pub fn midpoint(&self) -> IVec2 {
        ((self.from.as_i64vec2() + self.to.as_i64vec2()) / 2).as_ivec2()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BimanualScaler {
    min_distance:  f32,
    max_distance:  f32,
    min_thickness: u32,
    max_thickness: u32,
}

impl Default for BimanualScaler {
    fn default() -> Self {
        BimanualScaler::new((50.0, 300.0), (5, 50))
    }
}

impl BimanualScaler {
    /// Bounds may be given in either order.
    pub fn new(distance: (f32, f32), thickness: (u32, u32)) -> Self {
        BimanualScaler {
            min_distance:  distance.0.min(distance.1),
            max_distance:  distance.0.max(distance.1),
            min_thickness: thickness.0.min(thickness.1),
            max_thickness: thickness.0.max(thickness.1),
        }
    }

    pub fn thickness_for_distance(&self, distance: f32) -> u32 {
        let span = self.max_distance - self.min_distance;
        if span <= f32::EPSILON || distance.is_nan() {
            return self.min_thickness;
        }
        let d = distance.clamp(self.min_distance, self.max_distance);
        let t = (d - self.min_distance) / span;
        let range = (self.max_thickness - self.min_thickness) as f32;
        (self.min_thickness as f32 + t * range).round() as u32
    }

    /// Set the brush thickness from two fingertips.
    pub fn apply(&self, state: &mut DrawState, a: IVec2, b: IVec2) -> ScalePreview {
        let distance  = a.as_vec2().distance(b.as_vec2());
        let thickness = self.thickness_for_distance(distance);
        state.set_thickness(thickness);
        trace!(distance, thickness, "bimanual scale");
        ScalePreview { from: a, to: b, distance, thickness }
    }
}
