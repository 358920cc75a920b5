//! The session context: one canvas plus one draw state, created at startup
//! and mutated in place until exit.  Every pipeline stage receives it
//! explicitly.

use image::RgbImage;

use crate::canvas::Canvas;
use crate::compositor;
use crate::error::Result;
use crate::state::DrawState;

#[derive(Clone, Debug)]
pub struct Session {
    canvas: Canvas,
    state:  DrawState,
}

impl Session {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Session::with_state(width, height, DrawState::default())
    }

    pub fn with_state(width: u32, height: u32, state: DrawState) -> Result<Self> {
        Ok(Session { canvas: Canvas::new(width, height)?, state })
    }

    pub fn canvas(&self)         -> &Canvas        { &self.canvas }
    pub fn state(&self)          -> &DrawState     { &self.state }
    pub fn state_mut(&mut self)  -> &mut DrawState { &mut self.state }

    /// Split borrow for stages that paint and update state together.
    pub fn parts_mut(&mut self) -> (&mut Canvas, &mut DrawState) {
        (&mut self.canvas, &mut self.state)
    }

    /// Canvas over `frame`; see [`compositor::composite`].
    pub fn composite(&self, frame: &RgbImage) -> Result<RgbImage> {
        compositor::composite(&self.canvas, frame)
    }
}
