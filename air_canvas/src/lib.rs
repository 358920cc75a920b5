//! # air_canvas
//!
//! The gesture-to-drawing core: a per-frame state machine that turns hand
//! landmarks into strokes on a persistent [`Canvas`], composited over the
//! live video frame.
//!
//! ## Gesture → Action mapping
//!
//! Finger vectors are written thumb, index, middle, ring, pinky.
//!
//! | Hands | Fingers | Mode | Action |
//! |---|---|---|---|
//! | 2 | any | ScaleDual | Brush thickness ∝ distance between index tips (50–300 px → 5–50) |
//! | 0 | — | Idle | Stroke ends |
//! | 1 | `[0,1,1,0,0]` | Select | Brush color RED |
//! | 1 | `[0,1,1,1,0]` | Select | Brush color GREEN |
//! | 1 | `[0,1,1,1,1]` | Select | Brush color BLUE |
//! | 1 | other thumb-down, index-up, 2+ fingers | Select | Color unchanged |
//! | 1 | `[1,1,1,1,1]` | Erase | Clear a disc of radius thickness + 20 |
//! | 1 | `[0,1,0,0,0]` | Draw | Extend the stroke to the index tip |
//! | 1 | anything else | Idle | Stroke ends |
//!
//! ## Quick start
//!
//! ```rust
//! use air_canvas::{GestureStateMachine, Mode, Session};
//! use hand_pose::FrameObservation;
//! use image::RgbImage;
//!
//! let mut session = Session::new(640, 480).unwrap();
//! let machine = GestureStateMachine::default();
//!
//! let report = machine.process(&mut session, &FrameObservation::empty());
//! assert_eq!(report.mode, Mode::Idle);
//!
//! let live = RgbImage::new(640, 480);
//! let shown = session.composite(&live).unwrap();
//! assert_eq!(shown.dimensions(), (640, 480));
//! ```

pub mod canvas;
pub mod clip;
pub mod color;
pub mod compositor;
pub mod error;
pub mod gesture;
pub mod overlay;
pub mod scaler;
pub mod session;
pub mod state;
pub mod stroke;

pub use canvas::Canvas;
pub use color::{PaletteColor, TRANSPARENT};
pub use compositor::{composite, composite_onto};
pub use error::{CanvasError, Result};
pub use gesture::{
    FingerPattern, FrameReport, GestureAction, GestureRule, GestureStateMachine, GestureTable,
    eraser_radius, DEFAULT_GESTURES, ERASER_MARGIN,
};
pub use overlay::annotate_live_frame;
pub use scaler::{BimanualScaler, ScalePreview};
pub use session::Session;
pub use state::{DrawState, Mode, DEFAULT_THICKNESS};
pub use stroke::extend_stroke;
