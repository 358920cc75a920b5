//! # air_painter
//!
//! Paint in the air with one hand: finger poses pick a color, draw, or
//! erase on a persistent canvas that is composited over the live video.
//! Two hands resize the brush.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Hands | Action |
//! |---|---|---|
//! | Index finger up | 1 | Draw a stroke following the fingertip |
//! | Index + middle up | 1 | Select RED |
//! | Index + middle + ring up | 1 | Select GREEN |
//! | Four fingers up, thumb down | 1 | Select BLUE |
//! | Open palm | 1 | Erase around the fingertip |
//! | Both index fingers | 2 | Brush thickness follows their distance |
//! | Anything else / no hand | — | Lift the brush |
//!
//! ## Feature flags
//!
//! * (default) — synthetic moving backdrop instead of a camera.
//! * `camera` — capture from a webcam via `nokhwa`.
//!
//! Landmarks come from the keyboard/mouse simulator unless
//! `AIR_PAINTER_DETECTOR` names an external detector process
//! (see [`detector`] for its protocol and [`config`] for all settings).
//!
//! ### Simulation shortcuts
//!
//! | Key | Pose |
//! |---|---|
//! | mouse | Index fingertip position |
//! | `1` | Index finger (draw) |
//! | `2` / `3` / `4` | Two / three / four fingers (red / green / blue) |
//! | `5` | Open palm (erase) |
//! | `0` | Fist (idle) |
//! | `H` | Hide / show the hand |
//! | `B` | Add / remove a mirrored second hand |
//! | `Q` / `Escape` | Quit |

pub mod app;
#[cfg(feature = "camera")]
pub mod camera;
pub mod config;
pub mod detector;
pub mod error;
pub mod frames;
pub mod logging;
pub mod sim;
pub mod visualizer;

pub use app::{run, App};
pub use config::{DetectorChoice, PainterConfig};
pub use error::{PainterError, Result};
