//! Application configuration.
//!
//! There are no command-line flags.  [`PainterConfig::default`] gives a
//! working setup; a few environment variables override it:
//!
//! | Variable | Meaning |
//! |---|---|
//! | `AIR_PAINTER_DETECTOR` | Command line of an external landmark detector. Unset → simulated hands |
//! | `AIR_PAINTER_CAMERA` | Webcam index, or `none` for the synthetic backdrop (`camera` feature only) |
//! | `AIR_PAINTER_MIN_CONFIDENCE` | Detector confidence threshold, 0.0–1.0 |

use air_canvas::{BimanualScaler, DrawState, PaletteColor, DEFAULT_THICKNESS};
use tracing::warn;

pub const ENV_DETECTOR:       &str = "AIR_PAINTER_DETECTOR";
pub const ENV_CAMERA:         &str = "AIR_PAINTER_CAMERA";
pub const ENV_MIN_CONFIDENCE: &str = "AIR_PAINTER_MIN_CONFIDENCE";

/// Where hand landmarks come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetectorChoice {
    /// Keyboard/mouse driven poses.
    Simulated,
    /// External process speaking the line protocol in [`crate::detector`].
    Process { program: String, args: Vec<String> },
}

impl DetectorChoice {
    /// Split a command line on whitespace; `None` if it is blank.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(DetectorChoice::Process { program, args: parts.collect() })
    }
}

#[derive(Clone, Debug)]
pub struct PainterConfig {
    pub window_title:      String,
    /// Size of the synthetic backdrop; a camera reports its own size.
    pub frame_width:       u32,
    pub frame_height:      u32,
    /// `None` → synthetic backdrop.  Ignored without the `camera` feature.
    pub camera_index:      Option<u32>,
    pub detector:          DetectorChoice,
    /// Hands scored below this by the detector are dropped.
    pub min_confidence:    f32,
    /// Flip frames horizontally before detection, like a mirror.
    pub mirror:            bool,
    pub initial_color:     PaletteColor,
    pub initial_thickness: u32,
    pub scaler:            BimanualScaler,
}

impl Default for PainterConfig {
    fn default() -> Self {
        PainterConfig {
            window_title:      "Air Painter".to_string(),
            frame_width:       640,
            frame_height:      480,
            camera_index:      if cfg!(feature = "camera") { Some(0) } else { None },
            detector:          DetectorChoice::Simulated,
            min_confidence:    0.7,
            mirror:            true,
            initial_color:     PaletteColor::Red,
            initial_thickness: DEFAULT_THICKNESS,
            scaler:            BimanualScaler::default(),
        }
    }
}

impl PainterConfig {
    pub fn from_env() -> Self {
        PainterConfig::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; unusable values are logged and skipped.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(line) = lookup(ENV_DETECTOR) {
            match DetectorChoice::from_command_line(&line) {
                Some(choice) => self.detector = choice,
                None         => warn!("{ENV_DETECTOR} is blank; using simulated hands"),
            }
        }

        if let Some(raw) = lookup(ENV_CAMERA) {
            let raw = raw.trim();
            if raw.eq_ignore_ascii_case("none") {
                self.camera_index = None;
            } else {
                match raw.parse::<u32>() {
                    Ok(index) => self.camera_index = Some(index),
                    Err(_)    => warn!(value = raw, "ignoring {ENV_CAMERA}: expected an index or `none`"),
                }
            }
        }

        if let Some(raw) = lookup(ENV_MIN_CONFIDENCE) {
            match raw.trim().parse::<f32>() {
                Ok(c) if (0.0..=1.0).contains(&c) => self.min_confidence = c,
                _ => warn!(value = raw.as_str(), "ignoring {ENV_MIN_CONFIDENCE}: expected 0.0–1.0"),
            }
        }

        self
    }

    pub fn initial_state(&self) -> DrawState {
        DrawState::new(self.initial_color.rgb(), self.initial_thickness)
    }
}
