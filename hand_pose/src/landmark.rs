//! The 21-point hand landmark model.
//!
//! A detector reports each hand as 21 landmarks in fractional frame
//! coordinates (0.0–1.0 of width / height).  Landmark ids have a fixed
//! anatomical meaning, listed in [`ids`].

use std::fmt;

/// Landmarks per detected hand.
pub const LANDMARK_COUNT: usize = 21;

/// Most hands a single frame may carry.
pub const MAX_HANDS: usize = 2;

/// Landmark ids (wrist first, then four joints per finger, base to tip).
pub mod ids {
    pub const WRIST:      usize = 0;
    pub const THUMB_CMC:  usize = 1;
    pub const THUMB_MCP:  usize = 2;
    pub const THUMB_IP:   usize = 3;
    pub const THUMB_TIP:  usize = 4;
    pub const INDEX_MCP:  usize = 5;
    pub const INDEX_PIP:  usize = 6;
    pub const INDEX_DIP:  usize = 7;
    pub const INDEX_TIP:  usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP:   usize = 13;
    pub const RING_PIP:   usize = 14;
    pub const RING_DIP:   usize = 15;
    pub const RING_TIP:   usize = 16;
    pub const PINKY_MCP:  usize = 17;
    pub const PINKY_PIP:  usize = 18;
    pub const PINKY_DIP:  usize = 19;
    pub const PINKY_TIP:  usize = 20;
}

// ════════════════════════════════════════════════════════════════════════════
// Detector-side types (fractional coordinates)
// ════════════════════════════════════════════════════════════════════════════

/// One landmark as reported by the detector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormalizedLandmark {
    /// Fraction of frame width.
    pub x: f32,
    /// Fraction of frame height.
    pub y: f32,
    /// Relative depth; carried through but unused by the pipeline.
    pub z: f32,
}

impl NormalizedLandmark {
    pub const fn new(x: f32, y: f32) -> Self {
        NormalizedLandmark { x, y, z: 0.0 }
    }
}

/// Which hand the detector believes it saw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness { Left, Right }

impl Handedness {
    /// Parse the detector's label ("Left" / "Right", any case).
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "left"  => Some(Handedness::Left),
            "right" => Some(Handedness::Right),
            _       => None,
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handedness::Left  => f.write_str("Left"),
            Handedness::Right => f.write_str("Right"),
        }
    }
}

/// A complete hand: exactly [`LANDMARK_COUNT`] landmarks, never partial.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedHand {
    pub landmarks:  [NormalizedLandmark; LANDMARK_COUNT],
    pub handedness: Option<Handedness>,
    /// Detector confidence, 0.0–1.0.
    pub score:      f32,
}

impl DetectedHand {
    pub fn new(landmarks: [NormalizedLandmark; LANDMARK_COUNT]) -> Self {
        DetectedHand { landmarks, handedness: None, score: 1.0 }
    }

    /// Build from a slice; `None` unless it holds exactly 21 landmarks.
    pub fn from_slice(landmarks: &[NormalizedLandmark]) -> Option<Self> {
        let landmarks: [NormalizedLandmark; LANDMARK_COUNT] = landmarks.try_into().ok()?;
        Some(DetectedHand::new(landmarks))
    }

    pub fn with_handedness(mut self, handedness: Option<Handedness>) -> Self {
        self.handedness = handedness;
        self
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }
}

/// Everything the detector found in one frame: zero, one or two hands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameObservation {
    hands: Vec<DetectedHand>,
}

impl FrameObservation {
    /// Keeps at most [`MAX_HANDS`] hands, in detector order.
    pub fn new(mut hands: Vec<DetectedHand>) -> Self {
        hands.truncate(MAX_HANDS);
        FrameObservation { hands }
    }

    pub fn empty() -> Self { FrameObservation::default() }

    pub fn hands(&self)      -> &[DetectedHand] { &self.hands }
    pub fn hand_count(&self) -> usize           { self.hands.len() }
    pub fn is_empty(&self)   -> bool            { self.hands.is_empty() }
}

// ════════════════════════════════════════════════════════════════════════════
// Pixel-space landmark
// ════════════════════════════════════════════════════════════════════════════

/// A landmark after normalisation to pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Landmark {
    pub id: usize,
    pub x:  i32,
    pub y:  i32,
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
