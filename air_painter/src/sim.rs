//! Keyboard/mouse hand simulation.
//!
//! The visualizer sends [`SimInput`] events here; [`SimulatedHands`] turns
//! the current pose and pointer into 21 landmarks per hand, exactly like a
//! real detector would report them.  This keeps the whole pipeline
//! (normalize → classify → state machine) live without a camera or model.
//!
//! | Key | Pose | Fingers |
//! |---|---|---|
//! | `1` | Point (draw) | `[0,1,0,0,0]` |
//! | `2` | Two fingers (red) | `[0,1,1,0,0]` |
//! | `3` | Three fingers (green) | `[0,1,1,1,0]` |
//! | `4` | Four fingers (blue) | `[0,1,1,1,1]` |
//! | `5` | Open palm (erase) | `[1,1,1,1,1]` |
//! | `0` | Fist (idle) | `[0,0,0,0,0]` |
//! | `H` | Show / hide the hand | |
//! | `B` | Add / remove a mirrored second hand | |

use std::sync::mpsc::{Receiver, TryRecvError};

use hand_pose::{ids, DetectedHand, FingerVector, FrameObservation, Handedness, NormalizedLandmark, LANDMARK_COUNT};
use image::RgbImage;
use tracing::debug;

use crate::detector::HandDetector;
use crate::error::Result;

/// Raw input event from the simulation window.
#[derive(Clone, Debug, PartialEq)]
pub enum SimInput {
    KeyDown(SimKey),
    /// Mouse position in frame pixels.
    Pointer { x: f32, y: f32 },
}

/// Simulated key codes (mapped from minifb keys).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    Fist,             // 0
    Point,            // 1
    TwoFingers,       // 2
    ThreeFingers,     // 3
    FourFingers,      // 4
    OpenPalm,         // 5
    ToggleHand,       // H
    ToggleSecondHand, // B
}

impl SimKey {
    /// Finger vector for pose keys; `None` for toggles.
    pub fn pose(self) -> Option<FingerVector> {
        let bits = match self {
            SimKey::Fist         => [0, 0, 0, 0, 0],
            SimKey::Point        => [0, 1, 0, 0, 0],
            SimKey::TwoFingers   => [0, 1, 1, 0, 0],
            SimKey::ThreeFingers => [0, 1, 1, 1, 0],
            SimKey::FourFingers  => [0, 1, 1, 1, 1],
            SimKey::OpenPalm     => [1, 1, 1, 1, 1],
            SimKey::ToggleHand | SimKey::ToggleSecondHand => return None,
        };
        Some(FingerVector::from_bits(bits))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skeleton geometry, in hand units relative to the wrist (y grows downward)
// ────────────────────────────────────────────────────────────────────────────

/// Hand size as a fraction of frame height.
const HAND_SCALE:     f32 = 0.12;
/// Never smaller than this many pixels, so joints stay distinct after rounding.
const MIN_HAND_PX:    f32 = 40.0;

const THUMB_CMC:      (f32, f32) = (-0.30, -0.20);
const THUMB_MCP:      (f32, f32) = (-0.50, -0.40);
const THUMB_IP:       (f32, f32) = (-0.65, -0.60);
const THUMB_TIP_OPEN: (f32, f32) = (-0.55, -0.85);
const THUMB_TIP_CURL: (f32, f32) = (-0.80, -0.55);

/// (mcp id, mcp x, mcp y, finger length)
const FINGERS: [(usize, f32, f32, f32); 4] = [
    (ids::INDEX_MCP,  -0.25, -1.00, 0.90),
    (ids::MIDDLE_MCP,  0.00, -1.05, 1.00),
    (ids::RING_MCP,    0.22, -1.00, 0.90),
    (ids::PINKY_MCP,   0.42, -0.90, 0.70),
];

/// Landmark offsets for `pose`, wrist at the origin.
fn skeleton(pose: FingerVector) -> [(f32, f32); LANDMARK_COUNT] {
    let [thumb, rest @ ..] = pose.states();
    let mut pts = [(0.0, 0.0); LANDMARK_COUNT];

    pts[ids::THUMB_CMC] = THUMB_CMC;
    pts[ids::THUMB_MCP] = THUMB_MCP;
    pts[ids::THUMB_IP]  = THUMB_IP;
    pts[ids::THUMB_TIP] = if thumb { THUMB_TIP_OPEN } else { THUMB_TIP_CURL };

    for ((mcp, x, y, len), open) in FINGERS.into_iter().zip(rest) {
        pts[mcp] = (x, y);
        if open {
            pts[mcp + 1] = (x, y - len * 0.45);
            pts[mcp + 2] = (x, y - len * 0.75);
            pts[mcp + 3] = (x, y - len);
        } else {
            pts[mcp + 1] = (x,        y - 0.25);
            pts[mcp + 2] = (x + 0.01, y - 0.15);
            pts[mcp + 3] = (x + 0.02, y - 0.05);
        }
    }
    pts
}

/// Place a posed hand so its index tip sits at pixel `tip`.
/// `mirrored` flips it left-right (for the second hand).
pub fn synthesize_hand(pose: FingerVector, tip: (f32, f32), width: u32, height: u32, mirrored: bool) -> DetectedHand {
    let (w, h) = (width.max(1) as f32, height.max(1) as f32);
    let scale = (h * HAND_SCALE).max(MIN_HAND_PX);
    let flip = if mirrored { -1.0 } else { 1.0 };

    let pts = skeleton(pose);
    let anchor = pts[ids::INDEX_TIP];
    let landmarks = pts.map(|(x, y)| {
        let px = tip.0 + (x - anchor.0) * scale * flip;
        let py = tip.1 + (y - anchor.1) * scale;
        NormalizedLandmark::new(px / w, py / h)
    });

    let handedness = if mirrored { Handedness::Left } else { Handedness::Right };
    DetectedHand::new(landmarks).with_handedness(Some(handedness))
}

// ════════════════════════════════════════════════════════════════════════════
// SimulatedHands
// ════════════════════════════════════════════════════════════════════════════

pub struct SimulatedHands {
    rx:      Receiver<SimInput>,
    pose:    FingerVector,
    visible: bool,
    dual:    bool,
    /// Last pointer position in pixels; `None` until the mouse moves.
    pointer: Option<(f32, f32)>,
}

impl SimulatedHands {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimulatedHands {
            rx,
            pose:    FingerVector::from_mask(0),
            visible: true,
            dual:    false,
            pointer: None,
        }
    }

    pub fn pose(&self) -> FingerVector { self.pose }

    fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::Pointer { x, y } => self.pointer = Some((x, y)),
            SimInput::KeyDown(SimKey::ToggleHand) => {
                self.visible = !self.visible;
                debug!(visible = self.visible, "simulated hand toggled");
            }
            SimInput::KeyDown(SimKey::ToggleSecondHand) => {
                self.dual = !self.dual;
                debug!(dual = self.dual, "second simulated hand toggled");
            }
            SimInput::KeyDown(key) => {
                if let Some(pose) = key.pose() {
                    self.pose = pose;
                    debug!(%pose, "simulated pose");
                }
            }
        }
    }

    fn drain(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(input) => self.apply(input),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
    }
}

impl HandDetector for SimulatedHands {
    fn describe(&self) -> String {
        "simulated hands (keyboard + mouse)".to_string()
    }

    fn detect(&mut self, frame: &RgbImage, _timestamp_ms: Option<u64>) -> Result<FrameObservation> {
        self.drain();
        if !self.visible {
            return Ok(FrameObservation::empty());
        }

        let (w, h) = frame.dimensions();
        let tip = self.pointer.unwrap_or((w as f32 / 2.0, h as f32 / 2.0));
        let mut hands = vec![synthesize_hand(self.pose, tip, w, h, false)];
        if self.dual {
            let other = (w as f32 - tip.0, tip.1);
            hands.push(synthesize_hand(self.pose, other, w, h, true));
        }
        Ok(FrameObservation::new(hands))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
