//! # hand_pose
//!
//! The hand-landmark side of the air painter: the 21-point landmark model a
//! detector hands us each frame, conversion from fractional to pixel
//! coordinates, and the reduction of one hand to a five-finger open/closed
//! vector.
//!
//! No external crates are required.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_pose::{DetectedHand, NormalizedLandmark, normalize, classify};
//!
//! let hand = DetectedHand::new([NormalizedLandmark::new(0.5, 0.5); 21]);
//! let pixels = normalize(&[hand], 640, 480, 0);
//! assert_eq!(pixels[8].x, 320);
//!
//! // Every tip level with its reference joint → every finger reads closed.
//! let fingers = classify(&pixels).unwrap();
//! assert_eq!(fingers.to_string(), "[0,0,0,0,0]");
//! ```

pub mod fingers;
pub mod landmark;
pub mod normalize;

pub use fingers::{classify, classify_with, Axis, Finger, FingerRule, FingerVector, FINGER_RULES};
pub use landmark::{
    ids, DetectedHand, FrameObservation, Handedness, Landmark, NormalizedLandmark,
    LANDMARK_COUNT, MAX_HANDS,
};
pub use normalize::{normalize, normalize_hand};
