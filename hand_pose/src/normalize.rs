//! Fractional → pixel landmark conversion.

use crate::landmark::{DetectedHand, Landmark};

/// Pixel landmarks for hand `hand_index` of `hands`.
///
/// Each coordinate is `round(fraction × dimension)`.  An out-of-range index
/// (including "no hands this frame") yields an empty vector rather than an
/// error; callers treat that exactly like a missing hand.
pub fn normalize(hands: &[DetectedHand], width: u32, height: u32, hand_index: usize) -> Vec<Landmark> {
    match hands.get(hand_index) {
        Some(hand) => normalize_hand(hand, width, height),
        None       => Vec::new(),
    }
}

/// Pixel landmarks for a single hand, ordered by landmark id.
pub fn normalize_hand(hand: &DetectedHand, width: u32, height: u32) -> Vec<Landmark> {
    let (w, h) = (width as f32, height as f32);
    hand.landmarks
        .iter()
        .enumerate()
        .map(|(id, lm)| Landmark {
            id,
            x: (lm.x * w).round() as i32,
            y: (lm.y * h).round() as i32,
        })
        .collect()
}
