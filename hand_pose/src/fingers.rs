//! Finger open/closed classification.
//!
//! Each finger is decided by one rule in [`FINGER_RULES`]: compare the tip
//! landmark against a reference joint along one image axis.
//!
//! | Finger | Tip | Reference | Axis | Open when |
//! |---|---|---|---|---|
//! | Thumb  | 4  | 3 (IP)   | x | tip.x > ref.x |
//! | Index  | 8  | 6 (PIP)  | y | tip.y < ref.y |
//! | Middle | 12 | 10 (PIP) | y | tip.y < ref.y |
//! | Ring   | 16 | 14 (PIP) | y | tip.y < ref.y |
//! | Pinky  | 20 | 18 (PIP) | y | tip.y < ref.y |
//!
//! The thumb rule is handedness-dependent: it reads correctly for one hand
//! in a mirrored feed and inverted for the other.  It is kept as-is.

use std::cmp::Ordering;
use std::fmt;

use crate::landmark::{ids, Landmark, LANDMARK_COUNT};

// ════════════════════════════════════════════════════════════════════════════
// Finger / FingerVector
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger { Thumb, Index, Middle, Ring, Pinky }

impl Finger {
    /// Vector order: thumb first, pinky last.
    pub const ALL: [Finger; 5] = [
        Finger::Thumb, Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky,
    ];

    pub fn slot(self) -> usize {
        match self {
            Finger::Thumb  => 0,
            Finger::Index  => 1,
            Finger::Middle => 2,
            Finger::Ring   => 3,
            Finger::Pinky  => 4,
        }
    }
}

/// Open (`true`) / closed (`false`) state of all five fingers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FingerVector([bool; 5]);

impl FingerVector {
    pub const fn new(states: [bool; 5]) -> Self { FingerVector(states) }

    /// `[0,1,0,0,0]`-style notation; any non-zero entry is open.
    pub const fn from_bits(bits: [u8; 5]) -> Self {
        FingerVector([bits[0] != 0, bits[1] != 0, bits[2] != 0, bits[3] != 0, bits[4] != 0])
    }

    /// Bit `n` of `mask` is finger slot `n` (thumb = bit 0).  Upper bits ignored.
    pub const fn from_mask(mask: u8) -> Self {
        FingerVector([
            mask & 0b00001 != 0,
            mask & 0b00010 != 0,
            mask & 0b00100 != 0,
            mask & 0b01000 != 0,
            mask & 0b10000 != 0,
        ])
    }

    pub fn is_open(&self, finger: Finger) -> bool { self.0[finger.slot()] }
    pub fn states(&self) -> [bool; 5]               { self.0 }
    pub fn open_count(&self) -> usize               { self.0.iter().filter(|&&s| s).count() }
}

impl fmt::Display for FingerVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, open) in self.0.iter().enumerate() {
            if i > 0 { f.write_str(",")?; }
            f.write_str(if *open { "1" } else { "0" })?;
        }
        f.write_str("]")
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Rule table
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis { Horizontal, Vertical }

/// "Finger is open when `tip` compares `open_when` against `reference` on `axis`."
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FingerRule {
    pub finger:    Finger,
    pub tip:       usize,
    pub reference: usize,
    pub axis:      Axis,
    pub open_when: Ordering,
}

impl FingerRule {
    /// Landmarks are looked up by id, so `hand` must be id-ordered.
    pub fn is_open(&self, hand: &[Landmark]) -> bool {
        let (tip, reference) = match (hand.get(self.tip), hand.get(self.reference)) {
            (Some(t), Some(r)) => (t, r),
            _ => return false,
        };
        let ord = match self.axis {
            Axis::Horizontal => tip.x.cmp(&reference.x),
            Axis::Vertical   => tip.y.cmp(&reference.y),
        };
        ord == self.open_when
    }
}

pub const FINGER_RULES: [FingerRule; 5] = [
    FingerRule { finger: Finger::Thumb,  tip: ids::THUMB_TIP,  reference: ids::THUMB_IP,   axis: Axis::Horizontal, open_when: Ordering::Greater },
    FingerRule { finger: Finger::Index,  tip: ids::INDEX_TIP,  reference: ids::INDEX_PIP,  axis: Axis::Vertical,   open_when: Ordering::Less },
    FingerRule { finger: Finger::Middle, tip: ids::MIDDLE_TIP, reference: ids::MIDDLE_PIP, axis: Axis::Vertical,   open_when: Ordering::Less },
    FingerRule { finger: Finger::Ring,   tip: ids::RING_TIP,   reference: ids::RING_PIP,   axis: Axis::Vertical,   open_when: Ordering::Less },
    FingerRule { finger: Finger::Pinky,  tip: ids::PINKY_TIP,  reference: ids::PINKY_PIP,  axis: Axis::Vertical,   open_when: Ordering::Less },
];

// ════════════════════════════════════════════════════════════════════════════
// Classification
// ════════════════════════════════════════════════════════════════════════════

/// Classify a normalised hand with [`FINGER_RULES`].
///
/// Returns `None` for an empty (or otherwise incomplete) hand.
pub fn classify(hand: &[Landmark]) -> Option<FingerVector> {
    classify_with(&FINGER_RULES, hand)
}

pub fn classify_with(rules: &[FingerRule; 5], hand: &[Landmark]) -> Option<FingerVector> {
    if hand.len() != LANDMARK_COUNT {
        return None;
    }
    let mut states = [false; 5];
    for rule in rules {
        states[rule.finger.slot()] = rule.is_open(hand);
    }
    Some(FingerVector(states))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
