//! Gesture alphabet and the per-frame state machine.
//!
//! Nothing is sticky between frames except [`DrawState`](crate::state::DrawState): each frame's hand
//! count and finger vector pick the mode afresh, in this priority order:
//!
//! 1. two hands → `ScaleDual` (brush size from fingertip distance)
//! 2. no hands → `Idle`
//! 3. one hand → first matching row of the [`GestureTable`], else `Idle`
//!
//! Every outcome except `Draw` breaks the current stroke.

use glam::IVec2;
use hand_pose::{classify, ids, normalize, Finger, FingerVector, FrameObservation, Landmark};
use image::Rgb;
use tracing::debug;

use crate::color::PaletteColor;
use crate::scaler::{BimanualScaler, ScalePreview};
use crate::session::Session;
use crate::state::Mode;
use crate::stroke::extend_stroke;

/// Added to the brush thickness to get the eraser radius.
pub const ERASER_MARGIN: u32 = 20;

/// Eraser disc radius for a brush of `thickness`.
pub fn eraser_radius(thickness: u32) -> i32 {
    i32::try_from(thickness.saturating_add(ERASER_MARGIN)).unwrap_or(i32::MAX)
}

// ════════════════════════════════════════════════════════════════════════════
// Alphabet
// ════════════════════════════════════════════════════════════════════════════

/// What a single-hand pose asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureAction {
    /// Selection pose; `Some` switches the brush color.
    Select(Option<PaletteColor>),
    Erase,
    Draw,
    Idle,
}

impl GestureAction {
    pub fn mode(self) -> Mode {
        match self {
            GestureAction::Select(_) => Mode::Select,
            GestureAction::Erase     => Mode::Erase,
            GestureAction::Draw      => Mode::Draw,
            GestureAction::Idle      => Mode::Idle,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum FingerPattern {
    Exact(FingerVector),
    Matches(fn(FingerVector) -> bool),
}

impl FingerPattern {
    pub fn matches(&self, fingers: FingerVector) -> bool {
        match self {
            FingerPattern::Exact(v)   => *v == fingers,
            FingerPattern::Matches(f) => f(fingers),
        }
    }
}

/// Thumb down, index up, and at least one of middle / ring / pinky up.
pub fn is_select_pose(fingers: FingerVector) -> bool {
    !fingers.is_open(Finger::Thumb)
        && fingers.is_open(Finger::Index)
        && (fingers.is_open(Finger::Middle)
            || fingers.is_open(Finger::Ring)
            || fingers.is_open(Finger::Pinky))
}

#[derive(Clone, Copy, Debug)]
pub struct GestureRule {
    pub pattern: FingerPattern,
    pub action:  GestureAction,
}

const fn exact(bits: [u8; 5], action: GestureAction) -> GestureRule {
    GestureRule { pattern: FingerPattern::Exact(FingerVector::from_bits(bits)), action }
}

/// The standard alphabet.  Row order is match priority.
pub const DEFAULT_GESTURES: [GestureRule; 6] = [
    exact([0, 1, 1, 0, 0], GestureAction::Select(Some(PaletteColor::Red))),
    exact([0, 1, 1, 1, 0], GestureAction::Select(Some(PaletteColor::Green))),
    exact([0, 1, 1, 1, 1], GestureAction::Select(Some(PaletteColor::Blue))),
    GestureRule { pattern: FingerPattern::Matches(is_select_pose), action: GestureAction::Select(None) },
    exact([1, 1, 1, 1, 1], GestureAction::Erase),
    exact([0, 1, 0, 0, 0], GestureAction::Draw),
];

/// Ordered (pattern, action) rows with an `Idle` fallback.
#[derive(Clone, Debug)]
pub struct GestureTable {
    rules: Vec<GestureRule>,
}

impl Default for GestureTable {
    fn default() -> Self {
        GestureTable::new(DEFAULT_GESTURES.to_vec())
    }
}

impl GestureTable {
    pub fn new(rules: Vec<GestureRule>) -> Self {
        GestureTable { rules }
    }

    pub fn rules(&self) -> &[GestureRule] { &self.rules }

    pub fn resolve(&self, fingers: FingerVector) -> GestureAction {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(fingers))
            .map_or(GestureAction::Idle, |rule| rule.action)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FrameReport
// ════════════════════════════════════════════════════════════════════════════

/// What one frame did, for annotating the live view.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub mode:       Mode,
    pub hand_count: usize,
    pub fingers:    Option<FingerVector>,
    /// Color chosen this frame, if a color pose was shown.
    pub selected:   Option<PaletteColor>,
    /// Index fingertip of the single tracked hand.
    pub fingertip:  Option<IVec2>,
    pub color:      Rgb<u8>,
    pub thickness:  u32,
    pub preview:    Option<ScalePreview>,
}

// ════════════════════════════════════════════════════════════════════════════
// GestureStateMachine
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default)]
pub struct GestureStateMachine {
    table:  GestureTable,
    scaler: BimanualScaler,
}

impl GestureStateMachine {
    pub fn new(table: GestureTable, scaler: BimanualScaler) -> Self {
        GestureStateMachine { table, scaler }
    }

    pub fn table(&self) -> &GestureTable { &self.table }

    /// Normalise a detector frame against the canvas size and step.
    pub fn process(&self, session: &mut Session, frame: &FrameObservation) -> FrameReport {
        let (width, height) = session.canvas().dimensions();
        let hands: Vec<Vec<Landmark>> = (0..frame.hand_count())
            .map(|i| normalize(frame.hands(), width, height, i))
            .filter(|hand| !hand.is_empty())
            .collect();
        self.step(session, &hands)
    }

    /// Advance one frame given already-normalised hands.
    pub fn step(&self, session: &mut Session, hands: &[Vec<Landmark>]) -> FrameReport {
        let previous = session.state().mode;

        let report = match hands {
            [first, second, ..] => self.scale_dual(session, first, second),
            [hand]              => self.single_hand(session, hand),
            []                  => self.idle(session, 0, None, None),
        };

        session.state_mut().mode = report.mode;
        if report.mode != previous {
            debug!(from = %previous, to = %report.mode, hands = report.hand_count, "mode change");
        }
        report
    }

    fn scale_dual(&self, session: &mut Session, first: &[Landmark], second: &[Landmark]) -> FrameReport {
        let (Some(a), Some(b)) = (index_tip(first), index_tip(second)) else {
            return self.idle(session, 2, None, None);
        };
        let state = session.state_mut();
        state.break_stroke();
        let preview = self.scaler.apply(state, a, b);
        self.report(session, Mode::ScaleDual, 2, None, None, None, Some(preview))
    }

    fn single_hand(&self, session: &mut Session, hand: &[Landmark]) -> FrameReport {
        let (Some(fingers), Some(tip)) = (classify(hand), index_tip(hand)) else {
            return self.idle(session, 1, None, None);
        };

        let action = self.table.resolve(fingers);
        let mut selected = None;

        match action {
            GestureAction::Select(color) => {
                let state = session.state_mut();
                state.break_stroke();
                if let Some(c) = color {
                    if state.color != c.rgb() {
                        debug!(color = c.name(), "brush color");
                    }
                    state.color = c.rgb();
                    selected = Some(c);
                }
            }
            GestureAction::Erase => {
                let (canvas, state) = session.parts_mut();
                state.break_stroke();
                let radius = eraser_radius(state.thickness());
                canvas.erase_disc(tip, radius);
            }
            GestureAction::Draw => {
                let (canvas, state) = session.parts_mut();
                extend_stroke(canvas, state, tip);
            }
            GestureAction::Idle => {
                return self.idle(session, 1, Some(fingers), Some(tip));
            }
        }

        self.report(session, action.mode(), 1, Some(fingers), selected, Some(tip), None)
    }

    fn idle(&self, session: &mut Session, hand_count: usize, fingers: Option<FingerVector>, tip: Option<IVec2>) -> FrameReport {
        session.state_mut().break_stroke();
        self.report(session, Mode::Idle, hand_count, fingers, None, tip, None)
    }

    #[allow(clippy::too_many_arguments)]
    fn report(
        &self,
        session:    &Session,
        mode:       Mode,
        hand_count: usize,
        fingers:    Option<FingerVector>,
        selected:   Option<PaletteColor>,
        fingertip:  Option<IVec2>,
        preview:    Option<ScalePreview>,
    ) -> FrameReport {
        let state = session.state();
        FrameReport {
            mode,
            hand_count,
            fingers,
            selected,
            fingertip,
            color:     state.color,
            thickness: state.thickness(),
            preview,
        }
    }
}

fn index_tip(hand: &[Landmark]) -> Option<IVec2> {
    hand.get(ids::INDEX_TIP).map(|lm| IVec2::new(lm.x, lm.y))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_pose::LANDMARK_COUNT;

    fn v(bits: [u8; 5]) -> FingerVector { FingerVector::from_bits(bits) }

    /// Pixel hand posed as `bits` with its index tip at `tip`.
    fn posed_hand(bits: [u8; 5], tip: IVec2) -> Vec<Landmark> {
        let mut pts: Vec<Landmark> = (0..LANDMARK_COUNT)
            .map(|id| Landmark { id, x: tip.x, y: tip.y + 40 })
            .collect();
        let fingers = [
            (ids::THUMB_TIP,  ids::THUMB_IP),
            (ids::INDEX_TIP,  ids::INDEX_PIP),
            (ids::MIDDLE_TIP, ids::MIDDLE_PIP),
            (ids::RING_TIP,   ids::RING_PIP),
            (ids::PINKY_TIP,  ids::PINKY_PIP),
        ];
        for (slot, (tip_id, ref_id)) in fingers.into_iter().enumerate() {
            let open = bits[slot] != 0;
            if slot == 0 {
                pts[ref_id].x = tip.x - 20;
                pts[tip_id].x = if open { tip.x } else { tip.x - 40 };
            } else {
                pts[ref_id].y = tip.y + 20;
                pts[tip_id].y = if open { tip.y } else { tip.y + 40 };
            }
        }
        pts[ids::INDEX_TIP].x = tip.x;
        pts[ids::INDEX_TIP].y = if bits[1] != 0 { tip.y } else { tip.y + 40 };
        pts
    }

    fn session() -> Session { Session::new(200, 200).unwrap() }

    #[test]
    fn table_resolves_alphabet() {
        let t = GestureTable::default();
        assert_eq!(t.resolve(v([0, 1, 1, 0, 0])), GestureAction::Select(Some(PaletteColor::Red)));
        assert_eq!(t.resolve(v([0, 1, 1, 1, 0])), GestureAction::Select(Some(PaletteColor::Green)));
        assert_eq!(t.resolve(v([0, 1, 1, 1, 1])), GestureAction::Select(Some(PaletteColor::Blue)));
        assert_eq!(t.resolve(v([0, 1, 0, 1, 0])), GestureAction::Select(None));
        assert_eq!(t.resolve(v([0, 1, 0, 0, 1])), GestureAction::Select(None));
        assert_eq!(t.resolve(v([1, 1, 1, 1, 1])), GestureAction::Erase);
        assert_eq!(t.resolve(v([0, 1, 0, 0, 0])), GestureAction::Draw);
        assert_eq!(t.resolve(v([0, 0, 0, 0, 0])), GestureAction::Idle);
        assert_eq!(t.resolve(v([1, 1, 1, 0, 0])), GestureAction::Idle);
        assert_eq!(t.resolve(v([1, 1, 0, 0, 0])), GestureAction::Idle);
    }

    #[test]
    fn select_pose_predicate() {
        for mask in 0u8..32 {
            let f = FingerVector::from_mask(mask);
            let expected = mask & 0b00011 == 0b00010 && mask & 0b11100 != 0;
            assert_eq!(is_select_pose(f), expected, "{f}");
        }
    }

    #[test]
    fn custom_table_is_respected() {
        let table = GestureTable::new(vec![exact([0, 0, 0, 0, 0], GestureAction::Draw)]);
        assert_eq!(table.resolve(v([0, 0, 0, 0, 0])), GestureAction::Draw);
        assert_eq!(table.resolve(v([0, 1, 0, 0, 0])), GestureAction::Idle);
    }

    #[test]
    fn posed_hand_helper_round_trips() {
        for mask in 0u8..32 {
            let f = FingerVector::from_mask(mask);
            let hand = posed_hand(f.states().map(u8::from), IVec2::new(100, 100));
            assert_eq!(classify(&hand), Some(f));
        }
    }

    #[test]
    fn draw_sets_previous_point() {
        let mut s = session();
        let m = GestureStateMachine::default();
        let r = m.step(&mut s, &[posed_hand([0, 1, 0, 0, 0], IVec2::new(50, 60))]);
        assert_eq!(r.mode, Mode::Draw);
        assert_eq!(r.fingertip, Some(IVec2::new(50, 60)));
        assert_eq!(s.state().previous_point, Some(IVec2::new(50, 60)));
        assert_eq!(s.state().mode, Mode::Draw);
    }

    #[test]
    fn select_changes_color_and_breaks_stroke() {
        let mut s = session();
        let m = GestureStateMachine::default();
        m.step(&mut s, &[posed_hand([0, 1, 0, 0, 0], IVec2::new(50, 60))]);

        let r = m.step(&mut s, &[posed_hand([0, 1, 1, 1, 0], IVec2::new(50, 60))]);
        assert_eq!(r.mode, Mode::Select);
        assert_eq!(r.selected, Some(PaletteColor::Green));
        assert_eq!(s.state().color, PaletteColor::Green.rgb());
        assert_eq!(s.state().previous_point, None);
    }

    #[test]
    fn unlisted_select_keeps_color() {
        let mut s = session();
        let m = GestureStateMachine::default();
        m.step(&mut s, &[posed_hand([0, 1, 1, 1, 1], IVec2::new(50, 60))]);
        let r = m.step(&mut s, &[posed_hand([0, 1, 0, 1, 0], IVec2::new(50, 60))]);
        assert_eq!(r.mode, Mode::Select);
        assert_eq!(r.selected, None);
        assert_eq!(s.state().color, PaletteColor::Blue.rgb());
    }

    #[test]
    fn degenerate_pose_is_silent_idle() {
        let mut s = session();
        let m = GestureStateMachine::default();
        m.step(&mut s, &[posed_hand([0, 1, 0, 0, 0], IVec2::new(50, 60))]);
        let painted = s.canvas().painted_pixels();

        let r = m.step(&mut s, &[posed_hand([1, 0, 0, 0, 1], IVec2::new(90, 90))]);
        assert_eq!(r.mode, Mode::Idle);
        assert_eq!(s.state().previous_point, None);
        assert_eq!(s.canvas().painted_pixels(), painted);
    }

    #[test]
    fn two_hands_scale_without_painting() {
        let mut s = session();
        let m = GestureStateMachine::default();
        m.step(&mut s, &[posed_hand([0, 1, 0, 0, 0], IVec2::new(20, 20))]);
        let painted = s.canvas().painted_pixels();

        let r = m.step(&mut s, &[
            posed_hand([0, 1, 0, 0, 0], IVec2::new(20, 100)),
            posed_hand([0, 1, 0, 0, 0], IVec2::new(195, 100)),
        ]);
        assert_eq!(r.mode, Mode::ScaleDual);
        assert_eq!(r.hand_count, 2);
        assert_eq!(r.thickness, 28);
        assert_eq!(s.state().previous_point, None);
        assert_eq!(s.canvas().painted_pixels(), painted);
        assert!(r.preview.is_some());
    }

    #[test]
    fn no_hands_is_idle() {
        let mut s = session();
        let m = GestureStateMachine::default();
        m.step(&mut s, &[posed_hand([0, 1, 0, 0, 0], IVec2::new(20, 20))]);
        let r = m.step(&mut s, &[]);
        assert_eq!(r.mode, Mode::Idle);
        assert_eq!(r.hand_count, 0);
        assert_eq!(s.state().previous_point, None);
    }

    #[test]
    fn empty_hand_counts_as_idle() {
        let mut s = session();
        let m = GestureStateMachine::default();
        let r = m.step(&mut s, &[Vec::new()]);
        assert_eq!(r.mode, Mode::Idle);
        assert_eq!(r.fingers, None);
    }
}
