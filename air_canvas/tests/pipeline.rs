//! End-to-end pipeline tests: detector-style fractional hands in, canvas and
//! composited frame out.

use air_canvas::{GestureStateMachine, Mode, PaletteColor, Session};
use glam::IVec2;
use hand_pose::{ids, DetectedHand, FingerVector, FrameObservation, NormalizedLandmark, LANDMARK_COUNT};
use image::{Rgb, RgbImage};

const W: u32 = 500;
const H: u32 = 400;

/// Detector output for one hand posed as `bits`, index tip at pixel `tip`.
fn hand(bits: [u8; 5], tip: (i32, i32)) -> DetectedHand {
    let (tx, ty) = tip;
    let mut px = [(tx, ty + 60); LANDMARK_COUNT];

    // Thumb: open when its tip is right of the IP joint.
    px[ids::THUMB_IP]  = (tx - 30, ty + 50);
    px[ids::THUMB_TIP] = if bits[0] != 0 { (tx - 10, ty + 45) } else { (tx - 50, ty + 45) };

    // Fingers: open when the tip is above the PIP joint.
    let fingers = [
        (1, ids::INDEX_PIP,  ids::INDEX_TIP,  0),
        (2, ids::MIDDLE_PIP, ids::MIDDLE_TIP, -12),
        (3, ids::RING_PIP,   ids::RING_TIP,   -24),
        (4, ids::PINKY_PIP,  ids::PINKY_TIP,  -36),
    ];
    for (slot, pip, tip_id, dx) in fingers {
        px[pip]    = (tx + dx, ty + 30);
        px[tip_id] = if bits[slot] != 0 { (tx + dx, ty) } else { (tx + dx, ty + 45) };
    }
    // Keep the index tip where the caller asked even when curled.
    px[ids::INDEX_TIP] = (tx, if bits[1] != 0 { ty } else { ty + 45 });

    let landmarks = px.map(|(x, y)| NormalizedLandmark::new(x as f32 / W as f32, y as f32 / H as f32));
    DetectedHand::new(landmarks)
}

fn one(bits: [u8; 5], tip: (i32, i32)) -> FrameObservation {
    FrameObservation::new(vec![hand(bits, tip)])
}

fn two(a: (i32, i32), b: (i32, i32)) -> FrameObservation {
    FrameObservation::new(vec![hand([0, 1, 0, 0, 0], a), hand([0, 1, 0, 0, 0], b)])
}

const DRAW:   [u8; 5] = [0, 1, 0, 0, 0];
const ERASE:  [u8; 5] = [1, 1, 1, 1, 1];
const GREEN:  [u8; 5] = [0, 1, 1, 1, 0];

fn setup() -> (Session, GestureStateMachine) {
    (Session::new(W, H).unwrap(), GestureStateMachine::default())
}

fn live_frame() -> RgbImage {
    RgbImage::from_fn(W, H, |x, y| Rgb([(x % 251) as u8 + 1, (y % 251) as u8 + 1, 128]))
}

fn expected_mode(f: FingerVector) -> Mode {
    let [thumb, index, middle, ring, pinky] = f.states();
    if !thumb && index && (middle || ring || pinky) {
        Mode::Select
    } else if f.states() == [true; 5] {
        Mode::Erase
    } else if f.states() == [false, true, false, false, false] {
        Mode::Draw
    } else {
        Mode::Idle
    }
}

#[test]
fn every_single_hand_vector_is_deterministic() {
    for mask in 0u8..32 {
        let f = FingerVector::from_mask(mask);
        let frame = one(f.states().map(u8::from), (200, 200));

        let (mut s1, m) = setup();
        let (mut s2, _) = setup();
        let first  = m.process(&mut s1, &frame);
        let second = m.process(&mut s2, &frame);

        assert_eq!(first, second, "{f}");
        assert_eq!(first.fingers, Some(f));
        assert_eq!(first.mode, expected_mode(f), "{f}");
        assert_eq!(s1.canvas().pixels(), s2.canvas().pixels(), "{f}");
    }
}

#[test]
fn color_poses_select_palette() {
    let (mut s, m) = setup();
    for (bits, color) in [
        ([0, 1, 1, 0, 0], PaletteColor::Red),
        ([0, 1, 1, 1, 0], PaletteColor::Green),
        ([0, 1, 1, 1, 1], PaletteColor::Blue),
    ] {
        let r = m.process(&mut s, &one(bits, (100, 100)));
        assert_eq!(r.selected, Some(color));
        assert_eq!(s.state().color, color.rgb());
    }
}

#[test]
fn consecutive_draw_frames_make_a_segment() {
    let (mut s, m) = setup();
    m.process(&mut s, &one(GREEN, (10, 10)));
    m.process(&mut s, &one(DRAW, (10, 10)));
    m.process(&mut s, &one(DRAW, (20, 10)));

    let green = PaletteColor::Green.rgb();
    let canvas = s.canvas();
    for x in 10..=20 {
        assert_eq!(canvas.pixel(x, 10), Some(green), "centre line at x={x}");
        // thickness 15 → 7 px either side of the centre line
        assert_eq!(canvas.pixel(x, 17), Some(green), "lower edge at x={x}");
        assert_eq!(canvas.pixel(x, 3), Some(green), "upper edge at x={x}");
    }
    assert!(canvas.is_transparent(15, 19));
    assert!(canvas.is_transparent(30, 10));
}

#[test]
fn open_palm_erases_disc_and_reveals_frame() {
    let (mut s, m) = setup();
    // A painted cross through (50, 50): one horizontal band, one vertical.
    m.process(&mut s, &one(DRAW, (0, 50)));
    m.process(&mut s, &one(DRAW, (150, 50)));
    m.process(&mut s, &FrameObservation::empty());
    m.process(&mut s, &one(DRAW, (50, 0)));
    m.process(&mut s, &one(DRAW, (50, 150)));
    assert!(!s.canvas().is_transparent(50, 50));

    let r = m.process(&mut s, &one(ERASE, (50, 50)));
    assert_eq!(r.mode, Mode::Erase);
    assert_eq!(s.state().thickness(), 15);

    // thickness 15 + margin 20 → radius 35, so 15..=85 is cleared on both axes
    let canvas = s.canvas();
    for d in [15, 20, 50, 80, 85] {
        assert!(canvas.is_transparent(d, 50), "inside eraser at x={d}");
        assert!(canvas.is_transparent(50, d), "inside eraser at y={d}");
    }
    for d in [14, 86] {
        assert!(!canvas.is_transparent(d, 50), "outside eraser at x={d}");
        assert!(!canvas.is_transparent(50, d), "outside eraser at y={d}");
    }

    let live = live_frame();
    let shown = s.composite(&live).unwrap();
    assert_eq!(shown.get_pixel(50, 50), live.get_pixel(50, 50));
    assert_eq!(shown.get_pixel(50, 30), live.get_pixel(50, 30));
    assert_eq!(*shown.get_pixel(120, 50), PaletteColor::Red.rgb());
}

#[test]
fn bimanual_distance_maps_and_clamps() {
    let (mut s, m) = setup();
    for (dx, thickness) in [(50, 5), (300, 50), (400, 50), (10, 5), (175, 28)] {
        let r = m.process(&mut s, &two((50, 200), (50 + dx, 200)));
        assert_eq!(r.mode, Mode::ScaleDual);
        assert_eq!(r.thickness, thickness, "distance {dx}");
        assert_eq!(s.state().thickness(), thickness);
    }
    assert_eq!(s.canvas().painted_pixels(), 0);
}

#[test]
fn losing_the_hand_breaks_the_stroke() {
    let (mut s, m) = setup();
    m.process(&mut s, &one(DRAW, (100, 300)));
    let r = m.process(&mut s, &FrameObservation::empty());
    assert_eq!(r.mode, Mode::Idle);
    m.process(&mut s, &one(DRAW, (300, 300)));

    let canvas = s.canvas();
    assert!(!canvas.is_transparent(100, 300));
    assert!(!canvas.is_transparent(300, 300));
    assert!(canvas.is_transparent(200, 300));
}

#[test]
fn switching_modes_breaks_the_stroke() {
    let (mut s, m) = setup();
    m.process(&mut s, &one(DRAW, (100, 300)));
    let r = m.process(&mut s, &one(GREEN, (200, 300)));
    assert_eq!(r.mode, Mode::Select);
    m.process(&mut s, &one(DRAW, (300, 300)));

    let canvas = s.canvas();
    assert!(canvas.is_transparent(200, 300));
    assert_eq!(canvas.pixel(100, 300), Some(PaletteColor::Red.rgb()));
    assert_eq!(canvas.pixel(300, 300), Some(PaletteColor::Green.rgb()));
}

#[test]
fn second_hand_appearing_breaks_the_stroke() {
    let (mut s, m) = setup();
    m.process(&mut s, &one(DRAW, (100, 100)));
    m.process(&mut s, &two((100, 100), (250, 100)));
    assert_eq!(s.state().previous_point, None);
    m.process(&mut s, &one(DRAW, (300, 100)));
    assert!(s.canvas().is_transparent(200, 100));
}

#[test]
fn scaled_brush_is_used_for_next_stroke() {
    let (mut s, m) = setup();
    m.process(&mut s, &two((50, 200), (350, 200)));
    m.process(&mut s, &one(DRAW, (250, 250)));
    // thickness 50 → radius 25
    assert!(!s.canvas().is_transparent(250, 274));
    assert!(s.canvas().is_transparent(250, 280));
}

#[test]
fn composite_is_idempotent_after_drawing() {
    let (mut s, m) = setup();
    m.process(&mut s, &one(DRAW, (40, 40)));
    m.process(&mut s, &one(DRAW, (400, 300)));
    let live = live_frame();
    let once = s.composite(&live).unwrap();
    assert_eq!(s.composite(&live).unwrap(), once);
}

#[test]
fn canvas_survives_idle_frames() {
    let (mut s, m) = setup();
    m.process(&mut s, &one(DRAW, (40, 40)));
    let painted = s.canvas().painted_pixels();
    for _ in 0..10 {
        m.process(&mut s, &FrameObservation::empty());
        m.process(&mut s, &one([0, 0, 0, 0, 0], (40, 40)));
    }
    assert_eq!(s.canvas().painted_pixels(), painted);
    assert_eq!(s.canvas().dimensions(), (W, H));
}

#[test]
fn fingertip_reported_in_pixels() {
    let (mut s, m) = setup();
    let r = m.process(&mut s, &one(DRAW, (123, 321)));
    assert_eq!(r.fingertip, Some(IVec2::new(123, 321)));
}

#[test]
fn runaway_fingertip_is_clipped_to_the_canvas() {
    let (mut s, m) = setup();
    m.process(&mut s, &one(DRAW, (100, 100)));

    let mut far = hand(DRAW, (100, 100));
    far.landmarks[ids::INDEX_TIP].x = 1.0e8;
    let r = m.process(&mut s, &FrameObservation::new(vec![far.clone()]));
    assert_eq!(r.mode, Mode::Draw);
    assert_eq!(s.canvas().pixel(W as i32 - 1, 100), Some(PaletteColor::Red.rgb()));

    // erasing and scaling with the same hand stay inside the frame too
    let mut palm = hand(ERASE, (100, 100));
    palm.landmarks[ids::INDEX_TIP].x = -1.0e8;
    assert_eq!(m.process(&mut s, &FrameObservation::new(vec![palm])).mode, Mode::Erase);
    let r = m.process(&mut s, &FrameObservation::new(vec![hand(DRAW, (10, 10)), far]));
    assert_eq!(r.mode, Mode::ScaleDual);
    assert_eq!(r.thickness, 50);
    assert_eq!(s.canvas().dimensions(), (W, H));
}
