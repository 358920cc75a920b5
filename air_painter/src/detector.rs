//! Hand landmark detectors.
//!
//! The public interface is [`HandDetector`]: one frame in, zero to two
//! [`DetectedHand`]s out.  The run loop does not care whether hands came
//! from the keyboard simulator ([`crate::sim::SimulatedHands`]) or from an
//! external model ([`DetectorProcess`]).
//!
//! ## Detector process protocol
//!
//! The child prints `READY` on its own line once its model is loaded.  Then,
//! per frame, the painter writes a little-endian header followed by the raw
//! RGB bytes:
//!
//! | Field | Type |
//! |---|---|
//! | width | `u32` |
//! | height | `u32` |
//! | channels | `u32` (always 3) |
//! | timestamp_ms | `u64` |
//! | pixels | `width × height × 3` bytes, row-major |
//!
//! and reads back exactly one JSON line:
//!
//! ```text
//! {"hands":[{"handedness":"Right","score":0.93,"landmarks":[{"x":0.41,"y":0.62,"z":-0.01}, …21]}],"error":null}
//! ```

use std::io::{BufRead, BufReader, Write};
use std::ops::RangeInclusive;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::Instant;

use hand_pose::{DetectedHand, FrameObservation, Handedness, NormalizedLandmark, LANDMARK_COUNT};
use image::RgbImage;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{PainterError, Result};

// ════════════════════════════════════════════════════════════════════════════
// HandDetector trait
// ════════════════════════════════════════════════════════════════════════════

pub trait HandDetector {
    fn describe(&self) -> String;

    /// Find hands in `frame`.  `timestamp_ms`, when given, must be strictly
    /// increasing across calls (see [`FrameClock`]).
    fn detect(&mut self, frame: &RgbImage, timestamp_ms: Option<u64>) -> Result<FrameObservation>;
}

/// Strictly increasing millisecond timestamps for the detector.
pub struct FrameClock {
    start: Instant,
    last:  Option<u64>,
}

impl FrameClock {
    pub fn start() -> Self {
        FrameClock { start: Instant::now(), last: None }
    }

    pub fn next_timestamp(&mut self) -> u64 {
        let elapsed = self.start.elapsed().as_millis() as u64;
        let ts = match self.last {
            Some(last) if elapsed <= last => last + 1,
            _ => elapsed,
        };
        self.last = Some(ts);
        ts
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wire format
// ════════════════════════════════════════════════════════════════════════════

pub const READY_LINE: &str = "READY";
const CHANNELS:       u32  = 3;

/// Landmarks may sit a little outside the frame; beyond this they are junk.
const COORD_RANGE: RangeInclusive<f32> = -1.0..=2.0;

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    hands: Vec<WireHand>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireHand {
    #[serde(default)]
    handedness: Option<String>,
    #[serde(default = "full_confidence")]
    score:      f32,
    landmarks:  Vec<WireLandmark>,
}

#[derive(Debug, Deserialize)]
struct WireLandmark {
    x: f32,
    y: f32,
    #[serde(default)]
    z: f32,
}

fn full_confidence() -> f32 { 1.0 }

/// Write one frame request: header then pixels.
pub fn write_frame(out: &mut impl Write, frame: &RgbImage, timestamp_ms: Option<u64>) -> std::io::Result<()> {
    let (w, h) = frame.dimensions();
    out.write_all(&w.to_le_bytes())?;
    out.write_all(&h.to_le_bytes())?;
    out.write_all(&CHANNELS.to_le_bytes())?;
    out.write_all(&timestamp_ms.unwrap_or(0).to_le_bytes())?;
    out.write_all(frame.as_raw())?;
    out.flush()
}

/// Decode one reply line into an observation.
///
/// Hands scored below `min_confidence` are dropped; so is any hand that
/// does not carry exactly 21 landmarks, or whose coordinates are not finite
/// or lie far outside the frame (with a warning).  At most two hands are
/// kept.
pub fn parse_reply(line: &str, min_confidence: f32) -> Result<FrameObservation> {
    let reply: Reply = serde_json::from_str(line.trim())?;
    if let Some(msg) = reply.error {
        return Err(PainterError::Detector(msg));
    }

    let mut hands = Vec::with_capacity(reply.hands.len());
    for (i, wire) in reply.hands.into_iter().enumerate() {
        if wire.score < min_confidence {
            debug!(hand = i, score = wire.score, "dropping low-confidence hand");
            continue;
        }
        let in_range = |l: &&WireLandmark| COORD_RANGE.contains(&l.x) && COORD_RANGE.contains(&l.y);
        if let Some(bad) = wire.landmarks.iter().find(|l| !in_range(l)) {
            warn!(hand = i, x = bad.x, y = bad.y, "dropping hand with out-of-frame landmarks");
            continue;
        }
        let landmarks: Vec<NormalizedLandmark> = wire
            .landmarks
            .iter()
            .map(|l| NormalizedLandmark { x: l.x, y: l.y, z: l.z })
            .collect();
        let Some(hand) = DetectedHand::from_slice(&landmarks) else {
            warn!(hand = i, got = landmarks.len(), expected = LANDMARK_COUNT, "dropping partial hand");
            continue;
        };
        let handedness = wire.handedness.as_deref().and_then(Handedness::parse);
        hands.push(hand.with_handedness(handedness).with_score(wire.score));
    }
    Ok(FrameObservation::new(hands))
}

// ════════════════════════════════════════════════════════════════════════════
// DetectorProcess — external model over stdin/stdout
// ════════════════════════════════════════════════════════════════════════════

pub struct DetectorProcess {
    program:        String,
    child:          Child,
    stdin:          ChildStdin,
    stdout:         BufReader<ChildStdout>,
    min_confidence: f32,
    line:           String,
}

impl DetectorProcess {
    /// Start the detector and wait for its `READY` line.
    pub fn spawn(program: &str, args: &[String], min_confidence: f32) -> Result<Self> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| PainterError::Detector(format!("cannot start `{program}`: {e}")))?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            return Err(PainterError::Detector(format!("`{program}` has no stdio pipes")));
        };

        let mut process = DetectorProcess {
            program: program.to_string(),
            child,
            stdin,
            stdout: BufReader::new(stdout),
            min_confidence,
            line: String::new(),
        };

        let greeting = process.read_line()?;
        if greeting != READY_LINE {
            return Err(PainterError::Detector(format!(
                "`{program}` sent {greeting:?} instead of {READY_LINE}"
            )));
        }
        info!(program, min_confidence, "hand detector ready");
        Ok(process)
    }

    fn read_line(&mut self) -> Result<&str> {
        self.line.clear();
        if self.stdout.read_line(&mut self.line)? == 0 {
            return Err(PainterError::Detector(format!("`{}` closed its output", self.program)));
        }
        Ok(self.line.trim_end())
    }
}

impl HandDetector for DetectorProcess {
    fn describe(&self) -> String {
        format!("detector process `{}`", self.program)
    }

    fn detect(&mut self, frame: &RgbImage, timestamp_ms: Option<u64>) -> Result<FrameObservation> {
        write_frame(&mut self.stdin, frame, timestamp_ms)?;
        let min_confidence = self.min_confidence;
        let line = self.read_line()?;
        parse_reply(line, min_confidence)
    }
}

impl Drop for DetectorProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn hand_json(score: f32, count: usize, handedness: &str) -> String {
        let lms: Vec<String> = (0..count)
            .map(|i| format!(r#"{{"x":{},"y":0.5,"z":0.0}}"#, i as f32 / 100.0))
            .collect();
        format!(r#"{{"handedness":"{handedness}","score":{score},"landmarks":[{}]}}"#, lms.join(","))
    }

    #[test]
    fn parses_two_hands() {
        let line = format!(r#"{{"hands":[{},{}],"error":null}}"#,
            hand_json(0.9, 21, "Right"), hand_json(0.8, 21, "Left"));
        let obs = parse_reply(&line, 0.7).unwrap();
        assert_eq!(obs.hand_count(), 2);
        assert_eq!(obs.hands()[0].handedness, Some(Handedness::Right));
        assert_eq!(obs.hands()[1].handedness, Some(Handedness::Left));
        assert!((obs.hands()[0].landmarks[20].x - 0.2).abs() < 1e-6);
    }

    #[test]
    fn low_confidence_and_partial_hands_are_dropped() {
        let line = format!(r#"{{"hands":[{},{},{}]}}"#,
            hand_json(0.5, 21, "Right"), hand_json(0.95, 20, "Left"), hand_json(0.75, 21, "Left"));
        let obs = parse_reply(&line, 0.7).unwrap();
        assert_eq!(obs.hand_count(), 1);
        assert_eq!(obs.hands()[0].score, 0.75);
    }

    #[test]
    fn runaway_coordinates_drop_the_hand() {
        let good = hand_json(0.9, 21, "Left");
        let far  = hand_json(0.9, 21, "Right").replacen(r#""x":0.01"#, r#""x":1e8"#, 1);
        let line = format!(r#"{{"hands":[{far},{good}]}}"#);
        let obs = parse_reply(&line, 0.7).unwrap();
        assert_eq!(obs.hand_count(), 1);
        assert_eq!(obs.hands()[0].handedness, Some(Handedness::Left));

        let slightly_out = hand_json(0.9, 21, "Right").replacen(r#""x":0.01"#, r#""x":-0.2"#, 1);
        let line = format!(r#"{{"hands":[{slightly_out}]}}"#);
        assert_eq!(parse_reply(&line, 0.7).unwrap().hand_count(), 1);
    }

    #[test]
    fn at_most_two_hands_kept() {
        let h = hand_json(0.9, 21, "Right");
        let line = format!(r#"{{"hands":[{h},{h},{h}]}}"#);
        assert_eq!(parse_reply(&line, 0.0).unwrap().hand_count(), 2);
    }

    #[test]
    fn empty_reply_means_no_hands() {
        assert!(parse_reply(r#"{"hands":[],"error":null}"#, 0.7).unwrap().is_empty());
        assert!(parse_reply("{}", 0.7).unwrap().is_empty());
    }

    #[test]
    fn detector_error_is_reported() {
        let err = parse_reply(r#"{"hands":[],"error":"model crashed"}"#, 0.7).unwrap_err();
        assert!(matches!(err, PainterError::Detector(ref m) if m == "model crashed"));
    }

    #[test]
    fn garbage_is_a_protocol_error() {
        assert!(matches!(parse_reply("hello", 0.7), Err(PainterError::Protocol(_))));
    }

    #[test]
    fn frame_header_is_little_endian() {
        let frame = RgbImage::from_pixel(2, 1, Rgb([1, 2, 3]));
        let mut buf = Vec::new();
        write_frame(&mut buf, &frame, Some(0x0102)).unwrap();
        assert_eq!(&buf[0..4], &2u32.to_le_bytes());
        assert_eq!(&buf[4..8], &1u32.to_le_bytes());
        assert_eq!(&buf[8..12], &3u32.to_le_bytes());
        assert_eq!(&buf[12..20], &0x0102u64.to_le_bytes());
        assert_eq!(&buf[20..], &[1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn clock_is_strictly_increasing() {
        let mut clock = FrameClock::start();
        let mut prev = clock.next_timestamp();
        for _ in 0..100 {
            let ts = clock.next_timestamp();
            assert!(ts > prev);
            prev = ts;
        }
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let err = DetectorProcess::spawn("air-painter-no-such-detector", &[], 0.7).err().unwrap();
        assert!(matches!(err, PainterError::Detector(_)));
    }
}
