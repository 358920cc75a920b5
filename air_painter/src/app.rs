//! Top-level application loop.
//!
//! [`App`] owns the drawing [`Session`] and the [`GestureStateMachine`].
//! [`run`] opens a frame source, a hand detector and the window, then
//! [`run_loop`] drives one strictly sequential iteration per video frame:
//!
//! ```text
//! read frame → mirror → detect → state machine → annotate live frame
//!            → composite canvas → display
//! ```

use std::sync::mpsc::{self, Sender};

use air_canvas::{annotate_live_frame, composite_onto, FrameReport, GestureStateMachine, GestureTable, Session};
use hand_pose::FrameObservation;
use image::RgbImage;
use tracing::{info, warn};

use crate::config::{DetectorChoice, PainterConfig};
use crate::detector::{DetectorProcess, FrameClock, HandDetector};
use crate::error::Result;
use crate::frames::{mirror, open_frame_source, probe_frame_size, FrameSource};
use crate::sim::{SimInput, SimulatedHands};
use crate::visualizer::{FrameSink, Visualizer};

// ════════════════════════════════════════════════════════════════════════════
// App
// ════════════════════════════════════════════════════════════════════════════

pub struct App {
    session: Session,
    machine: GestureStateMachine,
}

impl App {
    pub fn new(cfg: &PainterConfig, width: u32, height: u32) -> Result<Self> {
        let session = Session::with_state(width, height, cfg.initial_state())?;
        let machine = GestureStateMachine::new(GestureTable::default(), cfg.scaler);
        Ok(App { session, machine })
    }

    pub fn session(&self) -> &Session { &self.session }

    /// Run one frame through the state machine and build the image to show.
    ///
    /// Annotations go on the live frame before the canvas is laid over it.
    /// A frame whose size does not match the canvas is shown without the
    /// canvas; the session is kept.
    pub fn process_frame(&mut self, mut frame: RgbImage, observation: &FrameObservation) -> (RgbImage, FrameReport) {
        let report = self.machine.process(&mut self.session, observation);
        annotate_live_frame(&mut frame, &report);
        if let Err(e) = composite_onto(self.session.canvas(), &mut frame) {
            warn!(error = %e, "showing live frame without the canvas");
        }
        (frame, report)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the painter until the window closes or `Q` / `Escape` is pressed.
///
/// Startup failures (no video source, detector will not start, no window)
/// are returned; everything after that is handled in [`run_loop`].
pub fn run(cfg: PainterConfig) -> Result<()> {
    // ── Video source ──────────────────────────────────────────────────────
    let mut source = open_frame_source(&cfg)?;
    let (width, height) = probe_frame_size(source.as_mut())?;
    info!(width, height, "frame size");

    // ── Hand detector (simulation gets the window's input channel) ───────
    let (sim_tx, mut detector) = open_detector(&cfg)?;
    info!(detector = %detector.describe(), "hand detector");

    // ── Window and drawing session ────────────────────────────────────────
    let mut vis = Visualizer::new(&cfg.window_title, width, height, sim_tx)?;
    let mut app = App::new(&cfg, width, height)?;

    let shown = run_loop(&mut app, source.as_mut(), detector.as_mut(), &mut vis, cfg.mirror);
    info!(frames = shown, painted = app.session().canvas().painted_pixels(), "closing");
    Ok(())
}

/// Iterate until `sink` reports quit.  Returns how many frames were shown.
///
/// Capture, detector and display failures only cost the current frame:
/// they are logged and the loop carries on.
pub fn run_loop(
    app:      &mut App,
    source:   &mut dyn FrameSource,
    detector: &mut dyn HandDetector,
    sink:     &mut dyn FrameSink,
    mirrored: bool,
) -> u64 {
    let mut clock = FrameClock::start();
    let mut shown = 0u64;

    // 1. Input; quit is checked once per iteration
    while sink.poll_input() {
        // 2. Frame
        let mut frame = match source.read() {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "skipping frame");
                sink.pump();
                continue;
            }
        };
        if mirrored {
            mirror(&mut frame);
        }

        // 3. Hands
        let observation = detector
            .detect(&frame, Some(clock.next_timestamp()))
            .unwrap_or_else(|e| {
                warn!(error = %e, "detector failed; treating frame as empty");
                FrameObservation::empty()
            });

        // 4. Gesture, canvas, composite
        let (composited, report) = app.process_frame(frame, &observation);

        // 5. Display
        match sink.render(&composited, &report) {
            Ok(()) => shown += 1,
            Err(e) => warn!(error = %e, "display update failed; dropping frame"),
        }
    }
    shown
}

type DetectorSetup = (Option<Sender<SimInput>>, Box<dyn HandDetector>);

fn open_detector(cfg: &PainterConfig) -> Result<DetectorSetup> {
    match &cfg.detector {
        DetectorChoice::Simulated => {
            let (tx, rx) = mpsc::channel();
            Ok((Some(tx), Box::new(SimulatedHands::new(rx))))
        }
        DetectorChoice::Process { program, args } => {
            let process = DetectorProcess::spawn(program, args, cfg.min_confidence)?;
            Ok((None, Box::new(process)))
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
