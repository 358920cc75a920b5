//! air_painter — interactive entry point.

use air_painter::{logging, run, DetectorChoice, PainterConfig};
use anyhow::Context;
use tracing::error;

fn main() -> anyhow::Result<()> {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║            Air Painter — draw with your fingertip            ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    logging::init();
    let cfg = PainterConfig::from_env();

    match &cfg.detector {
        DetectorChoice::Simulated => {
            println!("  Hands: keyboard simulation (mouse = fingertip, 0–5 = poses)");
        }
        DetectorChoice::Process { program, .. } => println!("  Hands: detector `{program}`"),
    }
    #[cfg(feature = "camera")]
    println!("  Video: webcam (AIR_PAINTER_CAMERA=none for a synthetic backdrop)");
    #[cfg(not(feature = "camera"))]
    println!("  Video: synthetic backdrop  (use --features camera for a webcam)");
    println!("  Press Q or Escape to quit.");
    println!();

    run(cfg)
        .inspect_err(|e| error!(error = %e, "air painter stopped"))
        .context("air painter failed")
}
