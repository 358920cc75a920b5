//! Error types for the painter application.

use air_canvas::CanvasError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PainterError>;

#[derive(Debug, Error)]
pub enum PainterError {
    /// Window could not be created or updated.
    #[error("window error: {0}")]
    Window(String),

    /// No video source at startup.  Fatal.
    #[error("video source unavailable: {0}")]
    CaptureUnavailable(String),

    /// A single frame could not be read.  The loop skips it.
    #[error("frame capture failed: {0}")]
    Capture(String),

    #[error("hand detector error: {0}")]
    Detector(String),

    #[error("hand detector I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed detector output: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PainterError::CaptureUnavailable("camera 0 busy".to_string());
        assert_eq!(err.to_string(), "video source unavailable: camera 0 busy");

        let err: PainterError = CanvasError::ZeroSized { width: 0, height: 0 }.into();
        assert_eq!(err.to_string(), "canvas must have a non-zero size, got 0x0");
    }

    #[test]
    fn json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: PainterError = parse.into();
        assert!(err.to_string().starts_with("malformed detector output"));
    }
}
