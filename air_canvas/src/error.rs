use thiserror::Error;

pub type Result<T> = std::result::Result<T, CanvasError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CanvasError {
    #[error("canvas must have a non-zero size, got {width}x{height}")]
    ZeroSized { width: u32, height: u32 },

    #[error("frame is {frame_width}x{frame_height} but the canvas is {canvas_width}x{canvas_height}")]
    DimensionMismatch {
        canvas_width:  u32,
        canvas_height: u32,
        frame_width:   u32,
        frame_height:  u32,
    },
}
