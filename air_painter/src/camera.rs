//! Webcam frames via `nokhwa` (feature = "camera").

use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

use crate::error::{PainterError, Result};
use crate::frames::FrameSource;

pub struct CameraFrames {
    index:  u32,
    camera: Camera,
}

impl CameraFrames {
    /// Open camera `index` and start streaming.
    pub fn open(index: u32) -> Result<Self> {
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| PainterError::CaptureUnavailable(format!("camera {index}: {e}")))?;
        camera
            .open_stream()
            .map_err(|e| PainterError::CaptureUnavailable(format!("camera {index}: {e}")))?;
        Ok(CameraFrames { index, camera })
    }
}

impl FrameSource for CameraFrames {
    fn describe(&self) -> String {
        let res = self.camera.resolution();
        format!("camera {} ({}x{})", self.index, res.width(), res.height())
    }

    fn read(&mut self) -> Result<RgbImage> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| PainterError::Capture(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| PainterError::Capture(e.to_string()))?;
        let (w, h) = (decoded.width(), decoded.height());
        // nokhwa may link a different `image` release; go through raw bytes.
        RgbImage::from_raw(w, h, decoded.into_raw())
            .ok_or_else(|| PainterError::Capture(format!("camera returned a short {w}x{h} buffer")))
    }
}

impl Drop for CameraFrames {
    fn drop(&mut self) {
        let _ = self.camera.stop_stream();
    }
}
