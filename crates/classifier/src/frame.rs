//! Camera frames and the source that captures them.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// One encoded camera frame (JPEG).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    jpeg: Vec<u8>,
}

impl Frame {
    pub fn from_jpeg(jpeg: impl Into<Vec<u8>>) -> Self {
        Self { jpeg: jpeg.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.jpeg
    }

    pub fn len(&self) -> usize {
        self.jpeg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jpeg.is_empty()
    }

    /// `data:image/jpeg;base64,...` form expected by the classifier service.
    pub fn data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", BASE64.encode(&self.jpeg))
    }
}

/// Provider for camera frames.
///
/// Implementations own the device; capture must be cheap and non-blocking.
pub trait FrameSource: Send + Sync {
    /// Grab the current frame. `None` while the camera is not ready, in which
    /// case the tick produces no sample.
    fn capture(&self) -> Option<Frame>;
}

/// Source with no camera attached.
pub struct NullFrameSource;

impl FrameSource for NullFrameSource {
    fn capture(&self) -> Option<Frame> {
        None
    }
}

/// Source that returns the same frame on every capture.
pub struct StaticFrameSource {
    frame: Frame,
}

impl StaticFrameSource {
    pub fn new(frame: Frame) -> Self {
        Self { frame }
    }
}

impl FrameSource for StaticFrameSource {
    fn capture(&self) -> Option<Frame> {
        Some(self.frame.clone())
    }
}
