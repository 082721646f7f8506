use crate::Result;
use async_trait::async_trait;
use image::RgbImage;

/// A capture device the host environment provides.
#[async_trait]
pub trait Camera: Send + Sync {
    /// Requests access to the device. A refused permission must be reported
    /// as [`crate::Error::CameraAccessDenied`].
    async fn open(&self) -> Result<Box<dyn VideoStream>>;
}

/// A live video feed from an opened camera.
pub trait VideoStream: Send {
    /// Natural size of the current video frame; `(0, 0)` until data flows.
    fn video_size(&self) -> (u32, u32);

    fn grab(&mut self) -> Result<RgbImage>;

    /// Stops every track of the stream.
    fn release(&mut self);
}
