mod camera;
mod session;

pub use camera::{Camera, VideoStream};
pub use session::CaptureLoop;
