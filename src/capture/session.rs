use super::camera::{Camera, VideoStream};
use crate::{
    Result, client::VisionService, config::CaptureConfig, detection::DetectedObject, frame::Frame,
};
use image::RgbImage;
use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::{debug, info, warn};

type StreamSlot = Arc<Mutex<Option<Box<dyn VideoStream>>>>;

/// Owns the camera and the periodic analysis task.
///
/// One analysis is outstanding at most: a tick that comes due while a
/// request is in flight is skipped. Each stop bumps the session generation,
/// and results tagged with an older generation are discarded.
pub struct CaptureLoop {
    config: CaptureConfig,
    camera: Arc<dyn Camera>,
    service: Arc<dyn VisionService>,
    state: Arc<Mutex<LoopState>>,
    session: Option<CaptureSession>,
}

#[derive(Debug, Default)]
struct LoopState {
    generation: u64,
    active: bool,
    analyzing: bool,
    objects: Vec<DetectedObject>,
}

struct CaptureSession {
    stream: StreamSlot,
    task: JoinHandle<()>,
}

impl CaptureLoop {
    pub fn new(
        config: CaptureConfig,
        camera: Arc<dyn Camera>,
        service: Arc<dyn VisionService>,
    ) -> Self {
        Self {
            config,
            camera,
            service,
            state: Arc::new(Mutex::new(LoopState::default())),
            session: None,
        }
    }

    /// Opens the camera and starts sampling. A running session is stopped
    /// first.
    pub async fn start(&mut self) -> Result<()> {
        self.stop();

        let stream = match self.camera.open().await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Failed to start camera: {}", e);
                return Err(e);
            }
        };

        let generation = {
            let mut state = lock(&self.state);
            state.active = true;
            state.generation
        };

        let stream: StreamSlot = Arc::new(Mutex::new(Some(stream)));
        let task = tokio::spawn(run_session(
            generation,
            Duration::from_millis(self.config.interval_ms),
            self.config.jpeg_quality,
            stream.clone(),
            self.state.clone(),
            self.service.clone(),
        ));

        self.session = Some(CaptureSession { stream, task });
        info!(
            "Camera started, analyzing every {}ms",
            self.config.interval_ms
        );

        Ok(())
    }

    /// Cancels sampling, releases the device and clears the detections.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            session.task.abort();
            if let Some(mut stream) = lock(&session.stream).take() {
                stream.release();
            }
            info!("Camera stopped");
        }

        let mut state = lock(&self.state);
        state.generation += 1;
        state.active = false;
        state.analyzing = false;
        state.objects.clear();
    }

    pub fn is_active(&self) -> bool {
        lock(&self.state).active
    }

    pub fn is_analyzing(&self) -> bool {
        lock(&self.state).analyzing
    }

    pub fn detected_objects(&self) -> Vec<DetectedObject> {
        lock(&self.state).objects.clone()
    }
}

impl Drop for CaptureLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_session(
    generation: u64,
    period: Duration,
    quality: f32,
    stream: StreamSlot,
    state: Arc<Mutex<LoopState>>,
    service: Arc<dyn VisionService>,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        analyze_once(generation, quality, &stream, &state, service.as_ref()).await;
    }
}

async fn analyze_once(
    generation: u64,
    quality: f32,
    stream: &StreamSlot,
    state: &Mutex<LoopState>,
    service: &dyn VisionService,
) {
    let image = match snapshot(stream) {
        Ok(Some(image)) => image,
        Ok(None) => {
            debug!("Video not ready, skipping tick");
            return;
        }
        Err(e) => {
            warn!("Failed to capture frame: {}", e);
            return;
        }
    };

    let frame = match Frame::encode_jpeg(&image, quality) {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Failed to encode frame: {}", e);
            return;
        }
    };

    {
        let mut state = lock(state);
        if state.generation != generation {
            return;
        }
        state.analyzing = true;
    }

    let result = service.analyze_frame(&frame).await;

    let mut state = lock(state);
    if state.generation != generation {
        debug!("Discarding analysis result from a stopped session");
        return;
    }
    state.analyzing = false;

    match result {
        Ok(objects) => {
            debug!("Analysis returned {} objects", objects.len());
            state.objects = objects;
        }
        Err(e) => warn!("Analysis error: {}", e),
    }
}

/// Grabs the current picture. `None` while the stream has no picture yet
/// or has been released. Only the grab runs under the stream lock.
fn snapshot(stream: &StreamSlot) -> Result<Option<RgbImage>> {
    let mut slot = lock(stream);
    let Some(stream) = slot.as_mut() else {
        return Ok(None);
    };

    let (width, height) = stream.video_size();
    if width == 0 || height == 0 {
        return Ok(None);
    }

    stream.grab().map(Some)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
