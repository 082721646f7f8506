#![allow(dead_code)]

use async_trait::async_trait;
use image::{Rgb, RgbImage};
use omnivision_rust::{
    Error, Result,
    capture::{Camera, VideoStream},
    client::VisionService,
    detection::DetectedObject,
    frame::Frame,
    llm::{ChatCompletionRequest, ChatCompletionResponse, Choice, LlmClient, ResponseMessage},
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A gateway response whose first choice carries `content`.
pub fn content_response(content: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        choices: vec![Choice {
            message: ResponseMessage {
                content: Some(content.to_string()),
            },
        }],
    }
}

/// Mock LLM client for testing
#[derive(Debug)]
pub struct MockLlmClient {
    pub responses: Arc<Mutex<Vec<ChatCompletionResponse>>>,
    pub requests: Arc<Mutex<Vec<(String, ChatCompletionRequest)>>>,
    pub upstream_status: Option<u16>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            upstream_status: None,
        }
    }

    pub fn with_responses(self, responses: Vec<ChatCompletionResponse>) -> Self {
        *self.responses.lock().unwrap() = responses;
        self
    }

    pub fn with_content(self, content: &str) -> Self {
        self.with_responses(vec![content_response(content)])
    }

    pub fn with_upstream_status(mut self, status: u16) -> Self {
        self.upstream_status = Some(status);
        self
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    pub fn api_keys(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        api_key: &str,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((api_key.to_string(), request));

        if let Some(status) = self.upstream_status {
            return Err(Error::Upstream { status });
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::llm("No more mock responses available"));
        }

        Ok(responses.remove(0))
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera whose streams report a fixed size and count their releases.
#[derive(Debug, Clone)]
pub struct FakeCamera {
    pub size: (u32, u32),
    pub denied: bool,
    pub opened: Arc<AtomicUsize>,
    pub released: Arc<AtomicUsize>,
    pub grabs: Arc<AtomicUsize>,
}

impl FakeCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            denied: false,
            opened: Arc::new(AtomicUsize::new(0)),
            released: Arc::new(AtomicUsize::new(0)),
            grabs: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn denied() -> Self {
        Self {
            denied: true,
            ..Self::new(640, 480)
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn grabs(&self) -> usize {
        self.grabs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Camera for FakeCamera {
    async fn open(&self) -> Result<Box<dyn VideoStream>> {
        if self.denied {
            return Err(Error::CameraAccessDenied(
                "Please allow camera access to use this feature.".to_string(),
            ));
        }

        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeStream {
            size: self.size,
            released: self.released.clone(),
            grabs: self.grabs.clone(),
        }))
    }
}

pub struct FakeStream {
    size: (u32, u32),
    released: Arc<AtomicUsize>,
    grabs: Arc<AtomicUsize>,
}

impl VideoStream for FakeStream {
    fn video_size(&self) -> (u32, u32) {
        self.size
    }

    fn grab(&mut self) -> Result<RgbImage> {
        self.grabs.fetch_add(1, Ordering::SeqCst);
        let (width, height) = self.size;
        Ok(RgbImage::from_pixel(width, height, Rgb([30, 120, 200])))
    }

    fn release(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory stand-in for the analysis and chat endpoints.
#[derive(Default)]
pub struct FakeVisionService {
    pub analyses: Mutex<VecDeque<std::result::Result<Vec<DetectedObject>, String>>>,
    pub analysis_delay: Option<Duration>,
    pub frames: Mutex<Vec<Frame>>,
    pub chat_reply: Option<std::result::Result<String, String>>,
    pub chats: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeVisionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analyses(
        self,
        analyses: Vec<std::result::Result<Vec<DetectedObject>, String>>,
    ) -> Self {
        *self.analyses.lock().unwrap() = analyses.into();
        self
    }

    pub fn with_analysis_delay(mut self, delay: Duration) -> Self {
        self.analysis_delay = Some(delay);
        self
    }

    pub fn with_chat_reply(mut self, reply: std::result::Result<String, String>) -> Self {
        self.chat_reply = Some(reply);
        self
    }

    pub fn analysis_calls(&self) -> usize {
        self.frames.lock().unwrap().len()
    }
}

#[async_trait]
impl VisionService for FakeVisionService {
    async fn analyze_frame(&self, frame: &Frame) -> Result<Vec<DetectedObject>> {
        self.frames.lock().unwrap().push(frame.clone());

        if let Some(delay) = self.analysis_delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.analyses.lock().unwrap().pop_front();
        match next {
            Some(Ok(objects)) => Ok(objects),
            Some(Err(message)) => Err(Error::service(message)),
            None => Ok(Vec::new()),
        }
    }

    async fn chat(&self, message: &str, detected_objects: &[String]) -> Result<String> {
        self.chats
            .lock()
            .unwrap()
            .push((message.to_string(), detected_objects.to_vec()));

        match &self.chat_reply {
            Some(Ok(reply)) => Ok(reply.clone()),
            Some(Err(message)) => Err(Error::service(message.clone())),
            None => Err(Error::service("No chat reply configured")),
        }
    }
}
