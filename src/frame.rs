//! Still frames and their data-URI encoding.

use crate::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{RgbImage, codecs::jpeg::JpegEncoder};

pub const JPEG_MIME: &str = "image/jpeg";

/// A single encoded still image, e.g. `data:image/jpeg;base64,...` on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    mime_type: String,
    data: Vec<u8>,
}

impl Frame {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Encodes `image` as JPEG. `quality` is a factor in (0, 1].
    pub fn encode_jpeg(image: &RgbImage, quality: f32) -> Result<Self> {
        let mut data = Vec::new();
        JpegEncoder::new_with_quality(&mut data, jpeg_quality(quality)).encode_image(image)?;

        Ok(Self::new(JPEG_MIME, data))
    }

    pub fn parse_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| Error::frame("missing data: prefix"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| Error::frame("missing ',' separator"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| Error::frame("only base64 data URIs are supported"))?;
        if mime_type.is_empty() {
            return Err(Error::frame("missing MIME type"));
        }

        let data = STANDARD
            .decode(payload)
            .map_err(|e| Error::frame(format!("invalid base64 payload: {e}")))?;

        Ok(Self::new(mime_type, data))
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn jpeg_quality(factor: f32) -> u8 {
    (factor * 100.0).round().clamp(1.0, 100.0) as u8
}
