use serde::{Deserialize, Serialize};

/// One object the model reported in a frame. Records carry no identity
/// across frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub name: String,
    /// Model-reported confidence, expected in `[0, 1]`.
    pub confidence: f64,
}

impl DetectedObject {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// Names of the given objects, in order, as sent to the chat service.
pub fn object_names(objects: &[DetectedObject]) -> Vec<String> {
    objects.iter().map(|object| object.name.clone()).collect()
}
