mod parse;
mod types;

pub use parse::extract_objects;
pub use types::{DetectedObject, object_names};
