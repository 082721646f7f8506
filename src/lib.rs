pub mod capture;
pub mod client;
pub mod config;
pub mod detection;
pub mod error;
pub mod frame;
pub mod llm;
pub mod server;
pub mod service;

pub use error::{Error, Result};
