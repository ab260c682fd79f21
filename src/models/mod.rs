//! Data models for the collaboration platform.
//!
//! Field names match the JSON documents accepted and returned by the API.

mod cv;
mod event;

pub use cv::*;
pub use event::*;
