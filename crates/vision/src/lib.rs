//! Client for the external shelf-analysis service.
//!
//! The service receives a shelf photo and answers with a list of detected
//! planogram deviations as grid-cell coordinates. This crate owns the wire
//! format ([`response`]), the HTTP transport ([`client`]), and the bounded
//! retry policy around the call ([`retry`]).

pub mod client;
pub mod response;
pub mod retry;

pub use client::{VisionClient, VisionError};
pub use response::{AnalysisResponse, DetectedAnomaly};
pub use retry::RetryPolicy;
