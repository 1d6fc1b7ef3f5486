//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod compliance;
pub mod dashboard;
pub mod planograms;
pub mod reports;
pub mod shelves;
pub mod stores;
pub mod tasks;
pub mod verifications;
