//! Domain logic for the shelf-compliance platform.
//!
//! Pure computation only -- no I/O. The pipeline for one analysis run is:
//! detected anomalies are positioned on the image ([`layout`]), labeled
//! ([`classify`]), and aggregated into a compliance score ([`score`]).
//! [`trend`] holds the week-over-week aggregation math used by dashboards.

pub mod classify;
pub mod error;
pub mod layout;
pub mod roles;
pub mod score;
pub mod trend;
pub mod types;
