//! Wire types for the shelf-analysis response and their mapping into
//! domain anomalies.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use shelfsight_core::classify::{AnomalyKind, AnomalyPoint};

use crate::client::VisionError;

/// `error_type` value the service uses for an empty slot; anything else is
/// treated as a misplaced product.
const ERROR_TYPE_EMPTY_SPOT: &str = "empty_spot";

/// Matches `"(tray, slot)"` coordinate strings, tolerating whitespace.
static COORDINATES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\(\s*(\d+)\s*,\s*(\d+)\s*\)\s*$").expect("valid regex"));

/// Top-level JSON body returned by `POST /analyze-shelf/`.
#[derive(Debug, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub analysis_result: Vec<DetectedAnomaly>,
}

/// One detected deviation as reported on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectedAnomaly {
    /// Grid cell formatted as `"(tray, slot)"`.
    pub coordinates: String,
    /// `"empty_spot"` or a service-specific misplacement label.
    pub error_type: String,
    /// Detected product code, when the service recognized the product.
    #[serde(default)]
    pub product_code: Option<String>,
}

/// Parse a `"(tray, slot)"` coordinate string into its two indices.
pub fn parse_coordinates(raw: &str) -> Result<(u32, u32), VisionError> {
    let caps = COORDINATES_RE.captures(raw).ok_or_else(|| {
        VisionError::MalformedResponse(format!("unparseable coordinates: {raw:?}"))
    })?;

    // Digits-only captures; failure here means the value overflows u32.
    let tray: u32 = caps[1].parse().map_err(|_| {
        VisionError::MalformedResponse(format!("tray index out of bounds in {raw:?}"))
    })?;
    let slot: u32 = caps[2].parse().map_err(|_| {
        VisionError::MalformedResponse(format!("slot index out of bounds in {raw:?}"))
    })?;

    Ok((tray, slot))
}

impl DetectedAnomaly {
    /// Convert the wire record into a domain [`AnomalyPoint`].
    pub fn into_anomaly(self) -> Result<AnomalyPoint, VisionError> {
        let (tray_index, slot_index) = parse_coordinates(&self.coordinates)?;

        let kind = if self.error_type == ERROR_TYPE_EMPTY_SPOT {
            AnomalyKind::EmptySlot
        } else {
            AnomalyKind::WrongProduct
        };

        Ok(AnomalyPoint {
            tray_index,
            slot_index,
            kind,
            product_code: self.product_code,
        })
    }
}

impl AnalysisResponse {
    /// Convert the full response into domain anomalies, failing on the first
    /// malformed record.
    pub fn into_anomalies(self) -> Result<Vec<AnomalyPoint>, VisionError> {
        self.analysis_result
            .into_iter()
            .map(DetectedAnomaly::into_anomaly)
            .collect()
    }
}
