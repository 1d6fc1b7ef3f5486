//! Discrepancy classification: detected anomalies become overlay points.
//!
//! Each anomaly from the vision service is positioned on the image and
//! labeled with a severity and explanatory text. An empty anomaly list is
//! not an absence of output: it produces a single affirmative point in the
//! image center. That is deliberate product behavior (the overlay always
//! has something to click), not a gap-filling default.

use serde::Serialize;

use crate::error::CoreError;
use crate::layout::{map_point, ShelfLayout, TrayGroup};

/// Kind of deviation reported by the vision service for one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    /// The planogram requires a product here but the slot is empty.
    EmptySlot,
    /// A product is present but does not belong at this position.
    WrongProduct,
}

/// One flagged grid position from the vision service. Transient -- mapped
/// into a [`DisplayPoint`] before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnomalyPoint {
    /// 1-based tray index within the shelf.
    pub tray_index: u32,
    /// 1-based slot index within the tray.
    pub slot_index: u32,
    pub kind: AnomalyKind,
    /// Detected product code, present only for [`AnomalyKind::WrongProduct`].
    pub product_code: Option<String>,
}

/// Severity tier of an overlay point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Success,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Success => "success",
        }
    }
}

/// An anomaly enriched with render position and severity, ready for the
/// on-image overlay and for persistence alongside its verification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayPoint {
    /// Run-local sequence number, starting at 1.
    pub id: u32,
    /// Horizontal position within the image, `(0, 100]`.
    pub x_percent: f64,
    /// Vertical position within the image; one of the three tray band
    /// centers, or 50.0 for the synthetic success point.
    pub y_percent: f64,
    pub severity: Severity,
    /// Short label shown in the overlay tooltip.
    pub message: String,
    /// Long-form explanation shown in the detail dialog.
    pub details: String,
}

/// Center coordinates of the synthetic success point.
pub const SUCCESS_POINT_CENTER: (f64, f64) = (50.0, 50.0);

/// Fixed short label for an empty slot.
pub const MSG_MISSING_PRODUCT: &str = "Missing product";
/// Fixed short label for a misplaced product.
pub const MSG_MISPLACED_PRODUCT: &str = "Misplaced product";
/// Fixed affirmative label for a fully compliant shelf.
pub const MSG_SHELF_COMPLIANT: &str = "Shelf matches planogram";

/// Token used in detail text when the vision service omits a product code.
const UNKNOWN_PRODUCT: &str = "unknown";

/// Classify one anomaly into a display point at the given sequence id.
fn classify_one(
    id: u32,
    anomaly: &AnomalyPoint,
    layout: &ShelfLayout,
    group: &TrayGroup,
) -> Result<DisplayPoint, CoreError> {
    let (x_percent, y_percent) = map_point(layout, group, anomaly.tray_index, anomaly.slot_index)?;

    let (severity, message, details) = match anomaly.kind {
        AnomalyKind::EmptySlot => (
            Severity::Error,
            MSG_MISSING_PRODUCT.to_string(),
            format!(
                "Tray {}, slot {}: the planogram requires a product here but the slot is empty.",
                anomaly.tray_index, anomaly.slot_index
            ),
        ),
        AnomalyKind::WrongProduct => {
            let code = anomaly.product_code.as_deref().unwrap_or(UNKNOWN_PRODUCT);
            (
                Severity::Warning,
                MSG_MISPLACED_PRODUCT.to_string(),
                format!(
                    "Tray {}, slot {}: found product {code}, which does not belong at this position.",
                    anomaly.tray_index, anomaly.slot_index
                ),
            )
        }
    };

    Ok(DisplayPoint {
        id,
        x_percent,
        y_percent,
        severity,
        message,
        details,
    })
}

/// Classify a full analysis run.
///
/// Empty input yields exactly one success point at the image center; any
/// out-of-range grid cell fails the whole run (a mispositioned overlay would
/// misdirect the employee on the shop floor).
pub fn classify_anomalies(
    anomalies: &[AnomalyPoint],
    layout: &ShelfLayout,
    group: &TrayGroup,
) -> Result<Vec<DisplayPoint>, CoreError> {
    if anomalies.is_empty() {
        let (x, y) = SUCCESS_POINT_CENTER;
        return Ok(vec![DisplayPoint {
            id: 1,
            x_percent: x,
            y_percent: y,
            severity: Severity::Success,
            message: MSG_SHELF_COMPLIANT.to_string(),
            details: "Every checked position matches the reference planogram.".to_string(),
        }]);
    }

    anomalies
        .iter()
        .enumerate()
        .map(|(i, anomaly)| classify_one(i as u32 + 1, anomaly, layout, group))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ShelfLayout {
        ShelfLayout::default()
    }

    fn group() -> TrayGroup {
        TrayGroup::new(1).unwrap()
    }

    fn empty_slot(tray: u32, slot: u32) -> AnomalyPoint {
        AnomalyPoint {
            tray_index: tray,
            slot_index: slot,
            kind: AnomalyKind::EmptySlot,
            product_code: None,
        }
    }

    fn wrong_product(tray: u32, slot: u32, code: Option<&str>) -> AnomalyPoint {
        AnomalyPoint {
            tray_index: tray,
            slot_index: slot,
            kind: AnomalyKind::WrongProduct,
            product_code: code.map(str::to_string),
        }
    }

    // -- empty input ----------------------------------------------------------

    #[test]
    fn empty_input_synthesizes_single_success_point() {
        let points = classify_anomalies(&[], &layout(), &group()).unwrap();
        assert_eq!(points.len(), 1);
        let p = &points[0];
        assert_eq!(p.severity, Severity::Success);
        assert!((p.x_percent - 50.0).abs() < f64::EPSILON);
        assert!((p.y_percent - 50.0).abs() < f64::EPSILON);
        assert_eq!(p.message, MSG_SHELF_COMPLIANT);
        assert_eq!(p.id, 1);
    }

    // -- severity mapping -----------------------------------------------------

    #[test]
    fn empty_slot_is_error() {
        let points = classify_anomalies(&[empty_slot(1, 5)], &layout(), &group()).unwrap();
        assert_eq!(points[0].severity, Severity::Error);
        assert_eq!(points[0].message, MSG_MISSING_PRODUCT);
        assert!(points[0].details.contains("Tray 1, slot 5"));
    }

    #[test]
    fn wrong_product_is_warning_with_code() {
        let points =
            classify_anomalies(&[wrong_product(2, 10, Some("ABC"))], &layout(), &group()).unwrap();
        assert_eq!(points[0].severity, Severity::Warning);
        assert_eq!(points[0].message, MSG_MISPLACED_PRODUCT);
        assert!(points[0].details.contains("product ABC"));
    }

    #[test]
    fn missing_product_code_falls_back_to_unknown() {
        let points =
            classify_anomalies(&[wrong_product(2, 10, None)], &layout(), &group()).unwrap();
        assert!(points[0].details.contains("product unknown"));
    }

    // -- positioning ----------------------------------------------------------

    #[test]
    fn points_carry_band_and_slot_position() {
        let points = classify_anomalies(&[empty_slot(3, 23)], &layout(), &group()).unwrap();
        assert!((points[0].y_percent - 83.0).abs() < f64::EPSILON);
        assert!((points[0].x_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let points = classify_anomalies(
            &[empty_slot(1, 1), empty_slot(2, 2), empty_slot(3, 3)],
            &layout(),
            &group(),
        )
        .unwrap();
        let ids: Vec<u32> = points.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    // -- failure path ---------------------------------------------------------

    #[test]
    fn out_of_range_tray_fails_the_run() {
        let result = classify_anomalies(&[empty_slot(4, 1)], &layout(), &group());
        assert!(matches!(result, Err(CoreError::OutOfRange(_))));
    }

    #[test]
    fn out_of_range_slot_fails_the_run() {
        let result = classify_anomalies(&[empty_slot(1, 0)], &layout(), &group());
        assert!(matches!(result, Err(CoreError::OutOfRange(_))));
    }

    #[test]
    fn success_never_coexists_with_problems() {
        let points = classify_anomalies(
            &[empty_slot(1, 1), wrong_product(2, 2, Some("X"))],
            &layout(),
            &group(),
        )
        .unwrap();
        assert!(points.iter().all(|p| p.severity != Severity::Success));
    }
}
