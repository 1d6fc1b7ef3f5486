//! Compliance scoring over classified display points.
//!
//! Missing products (errors) and misplaced products (warnings) subtract
//! weighted penalties from a perfect score of 100. The default 15/5 split
//! encodes that a missing product costs three times a misplaced one; the
//! ratio is business policy and stays tunable per deployment.

use serde::Serialize;

use crate::classify::{DisplayPoint, Severity};

/// Default penalty per missing-product point.
pub const DEFAULT_ERROR_WEIGHT: u32 = 15;
/// Default penalty per misplaced-product point.
pub const DEFAULT_WARNING_WEIGHT: u32 = 5;

/// Tunable penalty weights for the compliance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub error_weight: u32,
    pub warning_weight: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            error_weight: DEFAULT_ERROR_WEIGHT,
            warning_weight: DEFAULT_WARNING_WEIGHT,
        }
    }
}

/// Overall status tier of a verification.
///
/// Any error dominates; warnings only surface when no error exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Success,
    Warning,
    Error,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Success => "success",
            VerificationStatus::Warning => "warning",
            VerificationStatus::Error => "error",
        }
    }
}

/// Result of scoring one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    /// Compliance percentage in `[0, 100]`.
    pub compliance: u8,
    pub status: VerificationStatus,
    pub error_count: u32,
    pub warning_count: u32,
}

/// Score a set of classified display points.
///
/// A lone synthetic success point scores a clean 100; otherwise each error
/// and warning subtracts its weight, flooring at 0.
pub fn score_points(points: &[DisplayPoint], policy: &ScoringPolicy) -> ScoreBreakdown {
    let error_count = points
        .iter()
        .filter(|p| p.severity == Severity::Error)
        .count() as u32;
    let warning_count = points
        .iter()
        .filter(|p| p.severity == Severity::Warning)
        .count() as u32;

    let penalty = error_count * policy.error_weight + warning_count * policy.warning_weight;
    let compliance = 100u32.saturating_sub(penalty) as u8;

    let status = if error_count > 0 {
        VerificationStatus::Error
    } else if warning_count > 0 {
        VerificationStatus::Warning
    } else {
        VerificationStatus::Success
    };

    ScoreBreakdown {
        compliance,
        status,
        error_count,
        warning_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify_anomalies, AnomalyKind, AnomalyPoint};
    use crate::layout::{ShelfLayout, TrayGroup};

    fn classified(anomalies: &[AnomalyPoint]) -> Vec<DisplayPoint> {
        classify_anomalies(
            anomalies,
            &ShelfLayout::default(),
            &TrayGroup::new(1).unwrap(),
        )
        .unwrap()
    }

    fn anomaly(kind: AnomalyKind, tray: u32, slot: u32, code: Option<&str>) -> AnomalyPoint {
        AnomalyPoint {
            tray_index: tray,
            slot_index: slot,
            kind,
            product_code: code.map(str::to_string),
        }
    }

    #[test]
    fn clean_shelf_scores_100_success() {
        let points = classified(&[]);
        let s = score_points(&points, &ScoringPolicy::default());
        assert_eq!(s.compliance, 100);
        assert_eq!(s.status, VerificationStatus::Success);
        assert_eq!(s.error_count, 0);
        assert_eq!(s.warning_count, 0);
    }

    #[test]
    fn mixed_anomalies_scenario() {
        // One empty slot and one misplaced product: 100 - (15 + 5) = 80, error wins.
        let points = classified(&[
            anomaly(AnomalyKind::EmptySlot, 1, 5, None),
            anomaly(AnomalyKind::WrongProduct, 1, 10, Some("ABC")),
        ]);
        assert_eq!(points.len(), 2);

        let s = score_points(&points, &ScoringPolicy::default());
        assert_eq!(s.error_count, 1);
        assert_eq!(s.warning_count, 1);
        assert_eq!(s.compliance, 80);
        assert_eq!(s.status, VerificationStatus::Error);
    }

    #[test]
    fn error_dominates_any_warning_count() {
        let points = classified(&[
            anomaly(AnomalyKind::WrongProduct, 1, 1, None),
            anomaly(AnomalyKind::WrongProduct, 1, 2, None),
            anomaly(AnomalyKind::EmptySlot, 2, 3, None),
        ]);
        let s = score_points(&points, &ScoringPolicy::default());
        assert_eq!(s.status, VerificationStatus::Error);
    }

    #[test]
    fn warnings_only_is_warning_status() {
        let points = classified(&[anomaly(AnomalyKind::WrongProduct, 1, 1, Some("X"))]);
        let s = score_points(&points, &ScoringPolicy::default());
        assert_eq!(s.status, VerificationStatus::Warning);
        assert_eq!(s.compliance, 95);
    }

    #[test]
    fn score_floors_at_zero() {
        // Seven empty slots: 7 * 15 = 105 penalty, floored to 0.
        let anomalies: Vec<AnomalyPoint> = (1..=7)
            .map(|slot| anomaly(AnomalyKind::EmptySlot, 1, slot, None))
            .collect();
        let s = score_points(&classified(&anomalies), &ScoringPolicy::default());
        assert_eq!(s.compliance, 0);
        assert_eq!(s.status, VerificationStatus::Error);
    }

    #[test]
    fn compliance_stays_in_range() {
        for errors in 0u32..10 {
            let anomalies: Vec<AnomalyPoint> = (1..=errors)
                .map(|slot| anomaly(AnomalyKind::EmptySlot, 1, slot, None))
                .collect();
            let s = score_points(&classified(&anomalies), &ScoringPolicy::default());
            assert!(s.compliance <= 100);
        }
    }

    #[test]
    fn only_synthetic_success_scores_100() {
        // A single warning must not round up to a perfect score.
        let points = classified(&[anomaly(AnomalyKind::WrongProduct, 1, 1, None)]);
        let s = score_points(&points, &ScoringPolicy::default());
        assert_ne!(s.compliance, 100);
    }

    #[test]
    fn custom_weights_are_applied() {
        let policy = ScoringPolicy {
            error_weight: 30,
            warning_weight: 10,
        };
        let points = classified(&[
            anomaly(AnomalyKind::EmptySlot, 1, 1, None),
            anomaly(AnomalyKind::WrongProduct, 1, 2, None),
        ]);
        let s = score_points(&points, &policy);
        assert_eq!(s.compliance, 60);
    }
}
