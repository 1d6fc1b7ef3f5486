//! Verification Recorder: persists a scored analysis run as one logical unit.
//!
//! The run is written as two inserts -- the verification row, then its
//! overlay points. If the point insert fails after the parent was written,
//! the recorder deletes the orphaned parent before reporting failure. The
//! compensating delete is best-effort: when it too fails, the orphan is
//! logged and the caller still receives the original failure. A caller can
//! never observe a partial success.
//!
//! There is deliberately no idempotency key: re-submitting an identical run
//! creates a second, distinct record.

use shelfsight_core::types::DbId;
use sqlx::PgPool;

use crate::models::verification::{
    AnalysisPoint, CreateAnalysisPoint, CreateVerification, Verification,
};
use crate::repositories::VerificationRepo;

/// A fully persisted analysis run.
#[derive(Debug, Clone)]
pub struct VerificationRecord {
    pub verification: Verification,
    pub points: Vec<AnalysisPoint>,
}

/// Failure modes of [`record`].
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    /// The verification row itself could not be written.
    #[error("failed to insert verification: {0}")]
    Verification(#[source] sqlx::Error),

    /// The points failed to write; the parent row was removed.
    #[error("failed to insert analysis points: {0}")]
    Points(#[source] sqlx::Error),

    /// The points failed to write AND the compensating delete failed, so an
    /// orphaned verification row remains. Carries the original point-insert
    /// failure; the delete failure is logged at the site.
    #[error("failed to insert analysis points (orphaned verification {verification_id}): {source}")]
    Orphaned {
        verification_id: DbId,
        #[source]
        source: sqlx::Error,
    },
}

/// Persist a verification and its overlay points as one logical unit.
pub async fn record(
    pool: &PgPool,
    draft: &CreateVerification,
    points: &[CreateAnalysisPoint],
) -> Result<VerificationRecord, RecorderError> {
    let verification = VerificationRepo::create(pool, draft)
        .await
        .map_err(RecorderError::Verification)?;

    match VerificationRepo::insert_points(pool, verification.id, points).await {
        Ok(inserted) => Ok(VerificationRecord {
            verification,
            points: inserted,
        }),
        Err(points_err) => {
            tracing::error!(
                verification_id = verification.id,
                error = %points_err,
                "Analysis point insert failed, removing parent verification",
            );

            match VerificationRepo::delete(pool, verification.id).await {
                Ok(_) => Err(RecorderError::Points(points_err)),
                Err(delete_err) => {
                    tracing::error!(
                        verification_id = verification.id,
                        error = %delete_err,
                        "Compensating delete failed, verification row is orphaned",
                    );
                    Err(RecorderError::Orphaned {
                        verification_id: verification.id,
                        source: points_err,
                    })
                }
            }
        }
    }
}
