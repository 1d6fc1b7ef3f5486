//! Handlers for the `/compliance` resource: current score, weekly averages,
//! week-over-week trend, history, and store/department aggregates.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use shelfsight_core::trend::{
    average_compliance, compliance_trend, daily_averages, previous_week_bounds, week_bounds,
    ComplianceTrend,
};
use shelfsight_core::types::{DbId, Timestamp};
use shelfsight_db::repositories::VerificationRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// How many recent verifications feed the "current compliance" figure.
const CURRENT_COMPLIANCE_WINDOW: i64 = 5;
/// How many recent verifications feed a store's compliance figure.
const STORE_COMPLIANCE_WINDOW: i64 = 20;
/// How many recent verifications feed a department's compliance figure.
const DEPARTMENT_COMPLIANCE_WINDOW: i64 = 50;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Optional subject override: supervisors may query any employee.
#[derive(Debug, Deserialize)]
pub struct SubjectQuery {
    pub employee_id: Option<DbId>,
}

/// Query parameters for `GET /compliance/weekly`.
#[derive(Debug, Deserialize)]
pub struct WeeklyQuery {
    pub employee_id: Option<DbId>,
    /// Any date inside the week of interest; defaults to today.
    pub date: Option<NaiveDate>,
}

/// Query parameters for `GET /compliance/history`.
#[derive(Debug, Deserialize)]
pub struct HistoryRangeQuery {
    pub employee_id: Option<DbId>,
    pub start: NaiveDate,
    /// Inclusive end date; defaults to today.
    pub end: Option<NaiveDate>,
}

/// A single average-compliance figure.
#[derive(Debug, Serialize)]
pub struct ComplianceValue {
    pub compliance: i32,
}

/// Weekly average with its window bounds.
#[derive(Debug, Serialize)]
pub struct WeeklyCompliance {
    pub week_start: Timestamp,
    pub week_end: Timestamp,
    pub compliance: i32,
}

/// One day of compliance history.
#[derive(Debug, Serialize)]
pub struct DailyCompliance {
    pub date: NaiveDate,
    pub compliance: i32,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/compliance/current
///
/// Average of the subject's five most recent verifications.
pub async fn current(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SubjectQuery>,
) -> AppResult<Json<ComplianceValue>> {
    let subject = resolve_subject(&user, query.employee_id);
    let scores =
        VerificationRepo::recent_scores_for_employee(&state.pool, subject, CURRENT_COMPLIANCE_WINDOW)
            .await?;
    Ok(Json(ComplianceValue {
        compliance: average_compliance(&scores),
    }))
}

/// GET /api/v1/compliance/weekly
///
/// Average over the Monday-to-Sunday week containing the given date.
pub async fn weekly(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<WeeklyQuery>,
) -> AppResult<Json<WeeklyCompliance>> {
    let subject = resolve_subject(&user, query.employee_id);
    let reference = query
        .date
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .unwrap_or_else(Utc::now);

    let (start, end) = week_bounds(reference);
    let scores = VerificationRepo::scores_in_window(&state.pool, subject, start, end).await?;

    Ok(Json(WeeklyCompliance {
        week_start: start,
        week_end: end,
        compliance: average_compliance(&scores),
    }))
}

/// GET /api/v1/compliance/trend
///
/// Relative week-over-week movement of the subject's weekly average.
pub async fn trend(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SubjectQuery>,
) -> AppResult<Json<ComplianceTrend>> {
    let subject = resolve_subject(&user, query.employee_id);
    let now = Utc::now();

    let (cur_start, cur_end) = week_bounds(now);
    let (prev_start, prev_end) = previous_week_bounds(now);

    let current_scores =
        VerificationRepo::scores_in_window(&state.pool, subject, cur_start, cur_end).await?;
    let previous_scores =
        VerificationRepo::scores_in_window(&state.pool, subject, prev_start, prev_end).await?;

    Ok(Json(compliance_trend(
        average_compliance(&current_scores),
        average_compliance(&previous_scores),
    )))
}

/// GET /api/v1/compliance/history
///
/// Per-day average compliance over a date range, oldest first.
pub async fn history(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<HistoryRangeQuery>,
) -> AppResult<Json<Vec<DailyCompliance>>> {
    let subject = resolve_subject(&user, query.employee_id);

    let start = query.start.and_time(NaiveTime::MIN).and_utc();
    let end_date = query.end.unwrap_or_else(|| Utc::now().date_naive());
    // Inclusive end date becomes an exclusive bound at the next midnight.
    let end = (end_date + chrono::Duration::days(1))
        .and_time(NaiveTime::MIN)
        .and_utc();

    let samples = VerificationRepo::samples_in_range(&state.pool, subject, start, end).await?;
    let by_day: Vec<(NaiveDate, i32)> = samples
        .iter()
        .map(|s| (s.created_at.date_naive(), s.compliance))
        .collect();

    let days = daily_averages(&by_day)
        .into_iter()
        .map(|(date, compliance)| DailyCompliance { date, compliance })
        .collect();
    Ok(Json(days))
}

/// GET /api/v1/compliance/stores/{id}
///
/// Average over the store's twenty most recent verifications.
pub async fn store(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(store_id): Path<DbId>,
) -> AppResult<Json<ComplianceValue>> {
    let scores =
        VerificationRepo::recent_scores_for_store(&state.pool, store_id, STORE_COMPLIANCE_WINDOW)
            .await?;
    Ok(Json(ComplianceValue {
        compliance: average_compliance(&scores),
    }))
}

/// GET /api/v1/compliance/departments/{department}
///
/// Average over the department's fifty most recent verifications.
pub async fn department(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(department): Path<String>,
) -> AppResult<Json<ComplianceValue>> {
    let scores = VerificationRepo::recent_scores_for_department(
        &state.pool,
        &department,
        DEPARTMENT_COMPLIANCE_WINDOW,
    )
    .await?;
    Ok(Json(ComplianceValue {
        compliance: average_compliance(&scores),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Supervisors may inspect any employee; employees always see themselves.
fn resolve_subject(user: &AuthUser, requested: Option<DbId>) -> DbId {
    if user.role == shelfsight_core::roles::ROLE_SUPERVISOR {
        requested.unwrap_or(user.profile_id)
    } else {
        user.profile_id
    }
}
