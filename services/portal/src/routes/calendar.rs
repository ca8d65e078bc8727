//! Merged day-by-day calendar

use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::{
    error::ApiResult,
    middleware::AuthUser,
    models::{CalendarDay, CalendarQuery, calendar::build_calendar},
    state::AppState,
};

pub async fn get_calendar(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<CalendarQuery>,
) -> ApiResult<Json<Vec<CalendarDay>>> {
    let (from, to) = query.range()?;
    let semester = query.semester()?;

    let schedules = state
        .schedule_repository
        .list(&auth.account, Some(&semester))
        .await?;
    let events = state
        .event_repository
        .list(&auth.account, Some(from), Some(to))
        .await?;

    Ok(Json(build_calendar(from, to, &schedules, &events)))
}
