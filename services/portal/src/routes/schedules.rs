//! Weekly schedule endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{NewSchedule, ScheduleEntry, SchedulePayload, ScheduleQuery},
    routes::deleted,
    state::AppState,
    validation::optional_text,
};

pub async fn list_schedules(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ScheduleQuery>,
) -> ApiResult<Json<Vec<ScheduleEntry>>> {
    let semester = optional_text(query.semester);
    let entries = state
        .schedule_repository
        .list(&auth.account, semester.as_deref())
        .await?;

    Ok(Json(entries))
}

pub async fn create_schedule(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<SchedulePayload>,
) -> ApiResult<impl IntoResponse> {
    let entry = NewSchedule::try_from(payload)?;
    let entry = state
        .schedule_repository
        .create(&auth.account, &entry)
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_schedule(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<SchedulePayload>,
) -> ApiResult<Json<ScheduleEntry>> {
    let entry = NewSchedule::try_from(payload)?;
    let entry = state
        .schedule_repository
        .update(id, &auth.account, &entry)
        .await?
        .ok_or_else(ApiError::not_owned)?;

    Ok(Json(entry))
}

pub async fn delete_schedule(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    if !state.schedule_repository.delete(id, &auth.account).await? {
        info!("Schedule {} not deleted for {}", id, auth.account);
        return Err(ApiError::not_owned());
    }

    Ok(deleted(id))
}
