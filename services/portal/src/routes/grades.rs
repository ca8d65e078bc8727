//! Grade endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{Grade, GradePayload, GradeQuery, GradeSummary, NewGrade},
    routes::deleted,
    state::AppState,
};

pub async fn list_grades(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<GradeQuery>,
) -> ApiResult<Json<Vec<Grade>>> {
    let grades = state.grade_repository.list(&auth.account, &query).await?;
    Ok(Json(grades))
}

/// Credit-weighted averages per term
pub async fn grade_summary(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<GradeSummary>> {
    let grades = state
        .grade_repository
        .list(&auth.account, &GradeQuery::default())
        .await?;

    Ok(Json(GradeSummary::from_grades(&grades)))
}

pub async fn create_grade(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<GradePayload>,
) -> ApiResult<impl IntoResponse> {
    let grade = NewGrade::try_from(payload)?;
    let grade = state.grade_repository.create(&auth.account, &grade).await?;

    Ok((StatusCode::CREATED, Json(grade)))
}

pub async fn update_grade(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<GradePayload>,
) -> ApiResult<Json<Grade>> {
    let grade = NewGrade::try_from(payload)?;
    let grade = state
        .grade_repository
        .update(id, &auth.account, &grade)
        .await?
        .ok_or_else(ApiError::not_owned)?;

    Ok(Json(grade))
}

pub async fn delete_grade(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    if !state.grade_repository.delete(id, &auth.account).await? {
        return Err(ApiError::not_owned());
    }

    Ok(deleted(id))
}
