//! Subject endpoints

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    error::{ApiError, ApiResult},
    models::{NewSubject, Subject, SubjectPayload},
    state::AppState,
};

pub async fn list_subjects(State(state): State<AppState>) -> ApiResult<Json<Vec<Subject>>> {
    Ok(Json(state.subject_repository.list().await?))
}

pub async fn create_subject(
    State(state): State<AppState>,
    Json(payload): Json<SubjectPayload>,
) -> ApiResult<impl IntoResponse> {
    let subject = NewSubject::try_from(payload)?;
    let subject = state
        .subject_repository
        .create(&subject)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                ApiError::Conflict(format!("subject {} already exists", subject.code))
            } else {
                ApiError::Database(e)
            }
        })?;

    Ok((StatusCode::CREATED, Json(subject)))
}
