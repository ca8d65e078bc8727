//! Calendar event endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{Event, EventPayload, EventQuery, NewEvent},
    routes::deleted,
    state::AppState,
    validation::{optional_text, parse_date},
};

pub async fn list_events(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<EventQuery>,
) -> ApiResult<Json<Vec<Event>>> {
    let from = optional_text(query.from)
        .map(|raw| parse_date(&raw, "from"))
        .transpose()?;
    let to = optional_text(query.to)
        .map(|raw| parse_date(&raw, "to"))
        .transpose()?;

    let events = state
        .event_repository
        .list(&auth.account, from, to)
        .await?;

    Ok(Json(events))
}

pub async fn create_event(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<EventPayload>,
) -> ApiResult<impl IntoResponse> {
    let event = NewEvent::try_from(payload)?;
    let event = state.event_repository.create(&auth.account, &event).await?;

    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update_event(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<EventPayload>,
) -> ApiResult<Json<Event>> {
    let event = NewEvent::try_from(payload)?;
    let event = state
        .event_repository
        .update(id, &auth.account, &event)
        .await?
        .ok_or_else(ApiError::not_owned)?;

    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    if !state.event_repository.delete(id, &auth.account).await? {
        return Err(ApiError::not_owned());
    }

    Ok(deleted(id))
}
