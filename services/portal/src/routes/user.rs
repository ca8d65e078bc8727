//! Profile endpoints for the signed-in user

use axum::{Extension, Json, extract::State, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{ChangePasswordRequest, UpdateUser, UpdateUserRequest, UserResponse},
    password::{hash_password, verify_password},
    routes::auth::start_session,
    state::AppState,
    validation::validate_password,
};

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_repository
        .find_by_account(&auth.account)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    Ok(Json(user.into()))
}

/// Update profile fields and re-issue the session so its claims stay current
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    jar: CookieJar,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let update = UpdateUser::try_from(payload)?;
    if update.is_empty() {
        return Err(ApiError::BadRequest(
            "no profile fields to update".to_string(),
        ));
    }

    let user = state
        .user_repository
        .update_profile(&auth.account, &update)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    let jar = start_session(&state, jar, &user)?;

    Ok((jar, Json(UserResponse::from(user))))
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<impl IntoResponse> {
    let current = payload
        .current_password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::missing_field("current_password"))?;
    let new_password = payload
        .new_password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::missing_field("new_password"))?;
    validate_password(&new_password).map_err(ApiError::BadRequest)?;

    let user = state
        .user_repository
        .find_by_account(&auth.account)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    if !verify_password(&user.password_hash, &current) {
        return Err(ApiError::BadRequest(
            "current password is incorrect".to_string(),
        ));
    }

    let password_hash = hash_password(&new_password).map_err(|e| {
        error!("Failed to hash password: {}", e);
        ApiError::InternalServerError
    })?;
    state
        .user_repository
        .update_password(&auth.account, &password_hash)
        .await?;

    Ok(Json(json!({ "message": "Password updated" })))
}
