//! Signup, login and logout

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::{LoginRequest, NewUser, SignupRequest, User, UserResponse},
    password::{hash_password, verify_password, verify_without_account},
    session::{removal_cookie, session_cookie},
    state::AppState,
    validation::required_text,
};

/// Issue a token for `user` and attach it to the jar as the session cookie
pub(crate) fn start_session(state: &AppState, jar: CookieJar, user: &User) -> ApiResult<CookieJar> {
    let token = state.token_service.issue(user).map_err(|e| {
        error!("Failed to issue token for {}: {}", user.account, e);
        ApiError::InternalServerError
    })?;

    Ok(jar.add(session_cookie(
        token,
        state.token_service.token_expiry(),
        state.secure_cookies,
    )))
}

/// Account registration endpoint
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_user = NewUser::try_from(payload)?;

    let password_hash = hash_password(&new_user.password).map_err(|e| {
        error!("Failed to hash password: {}", e);
        ApiError::InternalServerError
    })?;

    let user = state
        .user_repository
        .create(&new_user, &password_hash)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                ApiError::Conflict("account already exists".to_string())
            } else {
                ApiError::Database(e)
            }
        })?;

    let jar = start_session(&state, jar, &user)?;
    info!("Registered account {}", user.account);

    Ok((StatusCode::CREATED, jar, Json(UserResponse::from(user))))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let account = required_text(payload.account, "account")?;
    let password = payload
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::missing_field("password"))?;

    if !state.login_limiter.is_allowed(&account).await {
        return Err(ApiError::TooManyRequests);
    }

    let Some(user) = state.user_repository.find_by_account(&account).await? else {
        verify_without_account(&password);
        warn!("Login attempt for unknown account {}", account);
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(&user.password_hash, &password) {
        warn!("Wrong password for account {}", account);
        return Err(ApiError::InvalidCredentials);
    }

    state.login_limiter.reset(&account).await;
    let jar = start_session(&state, jar, &user)?;
    info!("Account {} logged in", account);

    Ok((jar, Json(UserResponse::from(user))))
}

/// Logout endpoint; drops the session cookie
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(removal_cookie(state.secure_cookies)),
        Json(json!({ "message": "Logged out" })),
    )
}
