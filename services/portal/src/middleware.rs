//! Session validation and request tracing middleware

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{Instrument, info, warn};
use uuid::Uuid;

use crate::{error::ApiError, session::token_from_request, state::AppState};

/// Header echoing the id assigned to each request
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Authenticated user information, taken from the token claims
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub account: String,
    pub gender: String,
    pub email: String,
}

/// Reject requests without a valid session token
///
/// On success the caller's identity is placed in the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = token_from_request(&jar, req.headers()).ok_or(ApiError::Unauthorized)?;

    let claims = state.token_service.verify(&token).map_err(|e| {
        warn!("Rejected session token: {}", e);
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(AuthUser {
        account: claims.account,
        gender: claims.gender,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

/// Wrap each request in a span carrying a fresh request id
pub async fn trace_requests(req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %req.method(),
        route = %req.uri().path(),
    );

    let mut response = async move {
        let response = next.run(req).await;
        info!(status = response.status().as_u16(), "request completed");
        response
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
