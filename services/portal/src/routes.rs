//! Portal service routes

use axum::{
    Json, Router,
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use tracing::error;

use crate::{
    middleware::{require_auth, trace_requests},
    state::AppState,
};

pub mod auth;
pub mod calendar;
pub mod events;
pub mod grades;
pub mod questions;
pub mod schedules;
pub mod subjects;
pub mod user;

/// Create the router for the portal service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/user", get(user::get_profile).put(user::update_profile))
        .route("/api/user/password", put(user::change_password))
        .route("/api/grades", get(grades::list_grades).post(grades::create_grade))
        .route("/api/grades/summary", get(grades::grade_summary))
        .route(
            "/api/grades/:id",
            put(grades::update_grade).delete(grades::delete_grade),
        )
        .route(
            "/api/schedules",
            get(schedules::list_schedules).post(schedules::create_schedule),
        )
        .route(
            "/api/schedules/:id",
            put(schedules::update_schedule).delete(schedules::delete_schedule),
        )
        .route("/api/events", get(events::list_events).post(events::create_event))
        .route(
            "/api/events/:id",
            put(events::update_event).delete(events::delete_event),
        )
        .route("/api/calendar", get(calendar::get_calendar))
        .route(
            "/api/subjects",
            get(subjects::list_subjects).post(subjects::create_subject),
        )
        .route(
            "/api/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route(
            "/api/questions/:id",
            get(questions::get_question).delete(questions::delete_question),
        )
        .route("/api/questions/:id/answers", post(questions::submit_answer))
        .route("/api/answers", get(questions::list_answers))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/signup", post(auth::signup))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .merge(protected_routes)
        .layer(middleware::from_fn(trace_requests))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match common::database::health_check(&state.db_pool).await {
        Ok(true) => "ok",
        Ok(false) => "unavailable",
        Err(e) => {
            error!("Database health check failed: {}", e);
            "unavailable"
        }
    };

    Json(json!({
        "status": "ok",
        "service": "portal",
        "database": database,
    }))
}

/// Body returned by delete endpoints
pub(crate) fn deleted(id: i64) -> Json<serde_json::Value> {
    Json(json!({
        "message": "Deleted",
        "id": id,
    }))
}
