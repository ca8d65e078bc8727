//! Question bank endpoints

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
    models::{
        Answer, AnswerPayload, AnswerResult, NewQuestion, QuestionDetail, QuestionPayload,
        QuestionQuery, QuestionSummary,
    },
    routes::deleted,
    state::AppState,
};

fn question_not_found() -> ApiError {
    ApiError::NotFound("question not found".to_string())
}

pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<QuestionQuery>,
) -> ApiResult<Json<Vec<QuestionSummary>>> {
    let questions = state.question_repository.list(query.subject_id).await?;
    Ok(Json(questions))
}

pub async fn create_question(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<QuestionPayload>,
) -> ApiResult<impl IntoResponse> {
    let question = NewQuestion::try_from(payload)?;

    if let Some(subject_id) = question.subject_id {
        if !state.subject_repository.exists(subject_id).await? {
            return Err(ApiError::BadRequest(format!(
                "subject {} does not exist",
                subject_id
            )));
        }
    }

    let question = state
        .question_repository
        .create(&auth.account, &question)
        .await?;

    Ok((StatusCode::CREATED, Json(question)))
}

pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<QuestionDetail>> {
    let question = state
        .question_repository
        .find(id)
        .await?
        .ok_or_else(question_not_found)?;

    Ok(Json(question))
}

/// Only the author may delete a question
pub async fn delete_question(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    if !state.question_repository.delete(id, &auth.account).await? {
        return Err(ApiError::not_owned());
    }

    Ok(deleted(id))
}

/// Record an answer and reveal the correct options
pub async fn submit_answer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<AnswerPayload>,
) -> ApiResult<impl IntoResponse> {
    let option_id = payload
        .option_id
        .ok_or_else(|| ApiError::missing_field("option_id"))?;

    let question = state
        .question_repository
        .find(id)
        .await?
        .ok_or_else(question_not_found)?;

    let is_correct = question
        .option(option_id)
        .map(|option| option.is_correct)
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "option {} does not belong to question {}",
                option_id, id
            ))
        })?;

    let answer = state
        .question_repository
        .record_answer(id, &auth.account, option_id, is_correct)
        .await?;
    info!(
        "Answer {} on question {} by {}: correct={}",
        answer.id, id, auth.account, is_correct
    );

    let result = AnswerResult {
        answer_id: answer.id,
        question_id: id,
        option_id,
        is_correct,
        correct_option_ids: question.correct_option_ids(),
        explanation: question.explanation,
    };

    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn list_answers(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Answer>>> {
    let answers = state.question_repository.answers_for(&auth.account).await?;
    Ok(Json(answers))
}
