use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quiz_core::entities::{CategoryRef, NewAnswer, QuestionWithAnswers};
use quiz_core::validate::parse_id;
use quiz_db::updates::question::QuestionUpdate;
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionFilter {
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewQuestion {
    question: String,
    category_id: i64,
    answers: Vec<NewAnswer>,
}

/// GET /questions
pub(crate) async fn list(
    State(state): State<AppState>,
    filter: Result<Query<QuestionFilter>, QueryRejection>,
) -> Result<Json<Vec<QuestionWithAnswers>>, ApiError> {
    let Query(filter) = filter?;
    let filter = filter.category.map(CategoryRef::Slug);
    Ok(Json(state.queries.list_questions(filter).await?))
}

/// GET /questions/category/{slug}
pub(crate) async fn for_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<QuestionWithAnswers>>, ApiError> {
    let questions = state
        .queries
        .list_questions(Some(CategoryRef::Slug(slug)))
        .await?;
    Ok(Json(questions))
}

/// GET /questions/{id}
pub(crate) async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QuestionWithAnswers>, ApiError> {
    let id = parse_id("id", &id)?;
    Ok(Json(state.queries.get_question(id).await?))
}

/// POST /question
pub(crate) async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewQuestion>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let created = state
        .service
        .create_question(&body.question, body.category_id, &body.answers)
        .await?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// PATCH /question/{id}
pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<QuestionUpdate>, JsonRejection>,
) -> Result<Json<QuestionWithAnswers>, ApiError> {
    let id = parse_id("id", &id)?;
    let Json(patch) = body?;
    let updated = state
        .service
        .update_question(id, patch)
        .await
        .map_err(ApiError::Update)?;
    Ok(Json(updated))
}

/// DELETE /question/{id}
pub(crate) async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id("id", &id)?;
    state.service.delete_question(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
