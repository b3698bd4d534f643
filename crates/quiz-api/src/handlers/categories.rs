use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quiz_core::entities::{Category, CategoryWithQuestions};
use quiz_core::slug::slug_or_derive;
use quiz_db::updates::category::CategoryUpdate;
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub(crate) struct NewCategory {
    title: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// GET /categories
pub(crate) async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.queries.list_categories().await?))
}

/// GET /categories/{slug}
pub(crate) async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryWithQuestions>, ApiError> {
    Ok(Json(state.queries.get_category_by_slug(&slug).await?))
}

/// POST /category. The slug is derived from the title when omitted.
pub(crate) async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let slug = slug_or_derive(body.slug.as_deref(), &body.title);
    let category = state
        .service
        .create_category(&slug, &body.title, body.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(category)).into_response())
}

/// PATCH /category/{slug}
pub(crate) async fn update(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    body: Result<Json<CategoryUpdate>, JsonRejection>,
) -> Result<Json<Category>, ApiError> {
    let Json(patch) = body?;
    let category = state
        .service
        .update_category(slug, patch)
        .await
        .map_err(ApiError::Update)?;
    Ok(Json(category))
}

/// DELETE /category/{slug}
pub(crate) async fn remove(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_category(slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
