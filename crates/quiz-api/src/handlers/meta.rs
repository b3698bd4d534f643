use axum::Json;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("GET", "/categories", "List all categories"),
    ("GET", "/categories/{slug}", "Category with its questions and answers"),
    ("POST", "/category", "Create a category"),
    ("PATCH", "/category/{slug}", "Update a category"),
    ("DELETE", "/category/{slug}", "Delete a category and everything in it"),
    ("GET", "/questions", "List questions, optionally ?category=<slug>"),
    ("GET", "/questions/category/{slug}", "Questions of one category"),
    ("GET", "/questions/{id}", "One question with its answers"),
    ("POST", "/question", "Create a question with its answers"),
    ("PATCH", "/question/{id}", "Update a question"),
    ("DELETE", "/question/{id}", "Delete a question and its answers"),
    ("GET", "/ping", "Liveness check"),
];

/// GET /
pub(crate) async fn index() -> Json<Value> {
    let endpoints: Vec<Value> = ENDPOINTS
        .iter()
        .map(|(method, path, description)| {
            json!({ "method": method, "path": path, "description": description })
        })
        .collect();
    Json(json!({
        "name": "Quiz API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": endpoints,
    }))
}

/// GET /ping
pub(crate) async fn ping() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub(crate) async fn not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not_found", "message": format!("No route for {}", uri.path()) })),
    )
        .into_response()
}
