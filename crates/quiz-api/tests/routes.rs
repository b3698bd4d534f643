//! End-to-end route behavior against an in-memory store.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use pretty_assertions::assert_eq;
use quiz_api::{AppState, router};
use quiz_db::service::QuizService;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let service = QuizService::new_local(":memory:").await.unwrap();
    router(AppState::new(service))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_science(app: &Router) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/category",
        Some(json!({ "title": "Science" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn create_question(app: &Router, category_id: i64, text: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/question",
        Some(json!({
            "question": text,
            "categoryId": category_id,
            "answers": [
                { "answer": "4", "correct": true },
                { "answer": "5", "correct": false }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn category_lifecycle() {
    let app = app().await;
    let id = create_science(&app).await;

    let (status, body) = send(&app, Method::GET, "/categories/science", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["title"], json!("Science"));
    assert_eq!(body["questions"], json!([]));

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/category/science",
        Some(json!({ "description": "Facts" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], json!("Facts"));
    assert_eq!(body["slug"], json!("science"));

    let (status, _) = send(&app, Method::DELETE, "/category/science", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, "/categories/science", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("not_found"));
}

#[tokio::test]
async fn list_categories_in_creation_order() {
    let app = app().await;
    for title in ["Zoology", "Art History"] {
        send(&app, Method::POST, "/category", Some(json!({ "title": title }))).await;
    }

    let (status, body) = send(&app, Method::GET, "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["zoology", "art-history"]);
}

#[tokio::test]
async fn duplicate_slug_conflicts_on_create_and_is_bad_request_on_patch() {
    let app = app().await;
    create_science(&app).await;
    send(
        &app,
        Method::POST,
        "/category",
        Some(json!({ "title": "Math", "slug": "math" })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/category",
        Some(json!({ "title": "Science" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["field"], json!("slug"));

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/category/math",
        Some(json!({ "slug": "science" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_category_bodies_are_bad_requests() {
    let app = app().await;

    let (status, body) = send(&app, Method::POST, "/category", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("invalid_body"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/category",
        Some(json!({ "title": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("validation"));
}

#[tokio::test]
async fn patch_missing_category_is_not_found() {
    let app = app().await;
    let (status, _) = send(
        &app,
        Method::PATCH,
        "/category/ghost",
        Some(json!({ "title": "Boo" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/category/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn question_lifecycle() {
    let app = app().await;
    let category_id = create_science(&app).await;
    let created = create_question(&app, category_id, "2+2?").await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["categoryId"], json!(category_id));
    assert_eq!(created["answers"].as_array().unwrap().len(), 2);

    let (status, body) = send(&app, Method::GET, &format!("/questions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/question/{id}"),
        Some(json!({ "question": "What is 2+2?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"], json!("What is 2+2?"));
    assert_eq!(body["answers"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, Method::DELETE, &format!("/question/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/questions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn question_for_missing_category_is_bad_request() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/question",
        Some(json!({ "question": "Orphan?", "categoryId": 99, "answers": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("dependency"));
    assert_eq!(body["field"], json!("categoryId"));

    let (_, body) = send(&app, Method::GET, "/questions", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn question_without_answers_list_is_bad_request() {
    let app = app().await;
    let category_id = create_science(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/question",
        Some(json!({ "question": "q?", "categoryId": category_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("invalid_body"));

    let (_, body) = send(&app, Method::GET, "/questions", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn moving_question_to_missing_category_is_bad_request() {
    let app = app().await;
    let category_id = create_science(&app).await;
    let id = create_question(&app, category_id, "2+2?").await["id"]
        .as_i64()
        .unwrap();

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/question/{id}"),
        Some(json!({ "categoryId": 404 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, &format!("/questions/{id}"), None).await;
    assert_eq!(body["categoryId"], json!(category_id));
}

#[tokio::test]
async fn non_numeric_ids_are_bad_requests() {
    let app = app().await;
    for (method, uri) in [
        (Method::GET, "/questions/abc"),
        (Method::DELETE, "/question/abc"),
        (Method::PATCH, "/question/1x"),
    ] {
        let body = (method == Method::PATCH).then(|| json!({ "question": "x?" }));
        let (status, body) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["field"], json!("id"));
    }
}

#[tokio::test]
async fn questions_filter_by_category() {
    let app = app().await;
    let science = create_science(&app).await;
    let (_, art) = send(&app, Method::POST, "/category", Some(json!({ "title": "Art" }))).await;
    create_question(&app, science, "2+2?").await;
    create_question(&app, art["id"].as_i64().unwrap(), "Who painted it?").await;

    let (_, all) = send(&app, Method::GET, "/questions", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, filtered) = send(&app, Method::GET, "/questions?category=science", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered.as_array().unwrap().len(), 1);
    assert_eq!(filtered[0]["question"], json!("2+2?"));

    let (status, by_path) = send(&app, Method::GET, "/questions/category/art", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_path[0]["question"], json!("Who painted it?"));

    let (status, _) = send(&app, Method::GET, "/questions?category=nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, "/questions/category/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_category_removes_its_questions() {
    let app = app().await;
    let id = create_science(&app).await;
    create_question(&app, id, "2+2?").await;
    create_question(&app, id, "3+3?").await;

    send(&app, Method::DELETE, "/category/science", None).await;

    let (_, body) = send(&app, Method::GET, "/questions", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn index_ping_and_unknown_routes() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["endpoints"].as_array().unwrap().is_empty());

    let (status, body) = send(&app, Method::GET, "/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));

    let (status, _) = send(&app, Method::GET, "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
