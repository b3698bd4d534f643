//! # quiz-api
//!
//! HTTP surface over the quiz store.
//!
//! ```text
//! GET    /                           service index
//! GET    /ping                       liveness
//! GET    /categories
//! GET    /categories/{slug}          category with questions and answers
//! POST   /category
//! PATCH  /category/{slug}
//! DELETE /category/{slug}
//! GET    /questions[?category=slug]
//! GET    /questions/category/{slug}
//! GET    /questions/{id}
//! POST   /question
//! PATCH  /question/{id}
//! DELETE /question/{id}
//! ```

pub mod error;
mod handlers;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, patch, post};
use quiz_db::query::QueryFacade;
use quiz_db::service::QuizService;
use tokio::net::TcpListener;

pub use error::ApiError;

/// Router state shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    service: Arc<QuizService>,
    queries: QueryFacade,
}

impl AppState {
    #[must_use]
    pub fn new(service: QuizService) -> Self {
        Self::from_shared(Arc::new(service))
    }

    #[must_use]
    pub fn from_shared(service: Arc<QuizService>) -> Self {
        let queries = service.queries();
        Self { service, queries }
    }

    #[must_use]
    pub fn service(&self) -> &QuizService {
        &self.service
    }
}

#[rustfmt::skip]
pub fn router(state: AppState) -> Router {
    use handlers::{categories, meta, questions};

    Router::new()
        .route("/",                          get(meta::index))
        .route("/ping",                      get(meta::ping))
        .route("/categories",                get(categories::list))
        .route("/categories/{slug}",         get(categories::show))
        .route("/category",                  post(categories::create))
        .route("/category/{slug}",           patch(categories::update).delete(categories::remove))
        .route("/questions",                 get(questions::list))
        .route("/questions/category/{slug}", get(questions::for_category))
        .route("/questions/{id}",            get(questions::show))
        .route("/question",                  post(questions::create))
        .route("/question/{id}",             patch(questions::update).delete(questions::remove))
        .fallback(meta::not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;
    tracing::debug!(%method, %path, status = response.status().as_u16(), "request");
    response
}

/// Serve the API on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "quiz api listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!(%addr, "quiz api shut down");
    Ok(())
}
