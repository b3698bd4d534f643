//! Mapping of store and request errors onto HTTP responses.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quiz_core::errors::CoreError;
use quiz_db::error::{DatabaseError, ErrorKind};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Failure of a partial update. A unique-key conflict here is reported
    /// as a bad request rather than 409.
    #[error(transparent)]
    Update(DatabaseError),

    #[error(transparent)]
    Body(#[from] JsonRejection),

    #[error(transparent)]
    Query(#[from] QueryRejection),
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        Self::Database(e.into())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Database(e) => status_for(e.kind()),
            Self::Update(e) => match e.kind() {
                ErrorKind::Conflict => StatusCode::BAD_REQUEST,
                kind => status_for(kind),
            },
            Self::Body(_) | Self::Query(_) => StatusCode::BAD_REQUEST,
        }
    }
}

const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::Dependency => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

const fn code_for(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "validation",
        ErrorKind::NotFound => "not_found",
        ErrorKind::Conflict => "conflict",
        ErrorKind::Dependency => "dependency",
        ErrorKind::Store => "internal",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Database(e) | Self::Update(e) => {
                let kind = e.kind();
                if kind == ErrorKind::Store {
                    tracing::error!(error = %e, "store failure");
                    ErrorBody {
                        error: code_for(kind),
                        message: "Internal Server Error".to_string(),
                        field: None,
                    }
                } else {
                    ErrorBody {
                        error: code_for(kind),
                        message: e.to_string(),
                        field: e.field(),
                    }
                }
            }
            Self::Body(rejection) => ErrorBody {
                error: "invalid_body",
                message: rejection.body_text(),
                field: None,
            },
            Self::Query(rejection) => ErrorBody {
                error: "invalid_query",
                message: rejection.body_text(),
                field: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
