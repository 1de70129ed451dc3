use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::RepositoryError;
use crate::domain::{Error, ErrorDetails, ErrorKind, Failure, Outcome};

const GENERIC_DETAIL: &str = "An unexpected error occurred.";

/// Maps an error kind to the HTTP status it is reported with.
///
/// # Panics
///
/// Panics for [`ErrorKind::None`]: successful outcomes have no error status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Failure => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::None => {
            panic!("invalid operation: a successful outcome has no error response")
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: u16,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub detail: String,
    /// Every failed check, for validation failures only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Error>,
}

impl ErrorResponse {
    pub fn from_failure(failure: &Failure) -> Self {
        let status = status_for(failure.kind());
        let title = status.canonical_reason().unwrap_or("Error").to_string();
        match failure.kind() {
            ErrorKind::Validation => Self {
                status: status.as_u16(),
                title,
                code: Some(failure.code().to_string()),
                detail: failure.description().to_string(),
                errors: failure.errors().to_vec(),
            },
            ErrorKind::NotFound | ErrorKind::Conflict => Self {
                status: status.as_u16(),
                title,
                code: Some(failure.code().to_string()),
                detail: failure.description().to_string(),
                errors: Vec::new(),
            },
            ErrorKind::Failure => Self::internal(),
            ErrorKind::None => unreachable!("status_for rejects the none kind"),
        }
    }

    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            title: "Internal Server Error".to_string(),
            code: None,
            detail: GENERIC_DETAIL.to_string(),
            errors: Vec::new(),
        }
    }
}

/// Builds the error response for a failed outcome.
///
/// # Panics
///
/// Panics if the outcome succeeded.
pub fn problem<T>(outcome: Outcome<T>) -> HttpResponse {
    assert!(
        outcome.is_failure(),
        "invalid operation: a successful outcome has no error response"
    );
    failure_response(outcome.error())
}

// Failures are logged where they are raised, with their cause.
fn failure_response(failure: &Failure) -> HttpResponse {
    let body = ErrorResponse::from_failure(failure);
    HttpResponse::build(status_for(failure.kind())).json(body)
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Failure(#[from] Failure),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Failure(Error::from(e).into())
    }
}

impl From<BlockingError> for AppError {
    fn from(e: BlockingError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Failure(failure) => status_for(failure.kind()),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Failure(failure) => failure_response(failure),
            AppError::Internal(msg) => {
                log::error!("request failed: {msg}");
                HttpResponse::InternalServerError().json(ErrorResponse::internal())
            }
        }
    }
}
