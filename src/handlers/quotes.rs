//! Endpoints that talk to the quote store directly.

use actix_web::http::header::LOCATION;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{QuoteRepository, RepositoryError};
use crate::domain::quote::{check_page, quote_checks, NewQuote, Quote, QuoteErrors, QuotePage};
use crate::domain::{validate_all, Failure, Outcome};
use crate::errors::{AppError, ErrorResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuoteRequest {
    #[schema(example = "Socrates")]
    pub author: String,
    #[schema(example = "I drank what?")]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    pub id: i32,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Quote> for QuoteResponse {
    fn from(q: Quote) -> Self {
        Self {
            id: q.id,
            author: q.author,
            content: q.content,
            created_at: q.created_at,
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuotesParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuotePageResponse {
    pub items: Vec<QuoteResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl QuotePageResponse {
    pub fn new(result: QuotePage, page: i64, limit: i64) -> Self {
        Self {
            items: result.items.into_iter().map(QuoteResponse::from).collect(),
            total: result.total,
            page,
            limit,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /quotes
///
/// Returns a page of quotes, newest first.
#[utoipa::path(
    get,
    path = "/quotes",
    params(ListQuotesParams),
    responses(
        (status = 200, description = "Page of quotes", body = QuotePageResponse),
        (status = 400, description = "Invalid paging", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "quotes"
)]
pub async fn list_quotes(
    repo: web::Data<dyn QuoteRepository>,
    query: web::Query<ListQuotesParams>,
) -> Result<HttpResponse, AppError> {
    let ListQuotesParams { page, limit } = query.into_inner();
    check_page(page, limit).into_result()?;

    let repo = repo.into_inner();
    let result = web::block(move || repo.list(page, limit)).await??;

    Ok(HttpResponse::Ok().json(QuotePageResponse::new(result, page, limit)))
}

/// GET /quotes/{id}
#[utoipa::path(
    get,
    path = "/quotes/{id}",
    params(("id" = i32, Path, description = "Quote id")),
    responses(
        (status = 200, description = "Quote found", body = QuoteResponse),
        (status = 404, description = "Quote not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "quotes"
)]
pub async fn get_quote(
    repo: web::Data<dyn QuoteRepository>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let repo = repo.into_inner();
    let quote = web::block(move || repo.find_by_id(id))
        .await??
        .ok_or_else(|| Failure::from(QuoteErrors::not_found(id)))?;

    Ok(HttpResponse::Ok().json(QuoteResponse::from(quote)))
}

/// POST /quotes
///
/// Both fields are checked before anything is stored; every failed check is
/// reported.
#[utoipa::path(
    post,
    path = "/quotes",
    request_body = QuoteRequest,
    responses(
        (status = 201, description = "Quote created", body = CreatedResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Duplicate quote", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "quotes"
)]
pub async fn create_quote(
    repo: web::Data<dyn QuoteRepository>,
    body: web::Json<QuoteRequest>,
) -> Result<HttpResponse, AppError> {
    let QuoteRequest { author, content } = body.into_inner();
    validate_all(&quote_checks(&author, &content)).into_result()?;

    let repo = repo.into_inner();
    let quote = web::block(move || -> Result<Outcome<Quote>, RepositoryError> {
        if repo.find_duplicate(&author, &content, None)?.is_some() {
            return Ok(Outcome::failure(QuoteErrors::duplicate()));
        }
        Ok(Outcome::success(repo.add(NewQuote { author, content })?))
    })
    .await??
    .into_result()?;

    log::info!("created quote {}", quote.id);
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, format!("/quotes/{}", quote.id)))
        .json(CreatedResponse { id: quote.id }))
}

/// PUT /quotes/{id}
#[utoipa::path(
    put,
    path = "/quotes/{id}",
    params(("id" = i32, Path, description = "Quote id")),
    request_body = QuoteRequest,
    responses(
        (status = 204, description = "Quote updated"),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Quote not found", body = ErrorResponse),
        (status = 409, description = "Duplicate quote", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "quotes"
)]
pub async fn update_quote(
    repo: web::Data<dyn QuoteRepository>,
    path: web::Path<i32>,
    body: web::Json<QuoteRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let QuoteRequest { author, content } = body.into_inner();
    validate_all(&quote_checks(&author, &content)).into_result()?;

    let repo = repo.into_inner();
    web::block(move || -> Result<Outcome<()>, RepositoryError> {
        let Some(existing) = repo.find_by_id(id)? else {
            return Ok(Outcome::failure(QuoteErrors::not_found(id)));
        };
        if repo.find_duplicate(&author, &content, Some(id))?.is_some() {
            return Ok(Outcome::failure(QuoteErrors::duplicate()));
        }
        let saved = repo.save(Quote {
            author,
            content,
            ..existing
        })?;
        Ok(match saved {
            Some(_) => Outcome::success(()),
            None => Outcome::failure(QuoteErrors::not_found(id)),
        })
    })
    .await??
    .into_result()?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /quotes/{id}
#[utoipa::path(
    delete,
    path = "/quotes/{id}",
    params(("id" = i32, Path, description = "Quote id")),
    responses(
        (status = 204, description = "Quote deleted"),
        (status = 404, description = "Quote not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "quotes"
)]
pub async fn delete_quote(
    repo: web::Data<dyn QuoteRepository>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let repo = repo.into_inner();
    if !web::block(move || repo.remove(id)).await?? {
        return Err(Failure::from(QuoteErrors::not_found(id)).into());
    }

    Ok(HttpResponse::NoContent().finish())
}
