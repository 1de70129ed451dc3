//! The same quote operations, sent as commands and queries through the
//! [`Mediator`]. Each handler branches on the outcome with `match_with`.

use actix_web::http::header::LOCATION;
use actix_web::{web, HttpResponse};

use crate::application::quotes::{
    CreateQuoteCommand, DeleteQuoteCommand, GetQuoteQuery, ListQuotesQuery, UpdateQuoteCommand,
};
use crate::application::Mediator;
use crate::errors::{problem, AppError, ErrorResponse};

use super::quotes::{
    CreatedResponse, ListQuotesParams, QuotePageResponse, QuoteRequest, QuoteResponse,
};

#[utoipa::path(
    get,
    path = "/mediator/quotes",
    operation_id = "mediator_list_quotes",
    params(ListQuotesParams),
    responses(
        (status = 200, description = "Page of quotes", body = QuotePageResponse),
        (status = 400, description = "Invalid paging", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "mediator"
)]
pub async fn list_quotes(
    mediator: web::Data<Mediator>,
    query: web::Query<ListQuotesParams>,
) -> Result<HttpResponse, AppError> {
    let ListQuotesParams { page, limit } = query.into_inner();

    let outcome = web::block(move || mediator.send(ListQuotesQuery { page, limit })).await?;

    Ok(outcome.match_with(
        |result| HttpResponse::Ok().json(QuotePageResponse::new(result, page, limit)),
        problem,
    ))
}

#[utoipa::path(
    get,
    path = "/mediator/quotes/{id}",
    operation_id = "mediator_get_quote",
    params(("id" = i32, Path, description = "Quote id")),
    responses(
        (status = 200, description = "Quote found", body = QuoteResponse),
        (status = 404, description = "Quote not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "mediator"
)]
pub async fn get_quote(
    mediator: web::Data<Mediator>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let outcome = web::block(move || mediator.send(GetQuoteQuery { id })).await?;

    Ok(outcome.match_with(
        |quote| HttpResponse::Ok().json(QuoteResponse::from(quote)),
        problem,
    ))
}

#[utoipa::path(
    post,
    path = "/mediator/quotes",
    operation_id = "mediator_create_quote",
    request_body = QuoteRequest,
    responses(
        (status = 201, description = "Quote created", body = CreatedResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Duplicate quote", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "mediator"
)]
pub async fn create_quote(
    mediator: web::Data<Mediator>,
    body: web::Json<QuoteRequest>,
) -> Result<HttpResponse, AppError> {
    let QuoteRequest { author, content } = body.into_inner();
    let command = CreateQuoteCommand { author, content };

    let outcome = web::block(move || mediator.send(command)).await?;

    Ok(outcome.match_with(
        |id| {
            HttpResponse::Created()
                .insert_header((LOCATION, format!("/mediator/quotes/{id}")))
                .json(CreatedResponse { id })
        },
        problem,
    ))
}

#[utoipa::path(
    put,
    path = "/mediator/quotes/{id}",
    operation_id = "mediator_update_quote",
    params(("id" = i32, Path, description = "Quote id")),
    request_body = QuoteRequest,
    responses(
        (status = 204, description = "Quote updated"),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Quote not found", body = ErrorResponse),
        (status = 409, description = "Duplicate quote", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "mediator"
)]
pub async fn update_quote(
    mediator: web::Data<Mediator>,
    path: web::Path<i32>,
    body: web::Json<QuoteRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let QuoteRequest { author, content } = body.into_inner();
    let command = UpdateQuoteCommand {
        id,
        author,
        content,
    };

    let outcome = web::block(move || mediator.send(command)).await?;

    Ok(outcome.match_with(|()| HttpResponse::NoContent().finish(), problem))
}

#[utoipa::path(
    delete,
    path = "/mediator/quotes/{id}",
    operation_id = "mediator_delete_quote",
    params(("id" = i32, Path, description = "Quote id")),
    responses(
        (status = 204, description = "Quote deleted"),
        (status = 404, description = "Quote not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "mediator"
)]
pub async fn delete_quote(
    mediator: web::Data<Mediator>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let outcome = web::block(move || mediator.send(DeleteQuoteCommand { id })).await?;

    Ok(outcome.match_with(|()| HttpResponse::NoContent().finish(), problem))
}
