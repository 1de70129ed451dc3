use utoipa::OpenApi;

use crate::domain::Error;
use crate::errors::ErrorResponse;
use crate::handlers::{mediated, quotes};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quote service",
        description = "Quote CRUD exposed both as direct endpoints and through a command/query mediator."
    ),
    paths(
        quotes::list_quotes,
        quotes::get_quote,
        quotes::create_quote,
        quotes::update_quote,
        quotes::delete_quote,
        mediated::list_quotes,
        mediated::get_quote,
        mediated::create_quote,
        mediated::update_quote,
        mediated::delete_quote,
    ),
    components(schemas(
        quotes::QuoteRequest,
        quotes::QuoteResponse,
        quotes::QuotePageResponse,
        quotes::CreatedResponse,
        ErrorResponse,
        Error,
    )),
    tags(
        (name = "quotes", description = "Direct data-access endpoints"),
        (name = "mediator", description = "Endpoints dispatched through the mediator"),
    )
)]
pub struct ApiDoc;
