pub mod mediated;
pub mod quotes;

use actix_web::web;

/// Registers both sets of quote endpoints.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/quotes")
            .route("", web::get().to(quotes::list_quotes))
            .route("", web::post().to(quotes::create_quote))
            .route("/{id}", web::get().to(quotes::get_quote))
            .route("/{id}", web::put().to(quotes::update_quote))
            .route("/{id}", web::delete().to(quotes::delete_quote)),
    )
    .service(
        web::scope("/mediator/quotes")
            .route("", web::get().to(mediated::list_quotes))
            .route("", web::post().to(mediated::create_quote))
            .route("/{id}", web::get().to(mediated::get_quote))
            .route("/{id}", web::put().to(mediated::update_quote))
            .route("/{id}", web::delete().to(mediated::delete_quote)),
    );
}
