use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

pub fn legal_query_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::legal_query::list_queries,
        handlers::legal_query::create_query
    ))
}

pub fn advocate_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::advocate::list_advocates,
        handlers::advocate::create_advocate
    ))
}

pub fn bid_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::bid::list_bids, handlers::bid::create_bid))
        .routes(routes!(
            handlers::bid::get_bid,
            handlers::bid::update_bid,
            handlers::bid::delete_bid
        ))
        .routes(routes!(handlers::bid::accept_bid))
}

pub fn case_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::case::list_cases, handlers::case::create_case))
        .routes(routes!(
            handlers::case::get_case,
            handlers::case::update_case,
            handlers::case::delete_case
        ))
        .routes(routes!(
            handlers::case::list_notifications,
            handlers::case::create_notification
        ))
        .layer(handlers::case::case_upload_body_limit())
}

pub fn document_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::document::list_documents,
            handlers::document::create_document
        ))
        .routes(routes!(
            handlers::document::get_document,
            handlers::document::update_document,
            handlers::document::delete_document
        ))
        .routes(routes!(handlers::document::toggle_star))
        .routes(routes!(handlers::document::download_document))
}

pub fn consultation_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::consultation::consult))
}
