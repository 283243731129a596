mod api;

use utoipa_axum::router::OpenApiRouter;

use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", api::auth_routes())
        .nest("/legal-queries", api::legal_query_routes())
        .nest("/advocates", api::advocate_routes())
        .nest("/bids", api::bid_routes())
        .nest("/cases", api::case_routes())
        .nest("/documents", api::document_routes())
        .nest("/consultation", api::consultation_routes())
}
