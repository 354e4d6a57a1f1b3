use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    bulk_create_handler, bulk_delete_handler, cache_status_handler, create_link_handler,
    delete_link_handler, get_link_handler, health_handler, list_links_handler, redirect_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/{id}", get(redirect_handler))
            .nest(
                "/v1/links",
                Router::new()
                    .route("/", post(create_link_handler).get(list_links_handler))
                    .route("/bulk", post(bulk_create_handler).delete(bulk_delete_handler))
                    .route("/{id}", get(get_link_handler).delete(delete_link_handler))
                    .route("/{id}/cached", get(cache_status_handler)),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
