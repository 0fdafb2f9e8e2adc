use crate::{SharedData, api, logging};
use axum::Router;
use std::sync::Arc;

/// Builds the application router: the landing page, the todo fragment endpoints, and the
/// OpenAPI documentation, all wrapped in request tracing
pub fn build_router(shared_data: Arc<SharedData>) -> Router {
    let app_routes = Router::new()
        .merge(api::page::page_routes())
        .merge(api::todo::todo_routes());

    logging::attach_tracing_http(app_routes)
        .merge(api::swagger_main::build_documentation())
        .with_state(shared_data)
}
