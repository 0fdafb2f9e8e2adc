use crate::{SharedData, views};
use axum::Router;
use axum::response::Html;
use axum::routing::get;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(index))]
/// Defines the OpenAPI documentation for the page shell
pub struct PageApi;

/// Adds the landing page route
pub fn page_routes() -> Router<Arc<SharedData>> {
    Router::new().route("/", get(index))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Page shell which loads the todo list once it's rendered", body = String, content_type = "text/html"),
    ),
)]
async fn index() -> Html<String> {
    info!("Serving landing page");
    Html(views::render_page(&views::render_index_body()))
}
