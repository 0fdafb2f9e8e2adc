use crate::domain::todo::driving_ports::TodoPort;
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{
    BasicErrorResponse, FormOrJson, GenericErrorResponse, Path, TodoErrorResponse,
    ValidationErrorResponse,
};
use crate::{AppState, SharedData, domain, dto, persistence, views};
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{ErrorResponse, Html};
use axum::routing::{delete, get, post};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;
use validator::Validate;

#[derive(OpenApi)]
#[openapi(paths(list_todos, create_todo, toggle_todo, delete_todo))]
/// Defines the OpenAPI documentation for the todo fragment API
pub struct TodoApi;
/// Constant used to group todo endpoints in OpenAPI documentation
pub const TODO_API_GROUP: &str = "Todos";

/// Adds the "/todos" routes, which return HTML fragments for htmx to swap into the page
pub fn todo_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/todos",
            get(|State(app_state): AppState| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let todo_service = domain::todo::TodoService {};

                list_todos(&mut ext_cxn, &todo_service).await
            })
            .post(
                |State(app_state): AppState, FormOrJson(new_todo): FormOrJson<dto::NewTodo>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    create_todo(new_todo, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/todos/toggle/:todo_id",
            post(|State(app_state): AppState, Path(todo_id): Path<i64>| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let todo_service = domain::todo::TodoService {};

                toggle_todo(todo_id, &mut ext_cxn, &todo_service).await
            }),
        )
        .route(
            "/todos/:todo_id",
            delete(|State(app_state): AppState, Path(todo_id): Path<i64>| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let todo_service = domain::todo::TodoService {};

                delete_todo(todo_id, &mut ext_cxn, &todo_service).await
            }),
        )
}

#[utoipa::path(
    get,
    path = "/todos",
    tag = TODO_API_GROUP,
    responses(
        (status = 200, description = "Every todo followed by the form for adding another", body = String, content_type = "text/html"),
        (status = 500, description = "The todo store could not be read", body = BasicErrorResponse),
    ),
)]
/// Renders the full todo list
async fn list_todos(
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Html<String>, ErrorResponse> {
    info!("Listing todos");
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader;

    let todos = todo_service
        .list_todos(&mut *ext_cxn, &todo_reader)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Html(views::render_todo_list(&todos)))
}

#[utoipa::path(
    post,
    path = "/todos",
    tag = TODO_API_GROUP,
    request_body(content = dto::NewTodo, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "The newly created todo", body = String, content_type = "text/html"),
        (status = 400, description = "The content was missing or empty", body = BasicErrorResponse),
        (status = 500, description = "The todo could not be stored", body = BasicErrorResponse),
    ),
)]
/// Creates a todo and renders it
async fn create_todo(
    new_todo: dto::NewTodo,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Html<String>, ErrorResponse> {
    info!("Creating todo {new_todo}");
    new_todo
        .validate()
        .map_err(ValidationErrorResponse::from)?;

    let domain_todo = domain::todo::NewTodo::from(new_todo);
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

    let created_todo = todo_service
        .create_todo(&domain_todo, &mut *ext_cxn, &todo_writer)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Html(views::render_todo_item(&created_todo)))
}

#[utoipa::path(
    post,
    path = "/todos/toggle/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = i64, Path, description = "ID of the todo to toggle")),
    responses(
        (status = 200, description = "The todo with its completion state flipped", body = String, content_type = "text/html"),
        (status = 400, description = "The ID was not numeric", body = BasicErrorResponse),
        (status = 404, description = "No todo has the given ID", body = BasicErrorResponse),
        (status = 500, description = "The todo store could not be reached", body = BasicErrorResponse),
    ),
)]
/// Flips a todo between completed and not completed
async fn toggle_todo(
    todo_id: i64,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Html<String>, ErrorResponse> {
    info!("Toggling todo {todo_id}");
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader;
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

    let toggled_todo = todo_service
        .toggle_todo(todo_id, &mut *ext_cxn, &todo_reader, &todo_writer)
        .await
        .map_err(TodoErrorResponse::from)?;

    Ok(Html(views::render_todo_item(&toggled_todo)))
}

#[utoipa::path(
    delete,
    path = "/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(("todo_id" = i64, Path, description = "ID of the todo to delete")),
    responses(
        (status = 200, description = "The todo is gone (or never existed)"),
        (status = 400, description = "The ID was not numeric", body = BasicErrorResponse),
        (status = 500, description = "The todo store could not be reached", body = BasicErrorResponse),
    ),
)]
/// Deletes a todo. The empty response body lets htmx drop the todo from the page.
async fn delete_todo(
    todo_id: i64,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<StatusCode, ErrorResponse> {
    info!("Deleting todo {todo_id}");
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter;

    todo_service
        .delete_todo(todo_id, &mut *ext_cxn, &todo_writer)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(StatusCode::OK)
}
