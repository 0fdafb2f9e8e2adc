use axum::Router;
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header};
use htmx_todo::{SharedData, db, persistence, routes};
use std::sync::Arc;
use tower::ServiceExt;

/// Builds the full application router on top of a fresh, migrated in-memory database
pub async fn test_app() -> Router {
    let pool = db::connect_in_memory()
        .await
        .expect("Could not open in-memory test database");
    db::migrate(&pool)
        .await
        .expect("Could not migrate test database");

    routes::build_router(Arc::new(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(pool),
    }))
}

/// Sends a request through the router and returns the status and the body as text
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router failed to produce a response");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read data from response body!");

    (
        status,
        String::from_utf8(bytes.to_vec()).expect("Response body was not valid UTF-8"),
    )
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("Could not build GET request")
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .expect("Could not build DELETE request")
}

/// An empty POST, which is what htmx sends when a todo's checkbox is clicked
pub fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .expect("Could not build POST request")
}

/// A urlencoded form POST, which is what htmx sends when the new todo form is submitted
pub fn post_form(uri: &str, form_body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body.to_owned()))
        .expect("Could not build form POST request")
}

pub fn post_json(uri: &str, json_body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json_body.to_string()))
        .expect("Could not build JSON POST request")
}

/// Creates a todo through the API and returns its ID, read back out of the rendered fragment
pub async fn create_todo(app: &Router, content: &str) -> i64 {
    let (status, fragment) = send(app, post_form("/todos", &format!("content={content}"))).await;
    assert_eq!(StatusCode::OK, status, "Creating a todo failed: {fragment}");

    todo_id_in(&fragment)
}

/// Pulls the todo ID out of a rendered todo item's toggle URL
pub fn todo_id_in(fragment: &str) -> i64 {
    let toggle_marker = "/todos/toggle/";
    let id_start = fragment
        .find(toggle_marker)
        .unwrap_or_else(|| panic!("No toggle URL in fragment: {fragment}"))
        + toggle_marker.len();

    fragment[id_start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or_else(|err| panic!("Bad todo ID in fragment ({err}): {fragment}"))
}

/// Number of todo items rendered in a list fragment
pub fn rendered_todo_count(list_fragment: &str) -> usize {
    list_fragment.matches("hx-delete=").count()
}
