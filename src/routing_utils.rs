use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection};
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::{Json, async_trait};
use axum_macros::FromRequestParts;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;
use utoipa::openapi::{RefOr, Schema};
use utoipa::{ToSchema, openapi};
use validator::ValidationErrors;

use crate::domain::todo::driving_ports::TodoError;

/// Contains diagnostic information about an API failure
#[derive(Serialize, Debug, ToSchema)]
pub struct BasicErrorResponse {
    #[schema(example = "not_found")]
    error_code: String,
    #[schema(example = "The requested todo could not be found.")]
    error_description: String,
    extra_info: Option<ExtraInfo>,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(untagged)]
pub enum ExtraInfo {
    ValidationIssues(ValidationErrorSchema),
    Message(String),
}

/// Stand-in OpenAPI schema for [ValidationErrors] which just provides an empty object
#[derive(Serialize, Debug)]
#[serde(transparent)]
pub struct ValidationErrorSchema(ValidationErrors);

impl<'schem> ToSchema<'schem> for ValidationErrorSchema {
    fn schema() -> (&'schem str, RefOr<Schema>) {
        (
            "ValidationErrorSchema",
            openapi::ObjectBuilder::new().into(),
        )
    }
}

fn basic_error(
    status: StatusCode,
    error_code: &str,
    error_description: &str,
    extra_info: Option<ExtraInfo>,
) -> Response {
    (
        status,
        Json(BasicErrorResponse {
            error_code: error_code.into(),
            error_description: error_description.into(),
            extra_info,
        }),
    )
        .into_response()
}

/// Response type for unexpected failures. The cause is logged but never sent to the client.
pub struct GenericErrorResponse(pub anyhow::Error);

impl IntoResponse for GenericErrorResponse {
    fn into_response(self) -> Response {
        error!("Request failed: {:#}", self.0);
        basic_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Could not access data to complete your request",
            None,
        )
    }
}

/// Response type that turns [TodoError]s into [BasicErrorResponse]s
pub enum TodoErrorResponse {
    NotFound(i64),
    PortFailure(anyhow::Error),
}

impl IntoResponse for TodoErrorResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(todo_id) => basic_error(
                StatusCode::NOT_FOUND,
                "not_found",
                "The requested todo could not be found.",
                Some(ExtraInfo::Message(format!("No todo has the ID {todo_id}"))),
            ),
            Self::PortFailure(err) => GenericErrorResponse(err).into_response(),
        }
    }
}

impl From<TodoError> for TodoErrorResponse {
    fn from(value: TodoError) -> Self {
        match value {
            TodoError::TodoDoesNotExist(todo_id) => Self::NotFound(todo_id),
            TodoError::PortError(err) => Self::PortFailure(err),
        }
    }
}

/// Response type that wraps validation errors and turns them into [BasicErrorResponse]s
pub struct ValidationErrorResponse(ValidationErrors);

impl IntoResponse for ValidationErrorResponse {
    fn into_response(self) -> Response {
        basic_error(
            StatusCode::BAD_REQUEST,
            "invalid_input",
            "Submitted data was invalid.",
            Some(ExtraInfo::ValidationIssues(ValidationErrorSchema(self.0))),
        )
    }
}

impl From<ValidationErrors> for ValidationErrorResponse {
    fn from(value: ValidationErrors) -> Self {
        Self(value)
    }
}

/// Wrapper for [axum::extract::Path] which reports unparsable path segments with our
/// data structure for API errors
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(PathErrorResponse))]
pub struct Path<T>(pub T);

/// Response type representing a path segment that couldn't be parsed, like a non-numeric ID
pub struct PathErrorResponse {
    parse_problem: String,
}

impl From<PathRejection> for PathErrorResponse {
    fn from(value: PathRejection) -> Self {
        PathErrorResponse {
            parse_problem: value.body_text(),
        }
    }
}

impl IntoResponse for PathErrorResponse {
    fn into_response(self) -> Response {
        basic_error(
            StatusCode::BAD_REQUEST,
            "invalid_path",
            "The request path contained an invalid value.",
            Some(ExtraInfo::Message(self.parse_problem)),
        )
    }
}

/// Extracts a request body sent either as a JSON document or as a urlencoded form, which
/// is what htmx submits. Anything that isn't declared as JSON is parsed as a form.
pub struct FormOrJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = BodyErrorResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|content_type| content_type.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with("application/json"));

        if is_json {
            let Json(body) = Json::<T>::from_request(req, state)
                .await
                .map_err(BodyErrorResponse::from)?;
            Ok(FormOrJson(body))
        } else {
            let axum::Form(body) = axum::Form::<T>::from_request(req, state)
                .await
                .map_err(BodyErrorResponse::from)?;
            Ok(FormOrJson(body))
        }
    }
}

/// Response type representing a request body that couldn't be parsed
pub struct BodyErrorResponse {
    parse_problem: String,
}

impl From<JsonRejection> for BodyErrorResponse {
    fn from(value: JsonRejection) -> Self {
        BodyErrorResponse {
            parse_problem: value.body_text(),
        }
    }
}

impl From<FormRejection> for BodyErrorResponse {
    fn from(value: FormRejection) -> Self {
        BodyErrorResponse {
            parse_problem: value.body_text(),
        }
    }
}

impl IntoResponse for BodyErrorResponse {
    fn into_response(self) -> Response {
        basic_error(
            StatusCode::BAD_REQUEST,
            "invalid_body",
            "The passed request body was malformed or missing required fields.",
            Some(ExtraInfo::Message(self.parse_problem)),
        )
    }
}
