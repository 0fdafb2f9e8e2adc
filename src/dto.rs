use crate::routing_utils::{BasicErrorResponse, ExtraInfo, ValidationErrorSchema};
use utoipa::OpenApi;

mod todo;

pub use todo::*;

/// Shared schemas referenced by the API documentation
#[derive(OpenApi)]
#[openapi(components(schemas(NewTodo, BasicErrorResponse, ExtraInfo, ValidationErrorSchema)))]
pub struct OpenApiSchemas;
