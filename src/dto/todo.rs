use crate::domain;
use derive_more::Display;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// DTO for creating a new todo, submitted as a form by the todo list page or as JSON
#[derive(Debug, Deserialize, Display, Validate, ToSchema)]
#[display("\"{content}\"")]
pub struct NewTodo {
    #[validate(length(min = 1))]
    #[schema(example = "buy milk")]
    pub content: String,
}

impl From<NewTodo> for domain::todo::NewTodo {
    fn from(value: NewTodo) -> Self {
        domain::todo::NewTodo {
            content: value.content,
        }
    }
}
