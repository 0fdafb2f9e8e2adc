use crate::domain;
use sqlx::FromRow;

/// DB entity describing a row of the `todos` table
#[derive(Debug, FromRow)]
pub struct TodoRow {
    pub id: i64,
    pub content: String,
    pub completed: bool,
}

impl From<TodoRow> for domain::todo::Todo {
    fn from(value: TodoRow) -> Self {
        domain::todo::Todo {
            id: value.id,
            content: value.content,
            completed: value.completed,
        }
    }
}
