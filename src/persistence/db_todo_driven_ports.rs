use crate::domain;
use crate::domain::todo::{NewTodo, Todo};
use crate::entity::TodoRow;
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use sqlx::{query, query_as};

pub struct DbTodoReader;

impl domain::todo::driven_ports::TodoReader for DbTodoReader {
    async fn all_todos(&self, ext_cxn: &mut impl ExternalConnectivity) -> Result<Vec<Todo>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todos: Vec<Todo> =
            query_as::<_, TodoRow>("SELECT id, content, completed FROM todos")
                .fetch_all(cxn.borrow_connection())
                .await
                .context("trying to fetch all todos")?
                .into_iter()
                .map(Todo::from)
                .collect();

        Ok(todos)
    }

    async fn todo_by_id(
        &self,
        todo_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<Todo>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todo = query_as::<_, TodoRow>("SELECT id, content, completed FROM todos WHERE id = ?")
            .bind(todo_id)
            .fetch_optional(cxn.borrow_connection())
            .await
            .context("trying to fetch a todo by ID")?
            .map(Todo::from);

        Ok(todo)
    }
}

pub struct DbTodoWriter;

impl domain::todo::driven_ports::TodoWriter for DbTodoWriter {
    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Todo, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let created_row = query_as::<_, TodoRow>(
            "INSERT INTO todos(content) VALUES (?) RETURNING id, content, completed",
        )
        .bind(&new_todo.content)
        .fetch_one(cxn.borrow_connection())
        .await
        .context("trying to insert a new todo into the database")?;

        Ok(created_row.into())
    }

    async fn set_completed(
        &self,
        todo_id: i64,
        completed: bool,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<Todo>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let updated_row = query_as::<_, TodoRow>(
            "UPDATE todos SET completed = ? WHERE id = ? RETURNING id, content, completed",
        )
        .bind(completed)
        .bind(todo_id)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to update a todo's completion state")?;

        Ok(updated_row.map(Todo::from))
    }

    async fn delete_todo(
        &self,
        todo_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        query("DELETE FROM todos WHERE id = ?")
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to remove a todo from the database")?;

        Ok(())
    }
}
