use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo::driving_ports::TodoError;
use crate::external_connections::ExternalConnectivity;
use anyhow::{Context, Error};
use tracing::{debug, info};

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Todo {
    pub id: i64,
    pub content: String,
    pub completed: bool,
}

#[derive(Debug)]
#[cfg_attr(test, derive(Clone, PartialEq, Eq))]
pub struct NewTodo {
    pub content: String,
}

pub mod driven_ports {
    use super::*;

    pub trait TodoReader {
        async fn all_todos(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Todo>, anyhow::Error>;
        async fn todo_by_id(
            &self,
            todo_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<Todo>, anyhow::Error>;
    }

    pub trait TodoWriter {
        /// Inserts a new, incomplete todo and returns the stored row
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Todo, anyhow::Error>;

        /// Sets the completion state of a todo, returning the updated row or None if
        /// no todo had the given ID
        async fn set_completed(
            &self,
            todo_id: i64,
            completed: bool,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<Todo>, anyhow::Error>;

        /// Removes a todo. Removing a todo that doesn't exist is not an error.
        async fn delete_todo(
            &self,
            todo_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum TodoError {
        #[error("Todo {0} does not exist.")]
        TodoDoesNotExist(i64),
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait TodoPort {
        async fn list_todos(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
        ) -> Result<Vec<Todo>, anyhow::Error>;
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<Todo, anyhow::Error>;
        async fn toggle_todo(
            &self,
            todo_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<Todo, TodoError>;
        async fn delete_todo(
            &self,
            todo_id: i64,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<(), anyhow::Error>;
    }
}

pub struct TodoService {}

impl driving_ports::TodoPort for TodoService {
    async fn list_todos(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<Vec<Todo>, Error> {
        let todos = todo_read
            .all_todos(&mut *ext_cxn)
            .await
            .context("listing todos")?;

        Ok(todos)
    }

    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<Todo, Error> {
        let created_todo = todo_write
            .create_todo(new_todo, &mut *ext_cxn)
            .await
            .context("creating a todo")?;
        info!("Created todo {}", created_todo.id);

        Ok(created_todo)
    }

    // The read and the write are separate statements, so two concurrent toggles of the same
    // todo may both flip from the same starting state.
    #[tracing::instrument(skip(self, ext_cxn, todo_read, todo_write))]
    async fn toggle_todo(
        &self,
        todo_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
        todo_write: &impl TodoWriter,
    ) -> Result<Todo, TodoError> {
        let Some(current_todo) = todo_read
            .todo_by_id(todo_id, &mut *ext_cxn)
            .await
            .context("reading a todo before toggling it")?
        else {
            debug!("No todo to toggle");
            return Err(TodoError::TodoDoesNotExist(todo_id));
        };

        let updated_todo = todo_write
            .set_completed(todo_id, !current_todo.completed, &mut *ext_cxn)
            .await
            .context("toggling a todo")?;

        // The todo may have been deleted between the read and the write
        updated_todo.ok_or(TodoError::TodoDoesNotExist(todo_id))
    }

    async fn delete_todo(
        &self,
        todo_id: i64,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<(), Error> {
        todo_write
            .delete_todo(todo_id, &mut *ext_cxn)
            .await
            .context("deleting a todo")?;
        Ok(())
    }
}
