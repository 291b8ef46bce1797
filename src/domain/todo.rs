use crate::domain::todo::driven_ports::TodoStore;
use crate::domain::todo::driving_ports::TodoError;
use anyhow::Context;

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

impl TodoItem {
    /// Overwrites the user-editable fields. The id never changes.
    fn apply(&mut self, update: &UpdateTodo) {
        self.title = update.title.clone();
        self.completed = update.completed;
    }

    fn title_contains(&self, lowercase_keyword: &str) -> bool {
        self.title.to_lowercase().contains(lowercase_keyword)
    }
}

/// A todo on its way into the store. Without an id the store allocates a fresh one;
/// with an id the store overwrites (or creates) the record under that id.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct SaveTodo {
    pub id: Option<i64>,
    pub title: String,
    pub completed: bool,
}

impl From<TodoItem> for SaveTodo {
    fn from(value: TodoItem) -> Self {
        SaveTodo {
            id: Some(value.id),
            title: value.title,
            completed: value.completed,
        }
    }
}

impl From<&NewTodo> for SaveTodo {
    fn from(value: &NewTodo) -> Self {
        SaveTodo {
            id: None,
            title: value.title.clone(),
            completed: value.completed,
        }
    }
}

#[cfg_attr(test, derive(Clone, Debug, PartialEq, Eq))]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
}

#[cfg_attr(test, derive(Clone, Debug, PartialEq, Eq))]
pub struct UpdateTodo {
    pub title: String,
    pub completed: bool,
}

pub mod driven_ports {
    use super::*;
    use std::future::Future;

    /// Storage for todo items. A missing id is never an error: lookups come back as [None]
    /// and deleting an absent id does nothing. Ids handed out by [TodoStore::save] are never
    /// reused, even after the record is deleted.
    pub trait TodoStore: Sync {
        fn find_all(&self) -> impl Future<Output = Result<Vec<TodoItem>, anyhow::Error>> + Send;

        fn find_by_id(
            &self,
            id: i64,
        ) -> impl Future<Output = Result<Option<TodoItem>, anyhow::Error>> + Send;

        fn save(
            &self,
            todo: &SaveTodo,
        ) -> impl Future<Output = Result<TodoItem, anyhow::Error>> + Send;

        fn delete_by_id(&self, id: i64) -> impl Future<Output = Result<(), anyhow::Error>> + Send;
    }
}

pub mod driving_ports {
    use super::*;
    use std::future::Future;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum TodoError {
        #[error("todo {0} does not exist")]
        TodoDoesNotExist(i64),
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait TodoPort: Sync {
        fn all_todos(
            &self,
            todo_store: &impl driven_ports::TodoStore,
        ) -> impl Future<Output = Result<Vec<TodoItem>, anyhow::Error>> + Send;
        fn todo_by_id(
            &self,
            todo_id: i64,
            todo_store: &impl driven_ports::TodoStore,
        ) -> impl Future<Output = Result<Option<TodoItem>, anyhow::Error>> + Send;
        fn search_todos(
            &self,
            keyword: &str,
            todo_store: &impl driven_ports::TodoStore,
        ) -> impl Future<Output = Result<Vec<TodoItem>, anyhow::Error>> + Send;
        fn create_todo(
            &self,
            new_todo: &NewTodo,
            todo_store: &impl driven_ports::TodoStore,
        ) -> impl Future<Output = Result<TodoItem, anyhow::Error>> + Send;
        fn update_todo(
            &self,
            todo_id: i64,
            update: &UpdateTodo,
            todo_store: &impl driven_ports::TodoStore,
        ) -> impl Future<Output = Result<TodoItem, TodoError>> + Send;
        fn delete_todo(
            &self,
            todo_id: i64,
            todo_store: &impl driven_ports::TodoStore,
        ) -> impl Future<Output = Result<(), TodoError>> + Send;
    }
}

pub struct TodoService {}

impl driving_ports::TodoPort for TodoService {
    async fn all_todos(&self, todo_store: &impl TodoStore) -> Result<Vec<TodoItem>, anyhow::Error> {
        todo_store.find_all().await.context("fetching all todos")
    }

    async fn todo_by_id(
        &self,
        todo_id: i64,
        todo_store: &impl TodoStore,
    ) -> Result<Option<TodoItem>, anyhow::Error> {
        todo_store
            .find_by_id(todo_id)
            .await
            .context("fetching a todo by id")
    }

    async fn search_todos(
        &self,
        keyword: &str,
        todo_store: &impl TodoStore,
    ) -> Result<Vec<TodoItem>, anyhow::Error> {
        let lowercase_keyword = keyword.to_lowercase();
        let matching_todos = todo_store
            .find_all()
            .await
            .context("searching todos by title")?
            .into_iter()
            .filter(|todo| todo.title_contains(&lowercase_keyword))
            .collect();

        Ok(matching_todos)
    }

    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        todo_store: &impl TodoStore,
    ) -> Result<TodoItem, anyhow::Error> {
        todo_store
            .save(&SaveTodo::from(new_todo))
            .await
            .context("creating a todo")
    }

    async fn update_todo(
        &self,
        todo_id: i64,
        update: &UpdateTodo,
        todo_store: &impl TodoStore,
    ) -> Result<TodoItem, TodoError> {
        let Some(mut existing_todo) = todo_store
            .find_by_id(todo_id)
            .await
            .context("looking up a todo to update")?
        else {
            return Err(TodoError::TodoDoesNotExist(todo_id));
        };

        existing_todo.apply(update);
        let saved_todo = todo_store
            .save(&SaveTodo::from(existing_todo))
            .await
            .context("saving an updated todo")?;

        Ok(saved_todo)
    }

    async fn delete_todo(&self, todo_id: i64, todo_store: &impl TodoStore) -> Result<(), TodoError> {
        let existing_todo = todo_store
            .find_by_id(todo_id)
            .await
            .context("looking up a todo to delete")?;
        if existing_todo.is_none() {
            return Err(TodoError::TodoDoesNotExist(todo_id));
        }

        todo_store
            .delete_by_id(todo_id)
            .await
            .context("deleting a todo")?;
        Ok(())
    }
}
