use crate::domain;
use crate::domain::todo::{SaveTodo, TodoItem};
use anyhow::Context;
use sqlx::{FromRow, PgPool, query, query_as};

/// Todo store backed by the `todo_item` table in PostgreSQL
#[derive(Clone)]
pub struct DbTodoStore {
    db: PgPool,
}

impl DbTodoStore {
    pub fn new(db: PgPool) -> DbTodoStore {
        DbTodoStore { db }
    }
}

#[derive(FromRow)]
struct TodoItemRow {
    id: i64,
    title: String,
    completed: bool,
}

impl From<TodoItemRow> for TodoItem {
    fn from(value: TodoItemRow) -> Self {
        TodoItem {
            id: value.id,
            title: value.title,
            completed: value.completed,
        }
    }
}

impl domain::todo::driven_ports::TodoStore for DbTodoStore {
    async fn find_all(&self) -> Result<Vec<TodoItem>, anyhow::Error> {
        let todo_items: Vec<TodoItem> = query_as::<_, TodoItemRow>(
            "SELECT ti.id, ti.title, ti.completed FROM todo_item ti ORDER BY ti.id",
        )
        .fetch_all(&self.db)
        .await
        .context("trying to fetch all todo items")?
        .into_iter()
        .map(TodoItem::from)
        .collect();

        Ok(todo_items)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TodoItem>, anyhow::Error> {
        let todo_item = query_as::<_, TodoItemRow>(
            "SELECT ti.id, ti.title, ti.completed FROM todo_item ti WHERE ti.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("trying to fetch a todo item by ID")?
        .map(TodoItem::from);

        Ok(todo_item)
    }

    async fn save(&self, todo: &SaveTodo) -> Result<TodoItem, anyhow::Error> {
        let Some(todo_id) = todo.id else {
            let inserted = query_as::<_, TodoItemRow>(
                "INSERT INTO todo_item(title, completed) VALUES ($1, $2) RETURNING id, title, completed",
            )
            .bind(todo.title.as_str())
            .bind(todo.completed)
            .fetch_one(&self.db)
            .await
            .context("trying to insert a new todo item into the database")?;

            return Ok(inserted.into());
        };

        let mut txn = self
            .db
            .begin()
            .await
            .context("Starting transaction from db pool")?;

        let upserted = query_as::<_, TodoItemRow>(
            "INSERT INTO todo_item(id, title, completed) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET title = EXCLUDED.title, completed = EXCLUDED.completed \
             RETURNING id, title, completed",
        )
        .bind(todo_id)
        .bind(todo.title.as_str())
        .bind(todo.completed)
        .fetch_one(&mut *txn)
        .await
        .context("trying to upsert a todo item by ID")?;

        // Inserting with an explicit id bypasses the sequence, so push it past that id
        query("SELECT setval('todo_item_id_seq', GREATEST($1, last_value)) FROM todo_item_id_seq")
            .bind(todo_id)
            .execute(&mut *txn)
            .await
            .context("trying to advance the todo item id sequence")?;

        txn.commit()
            .await
            .context("Committing database transaction")?;

        Ok(upserted.into())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), anyhow::Error> {
        query("DELETE FROM todo_item WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("trying to remove a todo item from the database")?;

        Ok(())
    }
}
