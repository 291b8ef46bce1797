use crate::domain;
use crate::domain::todo::{SaveTodo, TodoItem};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Todo store kept in process memory. Clones share the same data, so one instance can be
/// handed to the router while tests keep another handle to inspect it.
#[derive(Clone, Default)]
pub struct InMemoryTodoStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Default)]
struct StoreState {
    todos: BTreeMap<i64, TodoItem>,
    highest_todo_id: i64,
}

impl StoreState {
    fn allocate_id(&mut self) -> i64 {
        self.highest_todo_id += 1;
        self.highest_todo_id
    }
}

impl InMemoryTodoStore {
    pub fn new() -> InMemoryTodoStore {
        Self::default()
    }
}

impl domain::todo::driven_ports::TodoStore for InMemoryTodoStore {
    async fn find_all(&self) -> Result<Vec<TodoItem>, anyhow::Error> {
        let state = self.state.read().await;

        Ok(state.todos.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TodoItem>, anyhow::Error> {
        let state = self.state.read().await;

        Ok(state.todos.get(&id).cloned())
    }

    async fn save(&self, todo: &SaveTodo) -> Result<TodoItem, anyhow::Error> {
        let mut state = self.state.write().await;
        let todo_id = match todo.id {
            Some(todo_id) => {
                // explicit ids must never be handed out again by allocate_id
                state.highest_todo_id = state.highest_todo_id.max(todo_id);
                todo_id
            }
            None => state.allocate_id(),
        };

        let saved_todo = TodoItem {
            id: todo_id,
            title: todo.title.clone(),
            completed: todo.completed,
        };
        state.todos.insert(todo_id, saved_todo.clone());

        Ok(saved_todo)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), anyhow::Error> {
        let mut state = self.state.write().await;
        state.todos.remove(&id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::todo::driven_ports::TodoStore;
    use futures::future::join_all;
    use speculoos::prelude::*;

    fn unsaved(title: &str) -> SaveTodo {
        SaveTodo {
            id: None,
            title: title.to_owned(),
            completed: false,
        }
    }

    #[tokio::test]
    async fn allocates_sequential_ids() {
        let store = InMemoryTodoStore::new();

        let first = store.save(&unsaved("first")).await.expect("save failed");
        let second = store.save(&unsaved("second")).await.expect("save failed");

        assert_eq!(1, first.id);
        assert_eq!(2, second.id);
    }

    #[tokio::test]
    async fn saved_todo_can_be_found() {
        let store = InMemoryTodoStore::new();

        let saved = store
            .save(&SaveTodo {
                id: None,
                title: "Buy milk".to_owned(),
                completed: true,
            })
            .await
            .expect("save failed");

        let found = store.find_by_id(saved.id).await;
        assert_that!(found)
            .is_ok()
            .is_some()
            .is_equal_to(TodoItem {
                id: 1,
                title: "Buy milk".to_owned(),
                completed: true,
            });
    }

    #[tokio::test]
    async fn missing_id_is_none() {
        let store = InMemoryTodoStore::new();

        assert_that!(store.find_by_id(42).await).is_ok().is_none();
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryTodoStore::new();
        store.save(&unsaved("first")).await.expect("save failed");
        let second = store.save(&unsaved("second")).await.expect("save failed");

        store
            .delete_by_id(second.id)
            .await
            .expect("delete failed");
        let third = store.save(&unsaved("third")).await.expect("save failed");

        assert_eq!(3, third.id);
    }

    #[tokio::test]
    async fn save_with_id_overwrites_existing_record() {
        let store = InMemoryTodoStore::new();
        let original = store.save(&unsaved("original")).await.expect("save failed");

        let overwritten = store
            .save(&SaveTodo {
                id: Some(original.id),
                title: "replacement".to_owned(),
                completed: true,
            })
            .await;

        assert_that!(overwritten).is_ok_containing(TodoItem {
            id: original.id,
            title: "replacement".to_owned(),
            completed: true,
        });
        assert_that!(store.find_all().await).is_ok().has_length(1);
    }

    #[tokio::test]
    async fn save_with_unknown_id_creates_record_and_moves_allocation_past_it() {
        let store = InMemoryTodoStore::new();

        store
            .save(&SaveTodo {
                id: Some(10),
                title: "chosen id".to_owned(),
                completed: false,
            })
            .await
            .expect("save failed");
        let allocated = store.save(&unsaved("next")).await.expect("save failed");

        assert_that!(store.find_by_id(10).await).is_ok().is_some();
        assert_eq!(11, allocated.id);
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_a_no_op() {
        let store = InMemoryTodoStore::new();
        store.save(&unsaved("keep me")).await.expect("save failed");

        assert_that!(store.delete_by_id(99).await).is_ok();
        assert_that!(store.find_all().await).is_ok().has_length(1);
    }

    #[tokio::test]
    async fn find_all_returns_todos_in_id_order() {
        let store = InMemoryTodoStore::new();
        for title in ["a", "b", "c"] {
            store.save(&unsaved(title)).await.expect("save failed");
        }
        store.delete_by_id(2).await.expect("delete failed");

        let all_todos = store.find_all().await.expect("find_all failed");
        let titles: Vec<&str> = all_todos.iter().map(|todo| todo.title.as_str()).collect();
        assert_eq!(vec!["a", "c"], titles);
    }

    #[tokio::test]
    async fn clones_share_the_same_data() {
        let store = InMemoryTodoStore::new();
        let other_handle = store.clone();

        store.save(&unsaved("shared")).await.expect("save failed");

        assert_that!(other_handle.find_all().await).is_ok().has_length(1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_saves_get_unique_ids() {
        let store = InMemoryTodoStore::new();

        let saves = (0..50).map(|idx| {
            let store = store.clone();
            tokio::spawn(async move { store.save(&unsaved(&format!("todo {idx}"))).await })
        });
        let mut ids: Vec<i64> = join_all(saves)
            .await
            .into_iter()
            .map(|joined| joined.expect("save task panicked").expect("save failed").id)
            .collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(50, ids.len());
        assert_eq!(Some(&50), ids.last());
    }
}
