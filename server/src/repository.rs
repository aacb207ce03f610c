//! Storage seam for todos and the in-memory store behind it.
//!
//! # Design
//! `TodoRepository` is object safe so the router can hold an
//! `Arc<dyn TodoRepository>` and tests can wrap or replace it. Absence is
//! reported as `None`; turning that into an HTTP status is the controller's
//! job.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::{NewTodo, Todo, TodoId, TodoPatch};

#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn find_by_id(&self, id: TodoId) -> Option<Todo>;

    /// Every stored todo, in insertion order.
    async fn get_all(&self) -> Vec<Todo>;

    /// Store a new todo under the next free id and return it.
    async fn save(&self, todo: NewTodo) -> Todo;

    async fn update(&self, id: TodoId, patch: TodoPatch) -> Option<Todo>;

    /// Remove a todo, returning what was removed.
    async fn delete(&self, id: TodoId) -> Option<Todo>;
}

#[derive(Debug)]
struct Store {
    todos: BTreeMap<TodoId, Todo>,
    next_id: TodoId,
}

/// Process-local repository. Ids start at 1 and are never reused, so the
/// id-ordered map doubles as insertion order.
#[derive(Debug)]
pub struct InMemoryTodoRepository {
    store: RwLock<Store>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::with_todos(std::iter::empty())
    }

    /// Start from already-identified todos. New ids continue after the
    /// largest seeded one and are always positive.
    pub fn with_todos(todos: impl IntoIterator<Item = Todo>) -> Self {
        let todos: BTreeMap<TodoId, Todo> = todos.into_iter().map(|t| (t.id, t)).collect();
        let next_id = todos.keys().next_back().map_or(1, |max| (max + 1).max(1));
        Self {
            store: RwLock::new(Store { todos, next_id }),
        }
    }
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_by_id(&self, id: TodoId) -> Option<Todo> {
        self.store.read().await.todos.get(&id).cloned()
    }

    async fn get_all(&self) -> Vec<Todo> {
        self.store.read().await.todos.values().cloned().collect()
    }

    async fn save(&self, todo: NewTodo) -> Todo {
        let mut store = self.store.write().await;
        let id = store.next_id;
        store.next_id += 1;
        let todo = todo.into_todo(id);
        store.todos.insert(id, todo.clone());
        todo
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> Option<Todo> {
        let mut store = self.store.write().await;
        let todo = store.todos.get_mut(&id)?;
        todo.apply(patch);
        Some(todo.clone())
    }

    async fn delete(&self, id: TodoId) -> Option<Todo> {
        self.store.write().await.todos.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            ..NewTodo::default()
        }
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids_from_one() {
        let repo = InMemoryTodoRepository::new();
        assert_eq!(repo.save(new_todo("first")).await.id, 1);
        assert_eq!(repo.save(new_todo("second")).await.id, 2);
    }

    #[tokio::test]
    async fn get_all_preserves_insertion_order() {
        let repo = InMemoryTodoRepository::new();
        for title in ["a", "b", "c"] {
            repo.save(new_todo(title)).await;
        }
        let titles: Vec<String> = repo.get_all().await.into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn find_by_id_misses_unknown_id() {
        let repo = InMemoryTodoRepository::new();
        assert!(repo.find_by_id(22).await.is_none());
    }

    #[tokio::test]
    async fn seeded_store_continues_after_largest_id() {
        let repo = InMemoryTodoRepository::with_todos([
            Todo::with_id(5, "todo title", false, 5),
            Todo::with_id(11, "eleven", false, 11),
        ]);
        assert_eq!(
            repo.find_by_id(5).await,
            Some(Todo::with_id(5, "todo title", false, 5))
        );
        assert_eq!(repo.save(new_todo("next")).await.id, 12);
    }

    #[tokio::test]
    async fn seeded_negative_ids_do_not_drag_new_ids_below_one() {
        let repo = InMemoryTodoRepository::with_todos([Todo::with_id(-3, "legacy", false, 0)]);
        assert_eq!(repo.save(new_todo("next")).await.id, 1);
        assert!(repo.find_by_id(-3).await.is_some());
    }

    #[tokio::test]
    async fn update_keeps_id_and_misses_unknown_id() {
        let repo = InMemoryTodoRepository::with_todos([Todo::with_id(5, "todo title", false, 5)]);
        let patch = TodoPatch {
            completed: Some(true),
            ..TodoPatch::default()
        };
        let updated = repo.update(5, patch.clone()).await.unwrap();
        assert_eq!(updated, Todo::with_id(5, "todo title", true, 5));
        assert!(repo.update(22, patch).await.is_none());
    }

    #[tokio::test]
    async fn delete_removes_once_and_ids_are_not_reused() {
        let repo = InMemoryTodoRepository::new();
        let saved = repo.save(new_todo("gone")).await;
        assert_eq!(repo.delete(saved.id).await, Some(saved.clone()));
        assert!(repo.delete(saved.id).await.is_none());
        assert_eq!(repo.save(new_todo("fresh")).await.id, 2);
    }
}
