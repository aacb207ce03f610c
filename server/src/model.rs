//! The `Todo` entity and the payloads that create or modify it.
//!
//! # Design
//! `Todo` is the stored and served representation. Writes arrive as
//! `NewTodo` (POST) or `TodoPatch` (PATCH) so the wire never controls `id`:
//! both payloads silently ignore an `id` field if the client sends one.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the repository. Zero means "not yet persisted".
pub type TodoId = i64;

/// A single todo item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(default)]
    pub id: TodoId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub order: i64,
}

impl Todo {
    /// An unsaved todo: `id` and `order` are left at 0.
    pub fn new(title: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            completed,
            ..Self::default()
        }
    }

    pub fn with_id(id: TodoId, title: impl Into<String>, completed: bool, order: i64) -> Self {
        Self {
            id,
            title: title.into(),
            completed,
            order,
        }
    }

    /// Overwrite every field the patch carries. `id` never changes.
    pub fn apply(&mut self, patch: TodoPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
    }
}

/// Body of `POST /todos`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub order: i64,
}

impl NewTodo {
    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo {
            id,
            title: self.title,
            completed: self.completed,
            order: self.order,
        }
    }
}

/// Body of `PATCH /todos/{id}`. Absent or `null` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}
