//! Request handlers for the `/todos` resource.
//!
//! # Design
//! Handlers only translate: extract the path id and body, call the
//! repository, and map `None` to `ApiError::NotFound`. Path ids and write
//! bodies are validated before the repository is touched, so a `null` or
//! malformed payload never reaches storage.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::model::{NewTodo, Todo, TodoId, TodoPatch};
use crate::repository::TodoRepository;

/// Shared handle injected into every handler through router state.
pub type Repo = Arc<dyn TodoRepository>;

/// Unwrap a JSON body that must be present and non-null.
fn require_body<T: DeserializeOwned>(
    payload: Result<Json<Option<T>>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(body) = payload?;
    body.ok_or_else(|| ApiError::BadRequest("request body must not be null".to_string()))
}

pub async fn list_todos(State(repo): State<Repo>) -> Json<Vec<Todo>> {
    let todos = repo.get_all().await;
    debug!(count = todos.len(), "listed todos");
    Json(todos)
}

pub async fn get_todo(
    State(repo): State<Repo>,
    path: Result<Path<TodoId>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(id) = path?;
    debug!(id, "fetching todo");
    repo.find_by_id(id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

pub async fn create_todo(
    State(repo): State<Repo>,
    payload: Result<Json<Option<NewTodo>>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let input = require_body(payload)?;
    let todo = repo.save(input).await;
    info!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo(
    State(repo): State<Repo>,
    path: Result<Path<TodoId>, PathRejection>,
    payload: Result<Json<Option<TodoPatch>>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(id) = path?;
    let patch = require_body(payload)?;
    let todo = repo.update(id, patch).await.ok_or(ApiError::NotFound(id))?;
    info!(id, "updated todo");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(repo): State<Repo>,
    path: Result<Path<TodoId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    repo.delete(id).await.ok_or(ApiError::NotFound(id))?;
    info!(id, "deleted todo");
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryTodoRepository;

    fn repo() -> Repo {
        Arc::new(InMemoryTodoRepository::with_todos([Todo::with_id(
            5,
            "todo title",
            false,
            5,
        )]))
    }

    #[test]
    fn require_body_rejects_null() {
        let err = require_body::<TodoPatch>(Ok(Json(None))).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn get_todo_maps_missing_id_to_not_found() {
        let err = get_todo(State(repo()), Ok(Path(22))).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(22)));
    }

    #[tokio::test]
    async fn get_todo_maps_negative_id_to_not_found() {
        let err = get_todo(State(repo()), Ok(Path(-1))).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(-1)));
    }

    #[tokio::test]
    async fn update_todo_with_null_body_leaves_store_untouched() {
        let repo = repo();
        let err = update_todo(State(repo.clone()), Ok(Path(5)), Ok(Json(None)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(
            repo.find_by_id(5).await,
            Some(Todo::with_id(5, "todo title", false, 5))
        );
    }

    #[tokio::test]
    async fn delete_todo_answers_ok_then_not_found() {
        let repo = repo();
        assert_eq!(
            delete_todo(State(repo.clone()), Ok(Path(5))).await.unwrap(),
            StatusCode::OK
        );
        let err = delete_todo(State(repo), Ok(Path(5))).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(5)));
    }
}
