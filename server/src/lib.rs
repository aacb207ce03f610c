//! REST backend for a todo list.
//!
//! # Overview
//! One resource, `Todo`, served under `/todos` with create/read/update/delete
//! handlers. Storage sits behind the `TodoRepository` trait; the shipped
//! implementation is an in-memory store.
//!
//! # Design
//! - The repository is passed in explicitly (`app_with`) and reaches the
//!   handlers as router state. `app()` wires a fresh in-memory store.
//! - Controller handlers map `None` from the repository to 404 and reject
//!   null or malformed write bodies with 400 before touching storage.
//! - Every request is logged through a `tracing` span.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod repository;
pub mod telemetry;

use std::{future::Future, sync::Arc};

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;

pub use config::ServerConfig;
pub use controller::Repo;
pub use error::ApiError;
pub use model::{NewTodo, Todo, TodoId, TodoPatch};
pub use repository::{InMemoryTodoRepository, TodoRepository};

/// Router backed by an empty in-memory store.
pub fn app() -> Router {
    app_with(Arc::new(InMemoryTodoRepository::new()))
}

pub fn app_with(repo: Repo) -> Router {
    Router::new()
        .route(
            "/todos",
            get(controller::list_todos).post(controller::create_todo),
        )
        .route(
            "/todos/{id}",
            get(controller::get_todo)
                .patch(controller::update_todo)
                .delete(controller::delete_todo),
        )
        .layer(middleware::from_fn(telemetry::log_request))
        .with_state(repo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_until(listener, app(), std::future::pending()).await
}

/// Serve `router` until `shutdown` resolves, then drain in-flight requests.
pub async fn run_until(
    listener: TcpListener,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "listening");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}
