use crate::domain::todo::driven_ports::TodoStore;
use axum::Router;
use axum::extract::State;
use std::sync::Arc;

pub mod api;
pub mod app_env;
pub mod domain;
pub mod dto;
pub mod logging;
pub mod persistence;
mod routing_utils;

/// Data shared by every request handler
pub struct SharedData<S> {
    pub todo_store: S,
}

/// Axum extractor for the shared application state
pub type AppState<S> = State<Arc<SharedData<S>>>;

/// Assembles the full HTTP application on top of the given todo store: the todo API under
/// [api::todo::TODO_BASE_PATH], the swagger UI, CORS, and request tracing.
pub fn build_app<S>(todo_store: S) -> Router
where
    S: TodoStore + Send + Sync + 'static,
{
    let shared_data = Arc::new(SharedData { todo_store });

    let router = Router::new()
        .nest(api::todo::TODO_BASE_PATH, api::todo::todo_routes::<S>())
        .merge(api::swagger_main::build_documentation())
        .layer(api::cors_layer())
        .with_state(shared_data);

    logging::attach_tracing_http(router)
}
