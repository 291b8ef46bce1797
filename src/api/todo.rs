use crate::domain::todo::driven_ports::TodoStore;
use crate::domain::todo::driving_ports::TodoPort;
use crate::routing_utils::{
    GenericErrorResponse, Json, NotFoundResponse, Path, Query, TodoErrorResponse,
};
use crate::{AppState, SharedData, domain, dto};
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderName, StatusCode, header};
use axum::response::ErrorResponse;
use axum::routing::get;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(list_todos, get_todo, search_todos, create_todo, update_todo, delete_todo))]
/// Defines the OpenAPI documentation for the todo API
pub struct TodoApi;
/// Constant used to group todo endpoints in OpenAPI documentation
pub const TODO_API_GROUP: &str = "Todos";

/// Path every todo route is nested under
pub const TODO_BASE_PATH: &str = "/api/todos";

/// Creates a router for the endpoints under [TODO_BASE_PATH]. Requests are served by
/// [domain::todo::TodoService] against whichever store lives in the shared state.
pub fn todo_routes<S>() -> Router<Arc<SharedData<S>>>
where
    S: TodoStore + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(|State(app_state): AppState<S>| async move {
                let todo_service = domain::todo::TodoService {};

                list_todos(&todo_service, &app_state.todo_store).await
            })
            .post(
                |State(app_state): AppState<S>, Json(new_todo): Json<dto::NewTodo>| async move {
                    let todo_service = domain::todo::TodoService {};

                    create_todo(new_todo, &todo_service, &app_state.todo_store).await
                },
            ),
        )
        .route(
            "/search",
            get(
                |State(app_state): AppState<S>, Query(params): Query<dto::SearchParams>| async move {
                    let todo_service = domain::todo::TodoService {};

                    search_todos(&params.keyword, &todo_service, &app_state.todo_store).await
                },
            ),
        )
        .route(
            "/:todo_id",
            get(
                |State(app_state): AppState<S>, Path(todo_id): Path<i64>| async move {
                    let todo_service = domain::todo::TodoService {};

                    get_todo(todo_id, &todo_service, &app_state.todo_store).await
                },
            )
            .put(
                |State(app_state): AppState<S>,
                 Path(todo_id): Path<i64>,
                 Json(update): Json<dto::UpdateTodo>| async move {
                    let todo_service = domain::todo::TodoService {};

                    update_todo(todo_id, update, &todo_service, &app_state.todo_store).await
                },
            )
            .delete(
                |State(app_state): AppState<S>, Path(todo_id): Path<i64>| async move {
                    let todo_service = domain::todo::TodoService {};

                    delete_todo(todo_id, &todo_service, &app_state.todo_store).await
                },
            ),
        )
}

#[utoipa::path(
    get,
    path = "/api/todos",
    tag = TODO_API_GROUP,
    responses(
        (status = 200, description = "Every todo item, possibly none", body = [dto::TodoItem]),
        (status = 500, description = "The todo store could not be reached"),
    ),
)]
/// Retrieves every todo item
async fn list_todos(
    todo_service: &impl TodoPort,
    todo_store: &impl TodoStore,
) -> Result<Json<Vec<dto::TodoItem>>, ErrorResponse> {
    info!("Listing all todos");
    let todos = todo_service
        .all_todos(todo_store)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Json(todos.into_iter().map(dto::TodoItem::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(
        ("todo_id" = i64, Path, description = "ID of the todo to fetch"),
    ),
    responses(
        (status = 200, description = "The requested todo item", body = dto::TodoItem),
        (status = 400, description = "The todo ID was not an integer"),
        (status = 404, description = "No todo exists with that ID"),
        (status = 500, description = "The todo store could not be reached"),
    ),
)]
/// Retrieves a single todo item
async fn get_todo(
    todo_id: i64,
    todo_service: &impl TodoPort,
    todo_store: &impl TodoStore,
) -> Result<Json<dto::TodoItem>, ErrorResponse> {
    info!("Get todo {todo_id}");
    let todo = todo_service
        .todo_by_id(todo_id, todo_store)
        .await
        .map_err(GenericErrorResponse)?;

    match todo {
        Some(todo) => Ok(Json(dto::TodoItem::from(todo))),
        None => {
            info!("Todo {todo_id} was not found");
            Err(NotFoundResponse.into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/todos/search",
    tag = TODO_API_GROUP,
    params(dto::SearchParams),
    responses(
        (status = 200, description = "Todo items whose title contains the keyword", body = [dto::TodoItem]),
        (status = 400, description = "The keyword parameter was missing"),
        (status = 500, description = "The todo store could not be reached"),
    ),
)]
/// Finds todo items whose title contains a keyword, ignoring case
async fn search_todos(
    keyword: &str,
    todo_service: &impl TodoPort,
    todo_store: &impl TodoStore,
) -> Result<Json<Vec<dto::TodoItem>>, ErrorResponse> {
    info!("Searching todos for {keyword:?}");
    let found_todos = todo_service
        .search_todos(keyword, todo_store)
        .await
        .map_err(GenericErrorResponse)?;

    Ok(Json(
        found_todos.into_iter().map(dto::TodoItem::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/todos",
    tag = TODO_API_GROUP,
    request_body = dto::NewTodo,
    responses(
        (status = 201, description = "The todo was created", body = dto::TodoItem,
            headers(("Location" = String, description = "Path of the created todo"))),
        (status = 400, description = "The request body was missing or malformed"),
        (status = 500, description = "The todo store could not be reached"),
    ),
)]
/// Creates a todo item
async fn create_todo(
    new_todo: dto::NewTodo,
    todo_service: &impl TodoPort,
    todo_store: &impl TodoStore,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<dto::TodoItem>), ErrorResponse> {
    info!("Creating todo: {new_todo}");
    let domain_todo = domain::todo::NewTodo::from(new_todo);
    let created_todo = todo_service
        .create_todo(&domain_todo, todo_store)
        .await
        .map_err(GenericErrorResponse)?;

    let location = format!("{TODO_BASE_PATH}/{}", created_todo.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(dto::TodoItem::from(created_todo)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(
        ("todo_id" = i64, Path, description = "ID of the todo to update"),
    ),
    request_body = dto::UpdateTodo,
    responses(
        (status = 200, description = "The updated todo item", body = dto::TodoItem),
        (status = 400, description = "The request body was missing, malformed, or incomplete"),
        (status = 404, description = "No todo exists with that ID"),
        (status = 500, description = "The todo store could not be reached"),
    ),
)]
/// Replaces the title and completion state of a todo item
async fn update_todo(
    todo_id: i64,
    update: dto::UpdateTodo,
    todo_service: &impl TodoPort,
    todo_store: &impl TodoStore,
) -> Result<Json<dto::TodoItem>, ErrorResponse> {
    info!("Updating todo {todo_id}");
    let domain_update = domain::todo::UpdateTodo::from(update);
    let updated_todo = todo_service
        .update_todo(todo_id, &domain_update, todo_store)
        .await
        .map_err(TodoErrorResponse::from)?;

    Ok(Json(dto::TodoItem::from(updated_todo)))
}

#[utoipa::path(
    delete,
    path = "/api/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(
        ("todo_id" = i64, Path, description = "ID of the todo to delete"),
    ),
    responses(
        (status = 200, description = "The todo was deleted"),
        (status = 404, description = "No todo exists with that ID"),
        (status = 500, description = "The todo store could not be reached"),
    ),
)]
/// Deletes a todo item
async fn delete_todo(
    todo_id: i64,
    todo_service: &impl TodoPort,
    todo_store: &impl TodoStore,
) -> Result<StatusCode, ErrorResponse> {
    info!("Deleting todo {todo_id}");
    todo_service
        .delete_todo(todo_id, todo_store)
        .await
        .map_err(TodoErrorResponse::from)?;

    Ok(StatusCode::OK)
}
