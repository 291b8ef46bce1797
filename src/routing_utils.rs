use crate::domain::todo::driving_ports::TodoError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_macros::{FromRequest, FromRequestParts};
use serde::Serialize;
use tracing::{error, info};

/// Wrapper for [axum::Json] which answers unreadable bodies, or bodies sent without a JSON
/// content type, with a bare 400
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(BadRequestResponse))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Wrapper for [axum::extract::Path] which answers unparseable path segments with a bare 400
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(BadRequestResponse))]
pub struct Path<T>(pub T);

/// Wrapper for [axum::extract::Query] which answers missing or malformed query parameters
/// with a bare 400
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(BadRequestResponse))]
pub struct Query<T>(pub T);

/// Response type for requests whose input could not be read
pub struct BadRequestResponse {
    problem: String,
}

impl From<JsonRejection> for BadRequestResponse {
    fn from(value: JsonRejection) -> Self {
        BadRequestResponse {
            problem: value.body_text(),
        }
    }
}

impl From<PathRejection> for BadRequestResponse {
    fn from(value: PathRejection) -> Self {
        BadRequestResponse {
            problem: value.body_text(),
        }
    }
}

impl From<QueryRejection> for BadRequestResponse {
    fn from(value: QueryRejection) -> Self {
        BadRequestResponse {
            problem: value.body_text(),
        }
    }
}

impl IntoResponse for BadRequestResponse {
    fn into_response(self) -> Response {
        info!("Rejected malformed request: {}", self.problem);
        StatusCode::BAD_REQUEST.into_response()
    }
}

/// Response type for requests naming an entity that does not exist
pub struct NotFoundResponse;

impl IntoResponse for NotFoundResponse {
    fn into_response(self) -> Response {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Response type that wraps unexpected failures and turns them into a bare 500. The cause
/// only goes to the logs.
pub struct GenericErrorResponse(pub anyhow::Error);

impl IntoResponse for GenericErrorResponse {
    fn into_response(self) -> Response {
        error!("Request failed: {:#}", self.0);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

/// Response type that wraps [TodoError]s from the domain
pub struct TodoErrorResponse(TodoError);

impl From<TodoError> for TodoErrorResponse {
    fn from(value: TodoError) -> Self {
        Self(value)
    }
}

impl IntoResponse for TodoErrorResponse {
    fn into_response(self) -> Response {
        match self.0 {
            TodoError::TodoDoesNotExist(todo_id) => {
                info!("Todo {todo_id} was not found");
                NotFoundResponse.into_response()
            }
            TodoError::PortError(cause) => GenericErrorResponse(cause).into_response(),
        }
    }
}
