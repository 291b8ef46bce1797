use crate::domain;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// DTO for a todo item returned on the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, PartialEq, Eq, Debug))]
pub struct TodoItem {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Buy milk")]
    pub title: String,
    #[schema(example = false)]
    pub completed: bool,
}

impl From<domain::todo::TodoItem> for TodoItem {
    fn from(value: domain::todo::TodoItem) -> Self {
        TodoItem {
            id: value.id,
            title: value.title,
            completed: value.completed,
        }
    }
}

/// DTO for creating a todo via the API. An `id` sent by the client is ignored, the
/// server always assigns one.
#[derive(Deserialize, Display, ToSchema)]
#[display("{:?} (completed: {})", title, completed)]
#[cfg_attr(test, derive(Serialize, Debug))]
pub struct NewTodo {
    #[schema(example = "Buy milk")]
    pub title: String,
    #[serde(default)]
    #[schema(default = false)]
    pub completed: bool,
}

impl From<NewTodo> for domain::todo::NewTodo {
    fn from(value: NewTodo) -> Self {
        domain::todo::NewTodo {
            title: value.title,
            completed: value.completed,
        }
    }
}

/// DTO for replacing a todo's content via the API. Both fields are required.
#[derive(Debug, Deserialize, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct UpdateTodo {
    #[schema(example = "Buy oat milk")]
    pub title: String,
    #[schema(example = true)]
    pub completed: bool,
}

impl From<UpdateTodo> for domain::todo::UpdateTodo {
    fn from(value: UpdateTodo) -> Self {
        domain::todo::UpdateTodo {
            title: value.title,
            completed: value.completed,
        }
    }
}

/// Query string for searching todos by title
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Text to look for in todo titles, ignoring case
    pub keyword: String,
}
