mod todo;

pub use todo::*;
use utoipa::OpenApi;

/// Schemas for every DTO exposed on the API, merged into the generated OpenAPI document
#[derive(OpenApi)]
#[openapi(components(schemas(TodoItem, NewTodo, UpdateTodo)))]
pub struct OpenApiSchemas;
