pub mod swagger_main;
pub mod todo;

#[cfg(test)]
mod test_util;

use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};

/// Lets browser clients on any origin call the API with the methods it serves. `Location`
/// is exposed so cross-origin callers can read where a created todo lives.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .expose_headers([header::LOCATION])
}
