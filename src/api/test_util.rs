use axum::body;
use serde::de::DeserializeOwned;

/// Reads the whole response body. Will panic and fail the test if the body can't be read.
pub async fn body_bytes(response_body: body::Body) -> Vec<u8> {
    body::to_bytes(response_body, usize::MAX)
        .await
        .expect("Could not read data from response body!")
        .to_vec()
}

/// Used in tests to both extract the raw bytes from the HTTP response body and then deserialize them into the
/// requested type. Will panic and fail the test if either step fails somehow.
pub async fn deserialize_body<T: DeserializeOwned>(response_body: body::Body) -> T {
    let bytes = body_bytes(response_body).await;

    serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        panic!(
            "Could not parse body content into data structure! Error: {}, Received body: {:?}",
            err,
            String::from_utf8_lossy(&bytes)
        )
    })
}
