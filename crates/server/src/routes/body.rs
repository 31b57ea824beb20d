use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::errors::JsonApiError;

/// Parse a POST body as JSON whatever the `Content-Type`. An empty body
/// stands for `{}` so every caller field is simply absent.
pub fn parse_json_body<T>(bytes: &Bytes) -> Result<T, JsonApiError>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(bytes)?)
}
