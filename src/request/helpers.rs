// Request helpers.
// Builds headers from stored credentials and assembles timestamped payloads.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::storage::{KeyValueStore, Storage};
use crate::util::format::json_to_text;

use super::types::RequestConfig;

/// Storage key holding the login token sent as `Authorization`.
pub const TOKEN_KEY: &str = "brp_token";

/// Query/body field carrying the cache-busting timestamp.
pub const TIMESTAMP_FIELD: &str = "_t";

/// Headers for a request: the stored token, if any, and the content type.
pub async fn request_headers<S: KeyValueStore>(
    storage: &Storage<S>,
    config: &RequestConfig,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(token) = storage.get(TOKEN_KEY).await?.filter(|t| !t.is_empty()) {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&token)?);
    }
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static(config.content_type.unwrap_or_default().header_value()),
    );

    Ok(headers)
}

/// `{ "_t": now_millis, ...data }`; fields in `data` win over the timestamp.
pub fn request_payload(data: Option<&Map<String, Value>>, now_millis: i64) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert(TIMESTAMP_FIELD.to_string(), Value::from(now_millis));
    if let Some(data) = data {
        for (key, value) in data {
            payload.insert(key.clone(), value.clone());
        }
    }
    payload
}

/// Flatten a payload into string pairs for query strings and form bodies.
/// Nested objects are sent as JSON text; `null` becomes an empty value.
pub fn query_pairs(payload: &Map<String, Value>) -> Vec<(String, String)> {
    payload
        .iter()
        .map(|(key, value)| {
            let text = match value {
                Value::Object(_) => value.to_string(),
                other => json_to_text(other),
            };
            (key.clone(), text)
        })
        .collect()
}
