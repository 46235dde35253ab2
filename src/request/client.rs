// Backend HTTP client.
// Attaches stored credentials, timestamps every call and decodes the result envelope.

use std::sync::Arc;

use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Result, WeappError};
use crate::storage::{KeyValueStore, Storage};

use super::helpers::{query_pairs, request_headers, request_payload};
use super::types::{BackendResult, ContentType, RequestMethod, RequestParam};

/// Client for the mini-program backend.
pub struct ApiClient<S> {
    client: Client,
    api_base: String,
    storage: Arc<Storage<S>>,
}

impl<S: KeyValueStore> ApiClient<S> {
    /// Create a client; credentials are read from `storage` on every request.
    pub fn new(config: &Config, storage: Arc<Storage<S>>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(WeappError::Http)?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            storage,
        })
    }

    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    /// Absolute URL for `url`: absolute URLs pass through, paths join the API base.
    pub fn resolve_url(&self, url: &str) -> Result<String> {
        if url.starts_with("http://") || url.starts_with("https://") {
            return Ok(url.to_string());
        }
        if self.api_base.is_empty() {
            return Err(WeappError::InvalidUrl(format!(
                "{} is relative and no API base is configured",
                url
            )));
        }
        Ok(format!("{}/{}", self.api_base, url.trim_start_matches('/')))
    }

    /// Send a request and decode the backend envelope.
    ///
    /// The body is decoded whatever the HTTP status; only a body that is not a
    /// valid envelope turns into an error.
    pub async fn send<T: DeserializeOwned>(&self, param: RequestParam) -> Result<BackendResult<T>> {
        let config = param.config.unwrap_or_default();
        let method = param.method.unwrap_or_default();
        let url = self.resolve_url(&param.url)?;
        let headers = request_headers(&*self.storage, &config).await?;
        let payload = request_payload(param.data.as_ref(), Utc::now().timestamp_millis());

        debug!(method = method.as_str(), %url, "sending request");

        let mut builder = self.client.request(method.into(), &url).headers(headers);
        builder = match (method, config.content_type.unwrap_or_default()) {
            (RequestMethod::Get, _) => builder.query(&query_pairs(&payload)),
            (_, ContentType::FormUrlencoded) => builder.form(&query_pairs(&payload)),
            (_, ContentType::Text) => builder.body(Value::Object(payload).to_string()),
            (_, ContentType::Json | ContentType::FormData) => builder.json(&payload),
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                if config.use_err_msg {
                    warn!(%url, error = %e, "request failed");
                }
                return Err(WeappError::Http(e));
            }
        };

        let status = response.status();
        let body = response.bytes().await?;
        let result: BackendResult<T> = match serde_json::from_slice(&body) {
            Ok(result) => result,
            Err(_) if !status.is_success() => {
                return Err(WeappError::Other(format!(
                    "HTTP {}: {}",
                    status,
                    String::from_utf8_lossy(&body)
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if result.is_unauthorized() {
            warn!(%url, "backend reports the session has expired");
        }
        Ok(result)
    }

    /// GET with `data` sent as query parameters.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        data: Option<Map<String, Value>>,
    ) -> Result<BackendResult<T>> {
        self.send(with_data(RequestParam::new(RequestMethod::Get, url), data))
            .await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        data: Option<Map<String, Value>>,
    ) -> Result<BackendResult<T>> {
        self.send(with_data(RequestParam::new(RequestMethod::Post, url), data))
            .await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        url: &str,
        data: Option<Map<String, Value>>,
    ) -> Result<BackendResult<T>> {
        self.send(with_data(RequestParam::new(RequestMethod::Put, url), data))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        url: &str,
        data: Option<Map<String, Value>>,
    ) -> Result<BackendResult<T>> {
        self.send(with_data(RequestParam::new(RequestMethod::Delete, url), data))
            .await
    }
}

fn with_data(param: RequestParam, data: Option<Map<String, Value>>) -> RequestParam {
    match data {
        Some(data) => param.with_data(data),
        None => param,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn client(api_base: &str) -> ApiClient<MemoryStore> {
        let config = Config {
            api_base: api_base.to_string(),
            ..Config::default()
        };
        ApiClient::new(&config, Arc::new(Storage::new(MemoryStore::new()))).unwrap()
    }

    #[test]
    fn test_resolve_relative_url() {
        let c = client("https://api.example.com/");
        assert_eq!(
            c.resolve_url("/posts").unwrap(),
            "https://api.example.com/posts"
        );
        assert_eq!(
            c.resolve_url("posts/1").unwrap(),
            "https://api.example.com/posts/1"
        );
    }

    #[test]
    fn test_absolute_url_passes_through() {
        let c = client("https://api.example.com");
        assert_eq!(
            c.resolve_url("http://jsonplaceholder.typicode.com/posts").unwrap(),
            "http://jsonplaceholder.typicode.com/posts"
        );
    }

    #[test]
    fn test_relative_url_without_base() {
        let c = client("");
        assert!(matches!(
            c.resolve_url("/posts"),
            Err(WeappError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_send_rejects_unresolvable_url() {
        let c = client("");
        let result: Result<BackendResult<Value>> = c.get("/posts", None).await;
        assert!(matches!(result, Err(WeappError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_storage_is_shared() {
        let storage = Arc::new(Storage::new(MemoryStore::new()));
        let c = ApiClient::new(&Config::default(), Arc::clone(&storage)).unwrap();

        storage.set("brp_token", "t").await.unwrap();
        assert_eq!(c.storage().get("brp_token").await.unwrap(), Some("t".to_string()));
    }
}
