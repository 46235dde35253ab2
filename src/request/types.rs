// Request and response types.
// Methods, content types, per-request options and the backend's result envelope.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// HTTP method supported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
        }
    }
}

impl From<RequestMethod> for Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
            RequestMethod::Put => Method::PUT,
            RequestMethod::Delete => Method::DELETE,
        }
    }
}

/// Request body content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    #[default]
    Json,
    Text,
    FormUrlencoded,
    /// Multipart upload; the payload is still sent as a JSON body.
    FormData,
}

impl ContentType {
    /// Value of the `Content-Type` header.
    pub fn header_value(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json;charset=UTF-8",
            ContentType::Text => "text/plain;charset=UTF-8",
            ContentType::FormUrlencoded => "application/x-www-form-urlencoded;charset=UTF-8",
            ContentType::FormData => "multipart/form-data;charset=UTF-8",
        }
    }
}

/// Per-request options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestConfig {
    pub content_type: Option<ContentType>,
    /// Log failures for display to the user.
    #[serde(default)]
    pub use_err_msg: bool,
}

/// A request to the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParam {
    /// Absolute URL, or a path joined to the configured API base.
    pub url: String,
    pub method: Option<RequestMethod>,
    pub data: Option<Map<String, Value>>,
    pub config: Option<RequestConfig>,
}

impl RequestParam {
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Some(method),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_config(mut self, config: RequestConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Status code reported by the backend, numeric, textual or anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultCode {
    Number(i64),
    Text(String),
    Other(Value),
}

/// Envelope every backend endpoint responds with.
///
/// Every field is optional so that any JSON object decodes; only `data`
/// must match `T` when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendResult<T> {
    pub code: Option<ResultCode>,
    pub data: Option<T>,
    pub message: Option<String>,
    /// Session status; a numeric `401` means the login has lapsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
}

impl<T> BackendResult<T> {
    pub fn is_unauthorized(&self) -> bool {
        self.status.as_ref().and_then(Value::as_i64) == Some(401)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Post {
        id: u64,
        title: String,
    }

    #[test]
    fn test_deserialize_envelope() {
        let body = json!({ "code": 0, "data": { "id": 1, "title": "hi" }, "message": "ok" });
        let result: BackendResult<Post> = serde_json::from_value(body).unwrap();

        assert_eq!(result.code, Some(ResultCode::Number(0)));
        assert_eq!(
            result.data,
            Some(Post {
                id: 1,
                title: "hi".to_string()
            })
        );
        assert_eq!(result.message.as_deref(), Some("ok"));
        assert!(!result.is_unauthorized());
    }

    #[test]
    fn test_deserialize_null_message_and_text_status() {
        let body = json!({ "code": 200, "data": [1, 2], "message": null, "status": "success" });
        let result: BackendResult<Vec<u32>> = serde_json::from_value(body).unwrap();

        assert_eq!(result.data, Some(vec![1, 2]));
        assert_eq!(result.message, None);
        assert_eq!(result.status, Some(json!("success")));
        assert!(!result.is_unauthorized());
    }

    #[test]
    fn test_deserialize_unusual_code_and_empty_body() {
        let result: BackendResult<Value> =
            serde_json::from_value(json!({ "code": 1.5, "status": "401" })).unwrap();
        assert_eq!(result.code, Some(ResultCode::Other(json!(1.5))));
        // Only a numeric 401 marks the session as lapsed.
        assert!(!result.is_unauthorized());

        let empty: BackendResult<Post> = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.code, None);
        assert_eq!(empty.data, None);
        assert_eq!(empty.message, None);
    }

    #[test]
    fn test_deserialize_text_code_and_status() {
        let body = json!({ "code": "E_AUTH", "status": 401 });
        let result: BackendResult<Value> = serde_json::from_value(body).unwrap();

        assert_eq!(result.code, Some(ResultCode::Text("E_AUTH".to_string())));
        assert_eq!(result.data, None);
        assert!(result.is_unauthorized());
    }

    #[test]
    fn test_content_type_headers() {
        assert_eq!(ContentType::default().header_value(), "application/json;charset=UTF-8");
        assert_eq!(
            ContentType::FormUrlencoded.header_value(),
            "application/x-www-form-urlencoded;charset=UTF-8"
        );
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(Method::from(RequestMethod::Delete), Method::DELETE);
        assert_eq!(RequestMethod::default().as_str(), "GET");
    }
}
