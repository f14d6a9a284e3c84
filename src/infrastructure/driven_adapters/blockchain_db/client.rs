//! Blockchain Database HTTP Client
//!
//! Transport for the blockchain database REST API. Issues requests, checks the
//! status against the set accepted for the method, and decodes the body
//! according to the expected response shape. Every failure is classified
//! into a `QueryError`.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Method, Url};
use serde_json::{Map, Value};

use crate::infrastructure::driven_adapters::config::{ApiToken, BlockchainDbConfig};
use crate::shared::errors::QueryError;

/// Expected shape of a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// A JSON object
    Object,
    /// A HAL collection: the array at `_embedded.<key>`, continuation at `_links.next.href`
    Embedded(&'static str),
    /// A JSON array at the root
    RootArray,
    /// Body is ignored
    Empty,
}

/// Decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Object(Map<String, Value>),
    Array { items: Vec<Value>, next: Option<String> },
    Empty,
}

/// Status codes treated as success for each method
#[must_use]
pub fn accepted_statuses(method: &Method) -> &'static [u16] {
    if *method == Method::POST {
        &[200, 201, 202]
    } else if *method == Method::PUT {
        &[200, 201, 204]
    } else if *method == Method::DELETE {
        &[200, 202, 204]
    } else {
        &[200]
    }
}

/// Decode a successful response body into the expected shape
///
/// # Errors
///
/// Returns `QueryError::NoData` for an empty body, `QueryError::JsonParse` for
/// malformed JSON and `QueryError::Model` when the JSON has the wrong shape.
pub fn decode(shape: ResponseShape, body: &str) -> Result<Payload, QueryError> {
    if shape == ResponseShape::Empty {
        return Ok(Payload::Empty);
    }
    if body.trim().is_empty() {
        return Err(QueryError::NoData);
    }

    let value: Value = serde_json::from_str(body).map_err(|e| QueryError::JsonParse(e.to_string()))?;

    match (shape, value) {
        (ResponseShape::Object, Value::Object(object)) => Ok(Payload::Object(object)),
        (ResponseShape::Object, _) => Err(QueryError::Model("object expected".to_string())),
        (ResponseShape::RootArray, Value::Array(items)) => Ok(Payload::Array { items, next: None }),
        (ResponseShape::RootArray, _) => Err(QueryError::Model("array expected".to_string())),
        (ResponseShape::Embedded(key), Value::Object(mut object)) => {
            let next = object
                .get("_links")
                .and_then(|links| links.get("next"))
                .and_then(|next| next.get("href"))
                .and_then(Value::as_str)
                .map(str::to_string);

            let items = match object.remove("_embedded") {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Object(mut embedded)) => match embedded.remove(key) {
                    None | Some(Value::Null) => Vec::new(),
                    Some(Value::Array(items)) => items,
                    Some(_) => return Err(QueryError::Model(format!("'{key}' array expected"))),
                },
                Some(_) => return Err(QueryError::Model("'_embedded' object expected".to_string())),
            };

            Ok(Payload::Array { items, next })
        }
        (ResponseShape::Embedded(_), _) => Err(QueryError::Model("object expected".to_string())),
        (ResponseShape::Empty, _) => Ok(Payload::Empty),
    }
}

/// HTTP client for the blockchain database
#[derive(Debug, Clone)]
pub struct BlockchainDbClient {
    http: reqwest::Client,
    base_url: Url,
    api_token: Option<ApiToken>,
}

impl BlockchainDbClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Submission` if the base URL is invalid or the
    /// HTTP client cannot be built.
    pub fn from_config(config: &BlockchainDbConfig) -> Result<Self, QueryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| QueryError::Submission(format!("failed to build HTTP client: {e}")))?;

        Self::new(http, &config.base_url, config.api_token.clone())
    }

    /// Create a client around an existing `reqwest::Client`
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Submission` if `base_url` cannot be parsed.
    pub fn new(http: reqwest::Client, base_url: &str, api_token: Option<ApiToken>) -> Result<Self, QueryError> {
        let base_url =
            Url::parse(base_url).map_err(|e| QueryError::Submission(format!("invalid base url '{base_url}': {e}")))?;
        Ok(Self {
            http,
            base_url,
            api_token,
        })
    }

    /// Issue a request built from path segments and query parameters
    ///
    /// # Errors
    ///
    /// Returns the classified `QueryError` on any failure.
    pub async fn issue(
        &self,
        method: Method,
        path_segments: &[&str],
        params: &[(&str, String)],
        body: Option<&Value>,
        shape: ResponseShape,
    ) -> Result<Payload, QueryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| QueryError::Submission(format!("base url '{}' cannot have a path", self.base_url)))?
            .pop_if_empty()
            .extend(path_segments);
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(key, value)| (*key, value.as_str())));
        }

        self.send(method, url, body, shape).await
    }

    /// Issue a GET to an absolute URL, such as a pagination continuation
    ///
    /// The URL must share the scheme, host and port of the base URL; the
    /// bearer token is never sent anywhere else.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Model` if `url` is not a valid URL or points to a
    /// foreign origin, otherwise the classified `QueryError` on any failure.
    pub async fn issue_url(&self, url: &str, shape: ResponseShape) -> Result<Payload, QueryError> {
        let url = self.continuation_url(url)?;
        self.send(Method::GET, url, None, shape).await
    }

    fn continuation_url(&self, url: &str) -> Result<Url, QueryError> {
        let parsed = Url::parse(url).map_err(|e| QueryError::Model(format!("invalid continuation url '{url}': {e}")))?;
        if parsed.origin() != self.base_url.origin() {
            tracing::warn!(url = %parsed, base_url = %self.base_url, "Refusing continuation to foreign origin");
            return Err(QueryError::Model(format!("continuation url '{url}' leaves the blockchain database")));
        }
        Ok(parsed)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
        shape: ResponseShape,
    ) -> Result<Payload, QueryError> {
        tracing::debug!(method = %method, url = %url, "Sending blockchain database request");

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token.expose());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(method = %method, url = %url, error = %e, "Request submission failed");
            QueryError::Submission(e.to_string())
        })?;

        let status = response.status().as_u16();
        if !accepted_statuses(&method).contains(&status) {
            tracing::error!(method = %method, url = %url, status, "Request failed with status");
            return Err(QueryError::Response(status));
        }

        let text = response.text().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "Failed reading response body");
            QueryError::Submission(e.to_string())
        })?;

        decode(shape, &text).inspect_err(|error| {
            tracing::error!(url = %url, kind = error.kind(), error = %error, "Failed decoding response");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_statuses_per_method() {
        assert_eq!(accepted_statuses(&Method::GET), [200].as_slice());
        assert!(accepted_statuses(&Method::POST).contains(&201));
        assert!(!accepted_statuses(&Method::GET).contains(&201));
    }

    #[test]
    fn test_decode_embedded_with_next() {
        let body = r#"{
            "_embedded": {"transactions": [{"id": 1}, {"id": 2}]},
            "_links": {"next": {"href": "https://example.com/transactions?cursor=abc"}}
        }"#;

        let payload = decode(ResponseShape::Embedded("transactions"), body).unwrap();

        match payload {
            Payload::Array { items, next } => {
                assert_eq!(items.len(), 2);
                assert_eq!(next.as_deref(), Some("https://example.com/transactions?cursor=abc"));
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_decode_embedded_missing_is_empty() {
        let payload = decode(ResponseShape::Embedded("currencies"), r#"{"_links": {}}"#).unwrap();
        assert_eq!(payload, Payload::Array { items: vec![], next: None });
    }

    #[test]
    fn test_decode_embedded_wrong_type_is_model_error() {
        let result = decode(ResponseShape::Embedded("currencies"), r#"{"_embedded": {"currencies": 5}}"#);
        assert!(matches!(result, Err(QueryError::Model(_))));
    }

    #[test]
    fn test_decode_empty_body_is_no_data() {
        assert_eq!(decode(ResponseShape::Object, "  "), Err(QueryError::NoData));
    }

    #[test]
    fn test_decode_malformed_json() {
        assert!(matches!(decode(ResponseShape::Object, "{nope"), Err(QueryError::JsonParse(_))));
    }

    #[test]
    fn test_decode_shape_mismatch() {
        assert!(matches!(decode(ResponseShape::Object, "[1]"), Err(QueryError::Model(_))));
        assert!(matches!(decode(ResponseShape::RootArray, "{}"), Err(QueryError::Model(_))));
    }

    #[test]
    fn test_decode_root_array_and_empty() {
        assert_eq!(
            decode(ResponseShape::RootArray, "[1, 2]").unwrap(),
            Payload::Array {
                items: vec![Value::from(1), Value::from(2)],
                next: None
            }
        );
        assert_eq!(decode(ResponseShape::Empty, "").unwrap(), Payload::Empty);
    }

    #[test]
    fn test_continuation_url_must_share_origin() {
        let client = BlockchainDbClient::new(reqwest::Client::new(), "https://bdb.example.com/api", None).unwrap();

        assert!(client
            .continuation_url("https://bdb.example.com/api/transactions?cursor=2")
            .is_ok());
        for foreign in [
            "https://evil.example.com/api/transactions",
            "http://bdb.example.com/api/transactions",
            "https://bdb.example.com:8443/api/transactions",
        ] {
            assert!(matches!(client.continuation_url(foreign), Err(QueryError::Model(_))), "{foreign}");
        }
        assert!(matches!(client.continuation_url("/relative"), Err(QueryError::Model(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = BlockchainDbClient::new(reqwest::Client::new(), "not a url", None);
        assert!(matches!(result, Err(QueryError::Submission(_))));
    }
}
