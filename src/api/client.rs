//! HTTP client shared by every page
//!
//! All requests go through one configured base URL. Responses are
//! normalized: a non-2xx status or a `success: false` body becomes
//! [`ApiError::Rejected`], and the payload is taken from `data` when the
//! server wraps it, otherwise from the body itself.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::error::{ApiError, ApiResult};
use crate::config::ApiConfig;

/// Characters escaped when an id is placed in a path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'\\');

/// Escape a value for use as one path segment
pub fn seg(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Segments the URL parser would drop or resolve against the parent
fn is_dot_or_empty(segment: &str) -> bool {
    let lowered = segment.to_ascii_lowercase().replace("%2e", ".");
    lowered.is_empty() || lowered == "." || lowered == ".."
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token: None,
        })
    }

    /// Set the bearer token sent with every request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        let path = path.trim_start_matches('/');
        if let Some(bad) = path.split('/').find(|s| is_dot_or_empty(s)) {
            return Err(ApiError::Validation(format!(
                "Invalid id '{}' in request path",
                bad
            )));
        }
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidResponse(format!("bad endpoint {}: {}", path, e)))
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = self.url(path)?;
        debug!(%method, %url, "api request");
        let mut request = self.http.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    /// GET and decode the payload
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.send(self.request(Method::GET, path)?).await?;
        payload(body)
    }

    /// POST a JSON body and decode the payload
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = self
            .send(self.request(Method::POST, path)?.json(body))
            .await?;
        payload(body)
    }

    /// PUT a JSON body and decode the payload
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = self.send(self.request(Method::PUT, path)?.json(body)).await?;
        payload(body)
    }

    /// PUT a JSON body, returning the server's message
    pub async fn put_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<String> {
        let body = self.send(self.request(Method::PUT, path)?.json(body)).await?;
        Ok(message(&body))
    }

    /// POST a JSON body, returning the server's message
    pub async fn post_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<String> {
        let body = self
            .send(self.request(Method::POST, path)?.json(body))
            .await?;
        Ok(message(&body))
    }

    /// DELETE, returning the server's message
    pub async fn delete(&self, path: &str) -> ApiResult<String> {
        let body = self.send(self.request(Method::DELETE, path)?).await?;
        Ok(message(&body))
    }

    /// Submit a multipart form with POST or PUT, returning the server's message
    pub async fn multipart(&self, method: Method, path: &str, form: Form) -> ApiResult<String> {
        let body = self.send(self.request(method, path)?.multipart(form)).await?;
        Ok(message(&body))
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Value> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(v) => v,
                Err(_) if !status.is_success() => Value::String(text.clone()),
                Err(e) => return Err(e.into()),
            }
        };

        if !status.is_success() {
            let message = body_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
            warn!(status = status.as_u16(), %message, "api request rejected");
            return Err(ApiError::Rejected {
                status: Some(status.as_u16()),
                message,
            });
        }

        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let message = body_message(&body).unwrap_or_else(|| "Request failed".to_string());
            warn!(%message, "api reported failure");
            return Err(ApiError::Rejected {
                status: Some(status.as_u16()),
                message,
            });
        }

        Ok(body)
    }
}

fn body_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(map) => map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Message of a successful response, defaulting to "OK"
pub fn message(body: &Value) -> String {
    body_message(body).unwrap_or_else(|| "OK".to_string())
}

/// Decode the payload, unwrapping `data` when present
pub fn payload<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    let inner = match body {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or(Value::Null),
        other => other,
    };
    serde_json::from_value(inner).map_err(Into::into)
}

/// Build a multipart part from an image file on disk
pub async fn image_part(path: &Path) -> ApiResult<Part> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::File {
        path: path.display().to_string(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    let mime = image_mime(path);
    Ok(Part::bytes(bytes).file_name(file_name).mime_str(mime)?)
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
