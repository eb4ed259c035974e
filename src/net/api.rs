//! REST API client for the marketplace backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. Server-side (SSR):
//! stubs returning the network-failure variant, since these endpoints are
//! only meaningful in the browser.
//!
//! Every call collapses into the same result shape: `Ok` with the decoded
//! JSON body, or an [`ApiError`] carrying a human-readable message and, for
//! rejected requests, the HTTP status. HTTP-level failures never panic and
//! never surface as anything other than the error variant.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::Value;

use crate::net::types::{ProfileUpdate, SignupData};

/// Base API URL, fixed at build time (`PNP_API_URL`), trailing slashes
/// stripped.
pub fn api_base() -> &'static str {
    option_env!("PNP_API_URL")
        .unwrap_or("http://localhost:8080")
        .trim_end_matches('/')
}

/// Join the base URL with a server-relative path like `/api/auth/login`.
pub fn url(path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", api_base(), path)
    } else {
        format!("{}/{}", api_base(), path)
    }
}

/// Normalize an `Authorization` value: raw tokens get a `Bearer ` prefix,
/// already-prefixed tokens pass through.
pub fn bearer(token: &str) -> String {
    if token.starts_with("Bearer ") {
        token.to_owned()
    } else {
        format!("Bearer {token}")
    }
}

/// Make backend file paths like `/files/profile-pics/x.png` absolute so the
/// browser can resolve them. Absolute, protocol-relative, and `data:` URLs
/// pass through unchanged.
pub fn make_absolute_file_url(path_or_url: &str) -> String {
    if path_or_url.is_empty() {
        return String::new();
    }
    let lower = path_or_url.to_ascii_lowercase();
    if lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("//")
        || lower.starts_with("data:")
    {
        return path_or_url.to_owned();
    }
    if path_or_url.starts_with('/') {
        format!("{}{}", api_base(), path_or_url)
    } else {
        format!("{}/{}", api_base(), path_or_url)
    }
}

/// Failure shape shared by every API call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Transport failure: no response reached the server, so no status.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Collapse an HTTP response into the uniform result shape.
///
/// A 2xx body that fails to parse as JSON is still a success with empty
/// data. A non-2xx body contributes its `message` or `error` field (or a
/// plain string body) to the error message, else a generic phrase.
pub fn normalize_response(status: u16, ok: bool, body: &str) -> ApiResult<Value> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    if ok {
        return Ok(parsed.unwrap_or(Value::Null));
    }
    let message = parsed
        .as_ref()
        .and_then(extract_error_message)
        .unwrap_or_else(|| "Request failed".to_owned());
    Err(ApiError::Rejected { status, message })
}

fn extract_error_message(body: &Value) -> Option<String> {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return Some(message.to_owned());
    }
    if let Some(message) = body.get("error").and_then(Value::as_str) {
        return Some(message.to_owned());
    }
    body.as_str().map(str::to_owned)
}

/// File handle for avatar uploads. In the browser this is the DOM `File`
/// picked from an `<input type="file">`; the native build uses an in-memory
/// stand-in so session logic stays testable off-WASM.
#[cfg(feature = "hydrate")]
pub type AvatarFile = web_sys::File;

/// Native stand-in for the DOM `File` used in avatar uploads.
#[cfg(not(feature = "hydrate"))]
#[derive(Clone, Debug, Default)]
pub struct AvatarFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// REST surface consumed by the session state machine.
///
/// Implemented by [`HttpApi`] in the browser and by mock apis in tests, so
/// the state machine never touches `gloo-net` directly.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// `POST /api/auth/login` with `{ email, password }`.
    async fn login(&self, email: &str, password: &str) -> ApiResult<Value>;
    /// `POST /api/auth/register`.
    async fn register(&self, data: &SignupData) -> ApiResult<Value>;
    /// `GET /api/users/me` with a bearer token.
    async fn get_current_user(&self, token: &str) -> ApiResult<Value>;
    /// `PUT /api/users/me` with only the provided fields.
    async fn update_profile(&self, updates: &ProfileUpdate, token: &str) -> ApiResult<Value>;
    /// `POST /api/users/me/profile-picture`, multipart field `file`.
    async fn upload_profile_picture(&self, file: &AvatarFile, token: &str) -> ApiResult<Value>;
}

/// Live HTTP implementation backed by `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpApi;

#[cfg(feature = "hydrate")]
fn network(err: impl std::fmt::Display) -> ApiError {
    ApiError::Network(err.to_string())
}

#[cfg(feature = "hydrate")]
async fn read_response(resp: gloo_net::http::Response) -> ApiResult<Value> {
    let status = resp.status();
    let ok = resp.ok();
    let body = resp.text().await.unwrap_or_default();
    normalize_response(status, ok, &body)
}

#[cfg(feature = "hydrate")]
impl AuthApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> ApiResult<Value> {
        let resp = gloo_net::http::Request::post(&url("/api/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_response(resp).await
    }

    async fn register(&self, data: &SignupData) -> ApiResult<Value> {
        let resp = gloo_net::http::Request::post(&url("/api/auth/register"))
            .json(data)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_response(resp).await
    }

    async fn get_current_user(&self, token: &str) -> ApiResult<Value> {
        let resp = gloo_net::http::Request::get(&url("/api/users/me"))
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(network)?;
        read_response(resp).await
    }

    async fn update_profile(&self, updates: &ProfileUpdate, token: &str) -> ApiResult<Value> {
        let resp = gloo_net::http::Request::put(&url("/api/users/me"))
            .header("Authorization", &bearer(token))
            .json(updates)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_response(resp).await
    }

    async fn upload_profile_picture(&self, file: &AvatarFile, token: &str) -> ApiResult<Value> {
        let form = web_sys::FormData::new()
            .map_err(|_| ApiError::Network("form construction failed".to_owned()))?;
        // The field name must be "file"; content type is set by the browser
        // with the multipart boundary.
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(|_| ApiError::Network("form append failed".to_owned()))?;
        let resp = gloo_net::http::Request::post(&url("/api/users/me/profile-picture"))
            .header("Authorization", &bearer(token))
            .body(form)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_response(resp).await
    }
}

#[cfg(not(feature = "hydrate"))]
impl AuthApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> ApiResult<Value> {
        let _ = (email, password);
        Err(ApiError::Network("not available on server".to_owned()))
    }

    async fn register(&self, data: &SignupData) -> ApiResult<Value> {
        let _ = data;
        Err(ApiError::Network("not available on server".to_owned()))
    }

    async fn get_current_user(&self, token: &str) -> ApiResult<Value> {
        let _ = token;
        Err(ApiError::Network("not available on server".to_owned()))
    }

    async fn update_profile(&self, updates: &ProfileUpdate, token: &str) -> ApiResult<Value> {
        let _ = (updates, token);
        Err(ApiError::Network("not available on server".to_owned()))
    }

    async fn upload_profile_picture(&self, file: &AvatarFile, token: &str) -> ApiResult<Value> {
        let _ = (file, token);
        Err(ApiError::Network("not available on server".to_owned()))
    }
}
