//! Backend API
//!
//! Request helper over `window.fetch` plus bindings to backend endpoints,
//! organized by domain.

mod item;
mod suggest;
mod template;
mod upload;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, Response};

use crate::error::ApiError;

// Re-export all public items
pub use item::*;
pub use suggest::*;
pub use template::*;
pub use upload::*;

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// GET and HEAD never carry a body
    pub fn allows_body(&self) -> bool {
        !matches!(self, Method::Get | Method::Head)
    }
}

/// Resolve a root-relative path against the page origin
pub fn resolve_url(origin: &str, url: &str) -> String {
    if url.starts_with('/') && !url.starts_with("//") {
        format!("{}{}", origin.trim_end_matches('/'), url)
    } else {
        url.to_string()
    }
}

/// Response shape shared by all write endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl<T> ApiEnvelope<T> {
    /// Collapse into the result, turning any reported error into `Rejected`
    pub fn into_result(self) -> Result<T, ApiError> {
        let failed = self.success == Some(false) || self.error.is_some() || !self.errors.is_empty();
        if failed {
            return Err(ApiError::Rejected {
                message: self.error.unwrap_or_else(|| "Request was rejected".to_string()),
                field_errors: self.errors,
            });
        }
        self.result
            .ok_or_else(|| ApiError::Malformed("response has no result".to_string()))
    }

    /// Like `into_result` for endpoints whose success carries no payload
    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.success == Some(false) || self.error.is_some() || !self.errors.is_empty() {
            return Err(ApiError::Rejected {
                message: self.error.unwrap_or_else(|| "Request was rejected".to_string()),
                field_errors: self.errors,
            });
        }
        Ok(())
    }
}

/// Map a finished response onto the error contract.
///
/// `body` is `None` when the response text was not JSON.
pub fn interpret<T: DeserializeOwned>(
    status: u16,
    status_text: &str,
    body: Option<serde_json::Value>,
) -> Result<T, ApiError> {
    let ok = (200..300).contains(&status);
    match (ok, body) {
        (true, Some(json)) => serde_json::from_value(json).map_err(|e| ApiError::Malformed(e.to_string())),
        (true, None) => Err(ApiError::Decode {
            status,
            status_text: status_text.to_string(),
        }),
        (false, Some(json)) => {
            let rejected = serde_json::from_value::<ApiEnvelope<serde_json::Value>>(json)
                .ok()
                .filter(|env| env.error.is_some());
            match rejected {
                Some(env) => Err(ApiError::Rejected {
                    message: env.error.unwrap_or_default(),
                    field_errors: env.errors,
                }),
                None => Err(ApiError::Status {
                    status,
                    status_text: status_text.to_string(),
                }),
            }
        }
        (false, None) => Err(ApiError::Status {
            status,
            status_text: status_text.to_string(),
        }),
    }
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

fn origin() -> Result<String, ApiError> {
    let window = web_sys::window().ok_or(ApiError::NoWindow)?;
    window.location().origin().map_err(js_error)
}

async fn send(request: Request) -> Result<Response, ApiError> {
    let window = web_sys::window().ok_or(ApiError::NoWindow)?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    value
        .dyn_into::<Response>()
        .map_err(|_| ApiError::Malformed("fetch did not return a Response".to_string()))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let status_text = response.status_text();
    let body = match response.json() {
        Ok(promise) => match JsFuture::from(promise).await {
            Ok(value) => serde_wasm_bindgen::from_value::<serde_json::Value>(value).ok(),
            Err(_) => None,
        },
        Err(_) => None,
    };
    interpret(status, &status_text, body)
}

/// Issue one JSON request. No retry, no timeout, no cancellation.
pub async fn request_json<T, B>(url: &str, method: Method, body: Option<&B>) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    let url = resolve_url(&origin()?, url);
    let init = RequestInit::new();
    init.set_method(method.as_str());
    if method.allows_body() {
        if let Some(body) = body {
            let text = serde_json::to_string(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
            init.set_body(&JsValue::from_str(&text));
        }
    }

    let request = Request::new_with_str_and_init(&url, &init).map_err(js_error)?;
    let headers = request.headers();
    headers.set("Accept", "application/json").map_err(js_error)?;
    headers.set("Content-Type", "application/json").map_err(js_error)?;

    log::debug!("{} {}", method.as_str(), url);
    let response = send(request).await?;
    read_json(response).await
}

/// GET a JSON document
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    request_json::<T, ()>(url, Method::Get, None).await
}

/// POST multipart form data, expecting a JSON answer
pub async fn request_form<T: DeserializeOwned>(url: &str, form: &FormData) -> Result<T, ApiError> {
    let url = resolve_url(&origin()?, url);
    let init = RequestInit::new();
    init.set_method(Method::Post.as_str());
    init.set_body(form.as_ref());

    let request = Request::new_with_str_and_init(&url, &init).map_err(js_error)?;
    request.headers().set("Accept", "application/json").map_err(js_error)?;

    log::debug!("POST {} (multipart)", url);
    let response = send(request).await?;
    read_json(response).await
}
