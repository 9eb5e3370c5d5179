//! REST API Client
//!
//! Thin wrappers over the backend, organized by domain. Every resource
//! follows the same contract:
//!
//! - `GET    {base}/<resource>`      array or `{ "results": [...] }`
//! - `GET    {base}/<resource>/<id>` single item
//! - `POST   {base}/<resource>`      created item
//! - `PUT    {base}/<resource>/<id>` changed fields in, updated item out
//! - `DELETE {base}/<resource>/<id>` any 2xx is success

mod account;
mod catalog;
mod orders;
mod people;
mod products;

use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::logging::{log, warn};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::app_config;
use crate::error::ApiError;
use crate::list::{Id, Record};
use crate::session;

pub use account::*;
pub use catalog::*;
pub use orders::*;
pub use people::*;
pub use products::*;

/// A backend collection reachable at `{base}/{PATH}`
pub trait Resource: Record + DeserializeOwned + 'static {
    const PATH: &'static str;
}

/// List responses come either bare or wrapped
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { results: Vec<T> },
}

pub fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ApiError> {
    match serde_json::from_str::<ListEnvelope<T>>(body) {
        Ok(ListEnvelope::Bare(items)) | Ok(ListEnvelope::Wrapped { results: items }) => Ok(items),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

pub fn decode_one<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

pub fn search_path(path: &str, query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?search={}", path, utf8_percent_encode(query, NON_ALPHANUMERIC))
    }
}

pub fn item_path(path: &str, id: Id) -> String {
    format!("{}/{}", path, id)
}

// ========================
// Transport
// ========================

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match session::auth_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn send(request: Request, url: &str) -> Result<Response, ApiError> {
    let response = request.send().await.map_err(|e| {
        warn!("[API] {} failed: {}", url, e);
        ApiError::Network(e.to_string())
    })?;
    if !response.ok() {
        warn!("[API] {} returned {}", url, response.status());
        return Err(ApiError::Status { code: response.status(), url: url.to_string() });
    }
    Ok(response)
}

async fn body_text(response: Response) -> Result<String, ApiError> {
    response.text().await.map_err(|e| ApiError::Decode(e.to_string()))
}

pub(crate) async fn get_text(path: &str) -> Result<String, ApiError> {
    let url = app_config().endpoint(path);
    log!("[API] GET {}", url);
    let request = authorized(Request::get(&url)).build().map_err(|e| ApiError::Network(e.to_string()))?;
    body_text(send(request, &url).await?).await
}

pub(crate) async fn send_json<B: Serialize + ?Sized>(
    method: Method,
    path: &str,
    body: &B,
) -> Result<String, ApiError> {
    let url = app_config().endpoint(path);
    log!("[API] {} {}", method.as_str(), url);
    let builder = match method {
        Method::Post => Request::post(&url),
        Method::Put => Request::put(&url),
    };
    let request = authorized(builder).json(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    body_text(send(request, &url).await?).await
}

pub(crate) async fn delete_path(path: &str) -> Result<(), ApiError> {
    let url = app_config().endpoint(path);
    log!("[API] DELETE {}", url);
    let request = authorized(Request::delete(&url)).build().map_err(|e| ApiError::Network(e.to_string()))?;
    send(request, &url).await.map(|_| ())
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Method {
    Post,
    Put,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

// ========================
// Generic resource calls
// ========================

pub async fn list<R: Resource>() -> Result<Vec<R>, ApiError> {
    decode_list(&get_text(R::PATH).await?)
}

pub async fn search<R: Resource>(query: &str) -> Result<Vec<R>, ApiError> {
    decode_list(&get_text(&search_path(R::PATH, query)).await?)
}

pub async fn fetch<R: Resource>(id: Id) -> Result<R, ApiError> {
    decode_one(&get_text(&item_path(R::PATH, id)).await?)
}

pub async fn create<R: Resource, B: Serialize + ?Sized>(body: &B) -> Result<R, ApiError> {
    decode_one(&send_json(Method::Post, R::PATH, body).await?)
}

pub async fn update<R: Resource, B: Serialize + ?Sized>(id: Id, changes: &B) -> Result<R, ApiError> {
    decode_one(&send_json(Method::Put, &item_path(R::PATH, id), changes).await?)
}

pub async fn remove<R: Resource>(id: Id) -> Result<(), ApiError> {
    delete_path(&item_path(R::PATH, id)).await
}

/// `Some(new)` when the field changed, so untouched fields stay out of the PUT body
pub(crate) fn changed<T: PartialEq + Clone>(before: &T, after: &T) -> Option<T> {
    (before != after).then(|| after.clone())
}
