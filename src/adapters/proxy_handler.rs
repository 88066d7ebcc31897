//! Forwards `/admin/*` and `/workout/*` to the persistence service
//!
//! The web console talks to its own origin; this handler relays each request
//! unchanged and hands the service's status and body back.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::config::BackendSettings;

#[derive(Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyState {
    pub fn new(backend: &BackendSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: backend.url.trim_end_matches('/').to_string(),
        }
    }

    fn target(&self, uri: &Uri) -> String {
        let path = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        format!("{}{}", self.base_url, path)
    }
}

pub async fn forward(
    State(state): State<ProxyState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let target = state.target(&uri);

    let method = match reqwest::Method::from_bytes(method.as_str().as_bytes()) {
        Ok(m) => m,
        Err(_) => return (StatusCode::METHOD_NOT_ALLOWED, "Unsupported method").into_response(),
    };

    let mut request = state.client.request(method.clone(), &target);
    if let Some(content_type) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        request = request.header(reqwest::header::CONTENT_TYPE, content_type);
    }
    if !body.is_empty() {
        request = request.body(body.to_vec());
    }

    let upstream = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Backend unreachable for {} {}: {}", method, target, e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": format!("Backend unreachable: {}", e) })),
            )
                .into_response();
        }
    };

    let status = StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to read backend response for {} {}: {}", method, target, e);
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": format!("Backend response unreadable: {}", e) })),
            )
                .into_response();
        }
    };

    tracing::debug!("{} {} -> {}", method, target, status);

    let mut response = (status, bytes.to_vec()).into_response();
    if let Some(content_type) = content_type.and_then(|ct| ct.parse::<HeaderValue>().ok()) {
        response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    response
}
