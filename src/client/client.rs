use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::{error::ApiError, health::HealthApi, pantry::PantryApi, recipes::RecipeApi};
use crate::config::ClientConfig;

const JSON: &str = "application/json";

/// HTTP client core for the meal planner API.
///
/// Holds the immutable configuration and a pooled `reqwest::Client`. Cloning
/// is cheap and clones share the connection pool. Every verb goes through the
/// same response handling, so a call either yields the decoded body or an
/// [`ApiError`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    client: Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            ApiError::transport(&e)
        })?;
        Ok(Self { config, client })
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::new(ClientConfig::new(base_url))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn pantry(&self) -> PantryApi<'_> {
        PantryApi::new(self)
    }

    pub fn recipes(&self) -> RecipeApi<'_> {
        RecipeApi::new(self)
    }

    pub fn health(&self) -> HealthApi<'_> {
        HealthApi::new(self)
    }

    /// Absolute URL for `endpoint`, with every parameter that has a non-empty
    /// value appended as a percent-encoded query pair.
    pub fn url_for(&self, endpoint: &str, params: &[(&str, Option<String>)]) -> String {
        let mut url = format!("{}{}", self.config.base_url(), endpoint);

        let pairs: Vec<String> = params
            .iter()
            .filter_map(|(key, value)| match value.as_deref() {
                Some(v) if !v.is_empty() => Some(format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(v)
                )),
                _ => None,
            })
            .collect();

        if !pairs.is_empty() {
            url.push('?');
            url.push_str(&pairs.join("&"));
        }
        url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<T, ApiError> {
        let url = self.url_for(endpoint, params);
        self.send(Method::GET, self.client.get(&url), &url).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url_for(endpoint, &[]);
        let request = with_json_body(self.client.post(&url), body)?;
        self.send(Method::POST, request, &url).await
    }

    /// Full replacement: `body` must carry every field of the resource.
    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url_for(endpoint, &[]);
        let request = with_json_body(self.client.put(&url), body)?;
        self.send(Method::PUT, request, &url).await
    }

    pub async fn del<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.url_for(endpoint, &[]);
        self.send(Method::DELETE, self.client.delete(&url), &url).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, ApiError> {
        tracing::debug!("Making {} request to: {}", method, url);

        let response = request.send().await.map_err(|e| {
            tracing::error!("Network error on {} {}: {}", method, url, e);
            ApiError::transport(&e)
        })?;

        tracing::debug!("{} {} responded with status {}", method, url, response.status());
        handle_response(response).await
    }
}

fn with_json_body<B: Serialize + ?Sized>(
    request: RequestBuilder,
    body: &B,
) -> Result<RequestBuilder, ApiError> {
    let payload = serde_json::to_vec(body).map_err(|e| {
        tracing::error!("Failed to serialize request body: {}", e);
        ApiError::unknown(format!("Failed to serialize request body: {}", e))
    })?;
    Ok(request.header(CONTENT_TYPE, JSON).body(payload))
}

/// Translate a response into the decoded body or a structured error.
///
/// Non-2xx responses become an [`ApiError`] built from the error body. A 204
/// is never read: it decodes as the empty value, which suits `()` and
/// `Option<_>` targets. Anything else is parsed as JSON into `T`.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        let err = ApiError::from_response_body(status, &body);
        tracing::warn!(
            status = err.status,
            code = %err.code,
            trace_id = ?err.trace_id,
            "Request failed: {}",
            err.message
        );
        return Err(err);
    }

    if status == StatusCode::NO_CONTENT {
        return serde_json::from_value(serde_json::Value::Null)
            .map_err(|e| ApiError::decode(status, &e));
    }

    let body = response.bytes().await.map_err(|e| {
        tracing::error!("Failed to read response body: {}", e);
        ApiError::transport(&e)
    })?;

    serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Failed to parse response with status {}: {}", status, e);
        ApiError::decode(status, &e)
    })
}
