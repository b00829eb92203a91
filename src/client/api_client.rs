use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use super::resource::Resource;
use super::service::ResourceService;
use crate::config::AppConfig;
use crate::errors::ServiceError;

/// Thin JSON client over the REST API. Cloning shares the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ServiceError::InvalidInput(format!("Invalid API base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidInput(format!(
                "API base URL cannot hold paths: {}",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("maintenance-hub/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        Self::new(
            &config.api_base_url,
            config.api_token.clone(),
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Typed CRUD wrapper for one collection.
    pub fn service<R: Resource>(&self) -> ResourceService<R> {
        ResourceService::new(self.clone())
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    #[instrument(skip(self, query), fields(url))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, ServiceError> {
        let url = self.endpoint(segments);
        tracing::Span::current().record("url", url.as_str());
        let mut builder = self.request(Method::GET, url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let response = builder.send().await?;
        decode(response).await
    }

    #[instrument(skip(self, body))]
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        let response = self.request(method, url).json(body).send().await?;
        decode(response).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, segments: &[&str]) -> Result<(), ServiceError> {
        let url = self.endpoint(segments);
        let response = self.request(Method::DELETE, url).send().await?;
        check_status(response).await.map(|_| ())
    }
}

async fn check_status(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
    warn!(status = status.as_u16(), %message, "API request failed");
    Err(ServiceError::from_status(status, message))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    debug!(bytes = bytes.len(), "API response received");
    Ok(serde_json::from_slice(&bytes)?)
}

/// Picks `message`, then `error`, from a JSON error body; falls back to the raw
/// text when the body is not JSON.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(|v| v.as_str()))
            .filter(|m| !m.is_empty())
            .map(str::to_string),
        Err(_) => Some(body.to_string()),
    }
}
