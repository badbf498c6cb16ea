//! Outbound HTTP: bearer auth, 401 revocation and envelope decoding.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::envelope::Envelope;
use crate::config::ApiConfig;
use crate::error::ClientError;
use crate::events::{AuthEvents, AuthSignal};
use crate::storage::TokenStorage;

/// Status and body of a completed request, before envelope decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_envelope<T: DeserializeOwned>(self) -> Result<Envelope<T>, ClientError> {
        Envelope::from_http(self.status, &self.body)?.decode()
    }
}

pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
    tokens: TokenStorage,
    events: AuthEvents,
    log_requests: bool,
}

impl HttpClient {
    pub fn new(config: &ApiConfig, tokens: TokenStorage, events: AuthEvents) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| ClientError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;

        let inner = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            inner,
            base_url,
            tokens,
            events,
            log_requests: config.enable_request_logging,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenStorage {
        &self.tokens
    }

    pub fn events(&self) -> &AuthEvents {
        &self.events
    }

    fn url(&self, path: &str) -> Result<url::Url, ClientError> {
        let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        url::Url::parse(&joined).map_err(|e| ClientError::Config(format!("invalid request URL '{}': {}", joined, e)))
    }

    /// Sends one request. Transport failures are errors; every HTTP status,
    /// including 4xx/5xx, comes back as a `RawResponse`.
    pub async fn request<B, Q>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: Option<&Q>,
    ) -> Result<RawResponse, ClientError>
    where
        B: Serialize + ?Sized,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let mut builder = self.inner.request(method.clone(), url);

        if let Some(query) = query {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        match self.tokens.resolve_token().await {
            Ok(Some(token)) => builder = builder.bearer_auth(token),
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to read stored token: {}", e),
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        if self.log_requests {
            tracing::debug!(%method, path, status, "API request completed");
        }

        if status == 401 && !is_auth_path(path) {
            self.revoke(path).await;
        }

        Ok(RawResponse { status, body })
    }

    async fn revoke(&self, path: &str) {
        tracing::warn!(path, "Request unauthorized, clearing stored credentials");
        if let Err(e) = self.tokens.clear().await {
            tracing::error!("Failed to clear stored credentials: {}", e);
        }
        self.events.publish(AuthSignal::Unauthorized { path: path.to_string() });
    }

    pub async fn send<T, B, Q>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: Option<&Q>,
    ) -> Result<Envelope<T>, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
        Q: Serialize + ?Sized,
    {
        self.request(method, path, body, query).await?.into_envelope()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ClientError> {
        self.send::<T, (), ()>(Method::GET, path, None, None).await
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<Envelope<T>, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send::<T, (), Q>(Method::GET, path, None, Some(query)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send::<T, B, ()>(Method::POST, path, Some(body), None).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ClientError> {
        self.send::<T, (), ()>(Method::POST, path, None, None).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send::<T, B, ()>(Method::PUT, path, Some(body), None).await
    }

    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ClientError> {
        self.send::<T, (), ()>(Method::PUT, path, None, None).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ClientError> {
        self.send::<T, (), ()>(Method::DELETE, path, None, None).await
    }
}

/// On `/auth/*` a 401 means bad credentials, not an expired session.
pub fn is_auth_path(path: &str) -> bool {
    let trimmed = path.trim_start_matches('/');
    trimmed == "auth" || trimmed.starts_with("auth/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_paths_are_exempt_from_revocation() {
        assert!(is_auth_path("/auth/login"));
        assert!(is_auth_path("auth/password-reset/verify"));
        assert!(!is_auth_path("/users/me/applications"));
        assert!(!is_auth_path("/authors"));
    }

    #[test]
    fn base_url_keeps_its_path_prefix() {
        let config = crate::config::ClientConfig::for_base_url("http://localhost:8080/api/");
        let client = HttpClient::new(&config.api, TokenStorage::in_memory(), AuthEvents::new()).unwrap();
        assert_eq!(client.url("/users/me").unwrap().as_str(), "http://localhost:8080/api/users/me");
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let config = crate::config::ClientConfig::for_base_url("not a url");
        let result = HttpClient::new(&config.api, TokenStorage::in_memory(), AuthEvents::new());
        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
