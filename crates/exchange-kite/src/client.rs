//! Kite Connect REST client with rate limiting.
//!
//! Every call waits on a `governor` limiter and is bounded by the configured
//! request timeout. Authenticated calls send
//! `Authorization: token {api_key}:{access_token}`.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::{Quota, RateLimiter};
use nifty_options_core::{BrokerConfig, BrokerError, BrokerResult};
use parking_lot::RwLock;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::types::{Envelope, ErrorBody};

/// Kite Connect production API.
pub const KITE_API_URL: &str = "https://api.kite.trade";

const KITE_VERSION: &str = "3";

#[derive(Clone)]
pub struct KiteConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: Option<String>,
    pub access_token: Option<String>,
    pub requests_per_second: NonZeroU32,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for KiteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KiteConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("requests_per_second", &self.requests_per_second)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl KiteConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: KITE_API_URL.to_string(),
            api_key: api_key.into(),
            api_secret: None,
            access_token: None,
            requests_per_second: NonZeroU32::MIN.saturating_add(9),
            timeout_secs: 10,
        }
    }

    /// Adapter settings from the `broker` config section.
    ///
    /// # Errors
    /// Returns `BrokerError::Configuration` when no API key is set or the
    /// rate limit is zero.
    pub fn from_broker_config(config: &BrokerConfig) -> BrokerResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| BrokerError::Configuration("broker.api_key is not set".to_string()))?;
        let requests_per_second = NonZeroU32::new(config.requests_per_second).ok_or_else(|| {
            BrokerError::Configuration("broker.requests_per_second must be positive".to_string())
        })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            api_secret: config.api_secret.clone(),
            access_token: config.access_token.clone(),
            requests_per_second,
            timeout_secs: config.timeout_secs,
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_api_secret(mut self, secret: impl Into<String>) -> Self {
        self.api_secret = Some(secret.into());
        self
    }

    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

type DirectLimiter =
    RateLimiter<governor::state::NotKeyed, governor::state::InMemoryState, governor::clock::DefaultClock>;

/// Kite Connect client. Serves quotes, orders, positions and login.
pub struct KiteClient {
    pub(crate) config: KiteConfig,
    http: Client,
    rate_limiter: Arc<DirectLimiter>,
    access_token: RwLock<Option<String>>,
}

impl std::fmt::Debug for KiteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KiteClient")
            .field("base_url", &self.config.base_url)
            .field("authenticated", &self.access_token.read().is_some())
            .finish_non_exhaustive()
    }
}

impl KiteClient {
    /// # Errors
    /// Returns `BrokerError::Configuration` if the HTTP client cannot be built.
    pub fn new(config: KiteConfig) -> BrokerResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BrokerError::Configuration(format!("failed to build HTTP client: {e}")))?;

        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(config.requests_per_second)));
        let access_token = RwLock::new(config.access_token.clone());

        Ok(Self {
            config,
            http,
            rate_limiter,
            access_token,
        })
    }

    /// # Errors
    /// See [`KiteConfig::from_broker_config`] and [`KiteClient::new`].
    pub fn from_broker_config(config: &BrokerConfig) -> BrokerResult<Self> {
        Self::new(KiteConfig::from_broker_config(config)?)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn set_access_token(&self, token: impl Into<String>) {
        *self.access_token.write() = Some(token.into());
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token.read().is_some()
    }

    fn authorization(&self) -> Option<String> {
        self.access_token
            .read()
            .as_ref()
            .map(|token| format!("token {}:{}", self.config.api_key, token))
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        let mut builder = self
            .http
            .request(method, url)
            .header("X-Kite-Version", KITE_VERSION);
        if let Some(auth) = self.authorization() {
            builder = builder.header("Authorization", auth);
        }
        builder
    }

    /// Rate-limited GET returning the envelope's `data`.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> BrokerResult<T> {
        self.rate_limiter.until_ready().await;
        tracing::debug!(path, "GET");

        let response = self
            .request(reqwest::Method::GET, path)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        handle_response(response).await
    }

    /// Rate-limited form-encoded POST returning the envelope's `data`.
    pub(crate) async fn post_form<T: DeserializeOwned>(&self, path: &str, form: &[(&str, String)]) -> BrokerResult<T> {
        self.rate_limiter.until_ready().await;
        tracing::debug!(path, fields = form.len(), "POST");

        let response = self
            .request(reqwest::Method::POST, path)
            .form(form)
            .send()
            .await
            .map_err(transport_error)?;

        handle_response(response).await
    }
}

pub(crate) fn transport_error(err: reqwest::Error) -> BrokerError {
    if err.is_timeout() {
        BrokerError::Timeout(err.to_string())
    } else if err.is_connect() {
        BrokerError::Network(format!("connection failed: {err}"))
    } else if err.is_decode() {
        BrokerError::Malformed(err.to_string())
    } else {
        BrokerError::Network(err.to_string())
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> BrokerResult<T> {
    let status = response.status();

    if status.as_u16() == 429 {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);
        return Err(BrokerError::rate_limit(retry_after));
    }

    let text = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let message = body.message.unwrap_or(text);
        if status.as_u16() == 403 || body.error_type.as_deref() == Some("TokenException") {
            return Err(BrokerError::Authentication(message));
        }
        return Err(BrokerError::api(status.as_u16(), message));
    }

    let envelope: Envelope<T> = serde_json::from_str(&text)?;
    Ok(envelope.data)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) fn client_for(server: &MockServer) -> KiteClient {
        let config = KiteConfig::new("kitefront")
            .with_base_url(server.uri())
            .with_api_secret("s3cr3t")
            .with_access_token("tok");
        KiteClient::new(config).unwrap()
    }

    #[test]
    fn config_from_broker_section() {
        let broker = BrokerConfig {
            api_key: Some("kitefront".to_string()),
            base_url: "https://api.kite.trade/".to_string(),
            ..BrokerConfig::default()
        };
        let config = KiteConfig::from_broker_config(&broker).unwrap();
        assert_eq!(config.base_url, KITE_API_URL);
        assert_eq!(config.requests_per_second.get(), 10);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn missing_api_key_is_configuration_error() {
        let err = KiteConfig::from_broker_config(&BrokerConfig::default()).unwrap_err();
        assert!(matches!(err, BrokerError::Configuration(_)));
    }

    #[test]
    fn zero_rate_limit_rejected() {
        let broker = BrokerConfig {
            api_key: Some("k".to_string()),
            requests_per_second: 0,
            ..BrokerConfig::default()
        };
        assert!(KiteConfig::from_broker_config(&broker).is_err());
    }

    #[test]
    fn debug_hides_secrets() {
        let config = KiteConfig::new("k").with_api_secret("s3cr3t").with_access_token("tok");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cr3t"));
        assert!(!rendered.contains("tok\""));
    }

    #[tokio::test]
    async fn sends_version_and_token_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("X-Kite-Version", "3"))
            .and(header("Authorization", "token kitefront:tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "data": {"ok": true}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let data: serde_json::Value = client_for(&server).get("/ping", &[]).await.unwrap();
        assert_eq!(data["ok"], true);
    }

    #[tokio::test]
    async fn maps_error_statuses_to_kinds() {
        let server = MockServer::start().await;
        Mock::given(path("/limited"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "3"))
            .mount(&server)
            .await;
        Mock::given(path("/forbidden"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "status": "error",
                "message": "Incorrect `api_key` or `access_token`.",
                "error_type": "TokenException"
            })))
            .mount(&server)
            .await;
        Mock::given(path("/broken"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;
        Mock::given(path("/garbled"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server);

        let err = client.get::<serde_json::Value>("/limited", &[]).await.unwrap_err();
        assert!(matches!(err, BrokerError::RateLimit { retry_after_secs: 3 }));

        let err = client.get::<serde_json::Value>("/forbidden", &[]).await.unwrap_err();
        assert!(matches!(err, BrokerError::Authentication(ref m) if m.starts_with("Incorrect")));

        let err = client.get::<serde_json::Value>("/broken", &[]).await.unwrap_err();
        assert!(matches!(err, BrokerError::Api { status_code: 502, ref message } if message == "bad gateway"));
        assert!(err.is_transient());

        let err = client.get::<serde_json::Value>("/garbled", &[]).await.unwrap_err();
        assert!(matches!(err, BrokerError::Malformed(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let config = KiteConfig::new("k").with_base_url("http://127.0.0.1:1");
        let client = KiteClient::new(config).unwrap();
        let err = client.get::<serde_json::Value>("/quote", &[]).await.unwrap_err();
        assert!(err.is_transient());
    }
}
