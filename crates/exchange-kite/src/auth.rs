//! Session login.
//!
//! Kite exchanges the `request_token` from its login redirect for an access
//! token. The request is authenticated by
//! `checksum = hex(sha256(api_key + request_token + api_secret))`.

use async_trait::async_trait;
use nifty_options_core::{BrokerError, BrokerResult, SessionLogin};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::client::KiteClient;
use crate::types::Session;

/// Login checksum over the concatenated key, token and secret.
#[must_use]
pub fn checksum(api_key: &str, request_token: &str, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hasher.update(request_token.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

impl KiteClient {
    /// Exchanges `request_token` for a session and keeps its access token
    /// for subsequent calls.
    ///
    /// # Errors
    /// `Configuration` when no API secret is configured, otherwise whatever
    /// the session endpoint returns.
    pub async fn login(&self, request_token: &str) -> BrokerResult<Session> {
        let api_secret = self
            .config
            .api_secret
            .as_deref()
            .ok_or_else(|| BrokerError::Configuration("broker.api_secret is not set".to_string()))?;

        let form = [
            ("api_key", self.config.api_key.clone()),
            ("request_token", request_token.to_string()),
            ("checksum", checksum(&self.config.api_key, request_token, api_secret)),
        ];

        let session: Session = self.post_form("/session/token", &form).await?;
        self.set_access_token(session.access_token.clone());
        info!(user_id = session.user_id, "Kite session established");
        Ok(session)
    }
}

#[async_trait]
impl SessionLogin for KiteClient {
    async fn login(&self, request_token: &str) -> BrokerResult<String> {
        KiteClient::login(self, request_token).await.map(|s| s.user_id)
    }
}
