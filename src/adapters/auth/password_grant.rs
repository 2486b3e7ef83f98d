//! Password-grant login.
//!
//! Posts `username` and `password` as form fields to the token endpoint and
//! caches the returned `access_token`. The token is handed out per request
//! until `logout` clears it; the next request then logs in again.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::ports::{Credential, CredentialError, CredentialProvider};

/// Login endpoint and account.
#[derive(Debug, Clone)]
pub struct PasswordGrantConfig {
    pub token_url: String,
    pub username: String,
    password: Secret<String>,
    pub timeout: Duration,
}

impl PasswordGrantConfig {
    pub fn new(
        token_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            token_url: token_url.into(),
            username: username.into(),
            password: Secret::new(password.into()),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct TokenErrorBody {
    #[serde(alias = "error")]
    detail: Option<String>,
}

/// Logs in once and reuses the token until logout.
pub struct PasswordGrantProvider {
    config: PasswordGrantConfig,
    http_client: Client,
    cached: RwLock<Option<Credential>>,
}

impl PasswordGrantProvider {
    /// Creates the provider. Does not log in until a credential is needed.
    pub fn new(config: PasswordGrantConfig) -> Result<Self, CredentialError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CredentialError::Unavailable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            config,
            http_client,
            cached: RwLock::new(None),
        })
    }

    /// Performs the login and caches the token.
    pub async fn login(&self) -> Result<Credential, CredentialError> {
        tracing::debug!(url = %self.config.token_url, user = %self.config.username, "logging in");

        let form = [
            ("username", self.config.username.as_str()),
            ("password", self.config.password.expose_secret().as_str()),
        ];
        let response = self
            .http_client
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| CredentialError::Unavailable(format!("token endpoint unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<TokenErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| format!("token endpoint returned {status}"));
            tracing::warn!(%status, "login rejected");
            return Err(CredentialError::LoginFailed(detail));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CredentialError::LoginFailed(format!("unreadable token response: {e}")))?;

        let credential = Credential::bearer(token.access_token);
        *self.cached.write().await = Some(credential.clone());
        tracing::info!(user = %self.config.username, "logged in");
        Ok(credential)
    }

    /// Forgets the cached token.
    pub async fn logout(&self) {
        *self.cached.write().await = None;
        tracing::info!(user = %self.config.username, "logged out");
    }

    pub async fn is_logged_in(&self) -> bool {
        self.cached.read().await.is_some()
    }
}

#[async_trait]
impl CredentialProvider for PasswordGrantProvider {
    async fn credential(&self) -> Result<Option<Credential>, CredentialError> {
        if let Some(credential) = self.cached.read().await.as_ref() {
            return Ok(Some(credential.clone()));
        }
        self.login().await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_debug_hides_password() {
        let config = PasswordGrantConfig::new("http://localhost/auth/token", "ada", "hunter2");
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[tokio::test]
    async fn starts_logged_out() {
        let provider = PasswordGrantProvider::new(PasswordGrantConfig::new(
            "http://localhost/auth/token",
            "ada",
            "pw",
        ))
        .unwrap();
        assert!(!provider.is_logged_in().await);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_unavailable() {
        let provider = PasswordGrantProvider::new(
            PasswordGrantConfig::new("http://127.0.0.1:1/auth/token", "ada", "pw")
                .with_timeout(Duration::from_secs(2)),
        )
        .unwrap();

        let err = provider.credential().await.unwrap_err();
        assert!(matches!(err, CredentialError::Unavailable(_)));
        assert!(!provider.is_logged_in().await);
    }
}
