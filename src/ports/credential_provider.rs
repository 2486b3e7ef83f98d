//! Credential Provider Port - per-request authorization.
//!
//! Credentials are fetched for every exchange and attached to that request
//! alone. Nothing mutates shared client defaults, so logging out simply
//! means the provider stops returning a credential.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

/// A bearer token for one outgoing request.
#[derive(Debug, Clone)]
pub struct Credential {
    token: Secret<String>,
}

impl Credential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Secret::new(token.into()),
        }
    }

    /// Value for the `Authorization` header.
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

/// Supplies the credential for each outgoing request.
///
/// # Contract
///
/// - `Ok(None)` means "send unauthenticated"
/// - errors abort the exchange before anything is sent
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn credential(&self) -> Result<Option<Credential>, CredentialError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("login failed: {0}")]
    LoginFailed(String),

    #[error("credential service unavailable: {0}")]
    Unavailable(String),
}
