//! Fixed credential providers.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use crate::ports::{Credential, CredentialError, CredentialProvider};

/// Attaches the same bearer token to every request.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: Secret<String>,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Secret::new(token.into()),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticTokenProvider {
    async fn credential(&self) -> Result<Option<Credential>, CredentialError> {
        Ok(Some(Credential::bearer(self.token.expose_secret().as_str())))
    }
}

/// Sends every request unauthenticated.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

#[async_trait]
impl CredentialProvider for NoCredentials {
    async fn credential(&self) -> Result<Option<Credential>, CredentialError> {
        Ok(None)
    }
}
