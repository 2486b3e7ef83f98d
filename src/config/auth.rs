//! Credential configuration
//!
//! Either a static bearer token, or a password login against a token
//! endpoint, or nothing.

use serde::Deserialize;

use super::client::is_http_url;
use super::error::ValidationError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Static bearer token
    pub token: Option<String>,

    /// Password-grant token endpoint
    pub token_url: Option<String>,

    pub username: Option<String>,

    pub password: Option<String>,
}

/// Which credential provider the settings select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource<'a> {
    None,
    Static {
        token: &'a str,
    },
    PasswordGrant {
        token_url: &'a str,
        username: &'a str,
        password: &'a str,
    },
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl AuthConfig {
    pub fn has_token(&self) -> bool {
        present(&self.token).is_some()
    }

    pub fn has_login(&self) -> bool {
        present(&self.username).is_some()
    }

    /// Resolves the settings; call after `validate`.
    pub fn source(&self) -> CredentialSource<'_> {
        if let Some(token) = present(&self.token) {
            return CredentialSource::Static { token };
        }
        match (
            present(&self.token_url),
            present(&self.username),
            present(&self.password),
        ) {
            (Some(token_url), Some(username), Some(password)) => CredentialSource::PasswordGrant {
                token_url,
                username,
                password,
            },
            _ => CredentialSource::None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_login() {
            return match present(&self.password) {
                Some(_) => Err(ValidationError::MissingRequired("AUTH__USERNAME")),
                None => Ok(()),
            };
        }
        if self.has_token() {
            return Err(ValidationError::ConflictingAuth);
        }
        if present(&self.password).is_none() {
            return Err(ValidationError::MissingRequired("AUTH__PASSWORD"));
        }
        match present(&self.token_url) {
            None => Err(ValidationError::MissingRequired("AUTH__TOKEN_URL")),
            Some(url) if !is_http_url(url) => Err(ValidationError::InvalidEndpoint(url.to_string())),
            Some(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login() -> AuthConfig {
        AuthConfig {
            token_url: Some("http://localhost:8000/auth/token".to_string()),
            username: Some("ada".to_string()),
            password: Some("pw".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_auth_is_unauthenticated() {
        let config = AuthConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.source(), CredentialSource::None);
    }

    #[test]
    fn test_static_token() {
        let config = AuthConfig {
            token: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.source(), CredentialSource::Static { token: "abc" });
    }

    #[test]
    fn test_password_grant() {
        let config = login();
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.source(),
            CredentialSource::PasswordGrant { username: "ada", .. }
        ));
    }

    #[test]
    fn test_login_requires_password_and_url() {
        let no_password = AuthConfig {
            password: None,
            ..login()
        };
        assert_eq!(
            no_password.validate(),
            Err(ValidationError::MissingRequired("AUTH__PASSWORD"))
        );

        let no_url = AuthConfig {
            token_url: None,
            ..login()
        };
        assert_eq!(
            no_url.validate(),
            Err(ValidationError::MissingRequired("AUTH__TOKEN_URL"))
        );
    }

    #[test]
    fn test_password_without_username() {
        let config = AuthConfig {
            password: Some("pw".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("AUTH__USERNAME"))
        );
    }

    #[test]
    fn test_token_and_login_conflict() {
        let config = AuthConfig {
            token: Some("abc".to_string()),
            ..login()
        };
        assert_eq!(config.validate(), Err(ValidationError::ConflictingAuth));
    }
}
