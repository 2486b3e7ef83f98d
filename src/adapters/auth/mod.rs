//! Credential provider adapters.
//!
//! - `StaticTokenProvider` - one configured bearer token
//! - `PasswordGrantProvider` - form login against a token endpoint
//! - `NoCredentials` - unauthenticated requests

mod password_grant;
mod static_token;

pub use password_grant::{PasswordGrantConfig, PasswordGrantProvider};
pub use static_token::{NoCredentials, StaticTokenProvider};
