//! Decoding of the out-of-band citation header.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use thiserror::Error;

use super::source_index::Citation;

#[derive(Debug, Error)]
pub enum CitationDecodeError {
    #[error("citation header is not base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("citation header is not JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("citation header is not a list")]
    NotAList,
}

/// Decodes a base64-encoded JSON list of citation records.
///
/// Padding is optional and the URL-safe alphabet is accepted.
pub fn decode_citation_header(raw: &str) -> Result<Vec<Citation>, CitationDecodeError> {
    let trimmed = raw.trim().trim_end_matches('=');
    let bytes = STANDARD_NO_PAD
        .decode(trimmed)
        .or_else(|_| URL_SAFE_NO_PAD.decode(trimmed))?;
    match serde_json::from_slice(&bytes)? {
        serde_json::Value::Array(items) => Ok(items),
        _ => Err(CitationDecodeError::NotAList),
    }
}
