//! Error types for parameter decoding.

use thiserror::Error;

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors that can occur while detecting and decoding an encoded parameter.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Input was missing, empty, or whitespace-only.
    #[error("encoded parameter cannot be null or empty")]
    InvalidArgument,

    /// Input is not valid base64, or the decoded bytes are not valid UTF-8.
    #[error("invalid base64 encoding: {message}")]
    InvalidBase64 { message: String },

    /// Input is not valid percent-encoded text, or the decoded bytes are not
    /// valid UTF-8.
    #[error("invalid URL encoding: {message}")]
    InvalidUrlEncoding { message: String },

    /// Both decode strategies failed (or produced empty results).
    /// Carries both underlying messages and a truncated preview of the input.
    #[error(
        "unable to decode parameter - neither base64 nor URL encoding format detected. \
         Base64 error: {base64_error}. URL error: {url_error}. Input preview: {preview}"
    )]
    DecodeFailure {
        base64_error: String,
        url_error: String,
        preview: String,
    },
}

impl DecodeError {
    /// Returns true if the input was rejected before any decode attempt.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument)
    }

    /// Returns true if both decode strategies failed.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::DecodeFailure { .. })
    }
}
