//! Auto-detection and decoding of base64 and percent-encoded parameters.
//!
//! The sender encodes a parameter (often a JSON blob that was escaped before
//! encoding) with either base64 or percent-encoding and does not say which.
//! [`decode_auto`] tries base64 first and falls back to percent-decoding.
//! Base64 goes first because its alphabet is a subset of the characters that
//! are legal in percent-encoded text; an input that is valid in both formats
//! always resolves as base64. That ordering is a contract, not a heuristic
//! an implementation may reorder.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::{DecodeError, DecodeResult};

/// Maximum characters of the trimmed input echoed back in a
/// [`DecodeError::DecodeFailure`] preview.
const PREVIEW_MAX_CHARS: usize = 50;

/// The encoding format that [`decode_auto`] matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Standard-alphabet, padded base64.
    Base64,
    /// Percent-encoding with form semantics (`+` decodes to a space).
    Url,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Base64 => f.write_str("base64"),
            Encoding::Url => f.write_str("url"),
        }
    }
}

/// Auto-detect the encoding of `input` and decode it to plain text.
///
/// The input is trimmed, decoded (base64 first, percent-decoding as the
/// fallback), escape-normalized, and trimmed again. A strategy that decodes
/// successfully but yields only whitespace counts as a failure so the
/// fallback still runs.
///
/// Fails with [`DecodeError::InvalidArgument`] when the input is empty after
/// trimming, and with [`DecodeError::DecodeFailure`] when neither strategy
/// produces a usable result.
pub fn decode_auto(input: &str) -> DecodeResult<String> {
    decode_auto_detected(input).map(|(text, _)| text)
}

/// [`decode_auto`] for callers holding an optional parameter.
///
/// `None` is rejected the same way as an empty string.
pub fn decode_auto_opt(input: Option<&str>) -> DecodeResult<String> {
    match input {
        Some(encoded) => decode_auto(encoded),
        None => Err(DecodeError::InvalidArgument),
    }
}

/// Like [`decode_auto`], additionally reporting which encoding matched.
pub fn decode_auto_detected(input: &str) -> DecodeResult<(String, Encoding)> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::InvalidArgument);
    }

    let base64_error = match attempt(trimmed, Encoding::Base64) {
        Ok(text) => {
            tracing::debug!(encoding = %Encoding::Base64, "decoded parameter");
            return Ok((text, Encoding::Base64));
        }
        Err(err) => err,
    };
    tracing::debug!(
        error = %base64_error,
        "base64 decoding failed, attempting URL decoding"
    );

    let url_error = match attempt(trimmed, Encoding::Url) {
        Ok(text) => {
            tracing::debug!(encoding = %Encoding::Url, "decoded parameter");
            return Ok((text, Encoding::Url));
        }
        Err(err) => err,
    };

    tracing::warn!("both base64 and URL decoding failed");
    Err(DecodeError::DecodeFailure {
        base64_error: base64_error.to_string(),
        url_error: url_error.to_string(),
        preview: preview(trimmed),
    })
}

/// Decode `input` as standard-alphabet, padded base64 holding UTF-8 text.
pub fn decode_base64(input: &str) -> DecodeResult<String> {
    let bytes = BASE64
        .decode(input)
        .map_err(|err| DecodeError::InvalidBase64 {
            message: err.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|err| DecodeError::InvalidBase64 {
        message: err.to_string(),
    })
}

/// Decode `input` as percent-encoded UTF-8 text with form semantics.
///
/// Every `%` must be followed by exactly two hex digits; malformed sequences
/// are an error rather than passed through, so garbage input surfaces as
/// [`DecodeError::InvalidUrlEncoding`] instead of decoding to itself. A `+`
/// decodes to a space.
pub fn decode_url(input: &str) -> DecodeResult<String> {
    validate_percent_sequences(input)?;
    let unplussed = input.replace('+', " ");
    match urlencoding::decode(&unplussed) {
        Ok(decoded) => Ok(decoded.into_owned()),
        Err(err) => Err(DecodeError::InvalidUrlEncoding {
            message: err.to_string(),
        }),
    }
}

/// Run one decode strategy end to end: decode, reject whitespace-only
/// results, normalize escapes, trim.
fn attempt(input: &str, encoding: Encoding) -> DecodeResult<String> {
    let decoded = match encoding {
        Encoding::Base64 => decode_base64(input)?,
        Encoding::Url => decode_url(input)?,
    };
    if decoded.trim().is_empty() {
        tracing::warn!(%encoding, "decoding succeeded but produced empty result");
        return Err(empty_result_error(encoding));
    }
    Ok(normalize_escapes(&decoded).trim().to_string())
}

fn empty_result_error(encoding: Encoding) -> DecodeError {
    let message = "decoding produced empty result".to_string();
    match encoding {
        Encoding::Base64 => DecodeError::InvalidBase64 { message },
        Encoding::Url => DecodeError::InvalidUrlEncoding { message },
    }
}

/// Reject `%` sequences that are not followed by two ASCII hex digits.
fn validate_percent_sequences(input: &str) -> DecodeResult<()> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len() {
                return Err(DecodeError::InvalidUrlEncoding {
                    message: format!("incomplete percent sequence at byte {}", i),
                });
            }
            if !bytes[i + 1].is_ascii_hexdigit() || !bytes[i + 2].is_ascii_hexdigit() {
                return Err(DecodeError::InvalidUrlEncoding {
                    message: format!("invalid hex digits in percent sequence at byte {}", i),
                });
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

/// Resolve literal two-character escapes left over from JSON that was
/// escaped before being encoded.
///
/// Quotes first, then newline, carriage return, tab. No other escape
/// sequences are recognized.
fn normalize_escapes(input: &str) -> String {
    input
        .replace("\\\"", "\"")
        .replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
}

/// Truncate the input for error messages, appending `...` when cut.
fn preview(input: &str) -> String {
    if input.chars().count() > PREVIEW_MAX_CHARS {
        let truncated: String = input.chars().take(PREVIEW_MAX_CHARS).collect();
        format!("{}...", truncated)
    } else {
        input.to_string()
    }
}
