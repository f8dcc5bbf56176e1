//! Auto-detection and decoding of encoded string parameters.
//!
//! Upstream systems pass a single encoded blob (often JSON that was escaped
//! before encoding) without saying whether it is base64 or percent-encoded.
//! [`decode_auto`] recovers the plain text either way: base64 is attempted
//! first, percent-decoding is the fallback, and literal backslash escapes in
//! the decoded text are normalized. Inputs valid in both formats always
//! resolve as base64.

pub mod decode;
pub mod error;

// Convenience re-exports
pub use decode::{
    decode_auto, decode_auto_detected, decode_auto_opt, decode_base64, decode_url, Encoding,
};
pub use error::{DecodeError, DecodeResult};
