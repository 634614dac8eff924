//! Authorization token generation for the Ainfinit open platform.
//!
//! Every request carries an `Authorization` header computed as:
//! ```text
//! nonce_str = base64(AES-ECB-PKCS5({"merchant_code":..,"timestamp":..}, secret_key))
//! token     = base64({"merchant_code":..,"nonce_str":nonce_str,"timestamp":..})
//! ```
//!
//! Both JSON documents are compact, keys appear in exactly the order above and
//! the timestamp is a bare integer of milliseconds since the Unix epoch.
//! Strings are written HTML-safe: `<`, `>`, `&`, U+2028 and U+2029 become
//! `\uXXXX` escapes, matching the bytes the platform's own SDKs produce.

use std::io;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::Serialize;
use serde_json::ser::Formatter;

use crate::auth::cipher;
use crate::error::AinfinitError;

/// The payload encrypted into `nonce_str`.
#[derive(Debug, Clone, Serialize)]
pub struct SignaturePayload<'a> {
    pub merchant_code: &'a str,
    pub timestamp: i64,
}

/// The outer token that is base64-encoded into the `Authorization` header.
#[derive(Debug, Clone, Serialize)]
pub struct AuthToken<'a> {
    pub merchant_code: &'a str,
    pub nonce_str: String,
    pub timestamp: i64,
}

/// Compact JSON with HTML-significant characters escaped.
struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            let escaped: &[u8] = match ch {
                '<' => b"\\u003c",
                '>' => b"\\u003e",
                '&' => b"\\u0026",
                '\u{2028}' => b"\\u2028",
                '\u{2029}' => b"\\u2029",
                _ => continue,
            };
            writer.write_all(&bytes[start..index])?;
            writer.write_all(escaped)?;
            start = index + ch.len_utf8();
        }
        writer.write_all(&bytes[start..])
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>, AinfinitError> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, HtmlSafeFormatter);
    value
        .serialize(&mut serializer)
        .map_err(AinfinitError::Encoding)?;
    Ok(buf)
}

/// Generate the `Authorization` header value.
///
/// # Arguments
///
/// * `merchant_code` - Merchant identifier issued by the platform
/// * `secret_key` - Raw AES key bytes (16, 24 or 32 bytes)
/// * `timestamp_ms` - Milliseconds since the Unix epoch
///
/// # Example
///
/// ```rust
/// use ainfinit_api_client::auth::generate_signature;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let token = generate_signature("merchant", b"4UafmbIJroNY2lXX", 1557218157315)?;
/// assert!(token.starts_with("eyJtZXJjaGFudF9jb2RlIjoibWVyY2hhbnQi"));
/// # Ok(())
/// # }
/// ```
pub fn generate_signature(
    merchant_code: &str,
    secret_key: &[u8],
    timestamp_ms: i64,
) -> Result<String, AinfinitError> {
    let inner = to_json(&SignaturePayload {
        merchant_code,
        timestamp: timestamp_ms,
    })?;
    let nonce_str = cipher::encrypt_to_base64(&inner, secret_key)?;

    let outer = to_json(&AuthToken {
        merchant_code,
        nonce_str,
        timestamp: timestamp_ms,
    })?;

    Ok(BASE64.encode(outer))
}
