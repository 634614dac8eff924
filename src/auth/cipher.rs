//! AES-ECB encryption with PKCS#5 padding.
//!
//! The platform authenticates a caller by checking that a small JSON payload
//! was encrypted with the merchant's secret key:
//!
//! ```text
//! AES-{128,192,256}-ECB(PKCS5(plaintext), raw secret key bytes)
//! ```
//!
//! Encryption uses the key bytes exactly as supplied, so the key must be 16,
//! 24 or 32 bytes long. Decryption always coerces the key to 16 bytes
//! (truncating or zero-padding on the right). The two paths are kept
//! asymmetric because the deployed service only ever sees the encrypt side.

use aes::{Aes128, Aes192, Aes256};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use ecb::cipher::block_padding::NoPadding;
use ecb::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};

use crate::error::AinfinitError;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Key length the decrypt path normalizes to.
const DECRYPT_KEY_LEN: usize = 16;

/// Append PKCS#5 padding.
///
/// Always appends between 1 and `block_size` bytes, each holding the pad
/// length. Input already aligned to the block size gains a full block.
pub fn pkcs5_pad(data: &[u8], block_size: usize) -> Vec<u8> {
    let padding = block_size - data.len() % block_size;
    let mut padded = Vec::with_capacity(data.len() + padding);
    padded.extend_from_slice(data);
    padded.resize(data.len() + padding, padding as u8);
    padded
}

/// Strip PKCS#5 padding, rejecting malformed input.
fn pkcs5_unpad(data: &[u8]) -> Result<&[u8], AinfinitError> {
    let invalid = || AinfinitError::Crypto("invalid PKCS#5 padding".to_string());
    let &last = data.last().ok_or_else(invalid)?;
    let padding = usize::from(last);
    if padding == 0 || padding > BLOCK_SIZE || padding > data.len() {
        return Err(invalid());
    }
    let (body, pad) = data.split_at(data.len() - padding);
    if pad.iter().any(|&b| b != last) {
        return Err(invalid());
    }
    Ok(body)
}

fn encrypt_with<C>(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, AinfinitError>
where
    C: BlockEncryptMut + KeyInit,
{
    let cipher = C::new_from_slice(key)
        .map_err(|_| AinfinitError::Crypto(format!("invalid AES key length: {}", key.len())))?;
    let padded = pkcs5_pad(plaintext, BLOCK_SIZE);
    let len = padded.len();
    let mut buffer = padded;
    cipher
        .encrypt_padded_mut::<NoPadding>(&mut buffer, len)
        .map_err(|e| AinfinitError::Crypto(format!("AES ECB encryption failed: {e:?}")))?;
    Ok(buffer)
}

/// Encrypt `plaintext` with AES-ECB and PKCS#5 padding under the raw `key`.
///
/// The AES variant follows the key length: 16, 24 or 32 bytes. Any other
/// length fails with [`AinfinitError::Crypto`].
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, AinfinitError> {
    match key.len() {
        16 => encrypt_with::<ecb::Encryptor<Aes128>>(plaintext, key),
        24 => encrypt_with::<ecb::Encryptor<Aes192>>(plaintext, key),
        32 => encrypt_with::<ecb::Encryptor<Aes256>>(plaintext, key),
        len => Err(AinfinitError::Crypto(format!(
            "invalid AES key length: {len} (expected 16, 24 or 32 bytes)"
        ))),
    }
}

/// Encrypt and base64-encode (standard alphabet, padded).
pub fn encrypt_to_base64(plaintext: &[u8], key: &[u8]) -> Result<String, AinfinitError> {
    Ok(BASE64.encode(encrypt(plaintext, key)?))
}

/// Coerce a key to exactly 16 bytes.
fn normalize_key(key: &[u8]) -> [u8; DECRYPT_KEY_LEN] {
    let mut normalized = [0u8; DECRYPT_KEY_LEN];
    let len = key.len().min(DECRYPT_KEY_LEN);
    normalized[..len].copy_from_slice(&key[..len]);
    normalized
}

/// Base64-decode and decrypt a ciphertext produced by [`encrypt_to_base64`].
///
/// The key is normalized to 16 bytes first, so AES-128 is always used.
pub fn decrypt_from_base64(data: &str, key: &[u8]) -> Result<String, AinfinitError> {
    let mut buffer = BASE64.decode(data)?;
    if buffer.is_empty() || buffer.len() % BLOCK_SIZE != 0 {
        return Err(AinfinitError::Crypto(format!(
            "ciphertext length {} is not a positive multiple of {BLOCK_SIZE}",
            buffer.len()
        )));
    }

    let key = normalize_key(key);
    let cipher = ecb::Decryptor::<Aes128>::new_from_slice(&key)
        .map_err(|_| AinfinitError::Crypto("invalid AES key length".to_string()))?;
    let decrypted = cipher
        .decrypt_padded_mut::<NoPadding>(&mut buffer)
        .map_err(|e| AinfinitError::Crypto(format!("AES ECB decryption failed: {e:?}")))?;

    let plaintext = pkcs5_unpad(decrypted)?;
    String::from_utf8(plaintext.to_vec())
        .map_err(|e| AinfinitError::Crypto(format!("decrypted data is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use ecb::cipher::block_padding::Pkcs7;

    use super::*;

    const KEY: &[u8] = b"4UafmbIJroNY2lXX";
    const PAYLOAD: &str = r#"{"merchant_code":"merchant","timestamp":1557218157315}"#;
    const CIPHERTEXT: &str =
        "VSHv3B3PmL49R2Yphnx/HRkl6ULR34Aq/OI7UFNnLeuPngEvvV7HR+2DXPQQb8zcSxYZUWA1H3WxM4TxSfkPhg==";

    #[test]
    fn test_known_vector() {
        let encrypted = encrypt_to_base64(PAYLOAD.as_bytes(), KEY).unwrap();
        assert_eq!(encrypted, CIPHERTEXT);
    }

    #[test]
    fn test_matches_pkcs7_padding() {
        // PKCS#7 over 16-byte blocks is the same scheme as PKCS#5.
        let reference = ecb::Encryptor::<Aes128>::new_from_slice(KEY)
            .unwrap()
            .encrypt_padded_vec_mut::<Pkcs7>(PAYLOAD.as_bytes());
        assert_eq!(encrypt(PAYLOAD.as_bytes(), KEY).unwrap(), reference);
    }

    #[test]
    fn test_padding_full_block_when_aligned() {
        let data = [0x41u8; 32];
        let padded = pkcs5_pad(&data, BLOCK_SIZE);
        assert_eq!(padded.len(), 48);
        assert_eq!(&padded[32..], &[0x10u8; 16]);
    }

    #[test]
    fn test_padding_partial_block() {
        let padded = pkcs5_pad(b"abc", BLOCK_SIZE);
        assert_eq!(padded.len(), 16);
        assert!(padded[3..].iter().all(|&b| b == 13));
    }

    #[test]
    fn test_aligned_plaintext_gains_extra_block() {
        let encrypted = encrypt(&[0u8; 16], KEY).unwrap();
        assert_eq!(encrypted.len(), 32);
    }

    #[test]
    fn test_round_trip() {
        let encrypted = encrypt_to_base64(PAYLOAD.as_bytes(), KEY).unwrap();
        let decrypted = decrypt_from_base64(&encrypted, KEY).unwrap();
        assert_eq!(decrypted, PAYLOAD);
    }

    #[test]
    fn test_decrypt_known_vector() {
        assert_eq!(decrypt_from_base64(CIPHERTEXT, KEY).unwrap(), PAYLOAD);
    }

    #[test]
    fn test_decrypt_normalizes_long_key() {
        // Extra key bytes beyond 16 are ignored on the decrypt path.
        let long_key = b"4UafmbIJroNY2lXXextra";
        assert_eq!(decrypt_from_base64(CIPHERTEXT, long_key).unwrap(), PAYLOAD);
    }

    #[test]
    fn test_decrypt_zero_pads_short_key() {
        let short_key = b"short";
        let mut padded_key = [0u8; 16];
        padded_key[..5].copy_from_slice(short_key);
        let encrypted = encrypt_to_base64(b"hello", &padded_key).unwrap();
        assert_eq!(decrypt_from_base64(&encrypted, short_key).unwrap(), "hello");
    }

    #[test]
    fn test_encrypt_does_not_normalize_key() {
        let err = encrypt(b"data", b"short").unwrap_err();
        assert!(matches!(err, AinfinitError::Crypto(_)));
    }

    #[test]
    fn test_encrypt_accepts_longer_aes_keys() {
        assert_eq!(encrypt(b"data", &[7u8; 24]).unwrap().len(), 16);
        assert_eq!(encrypt(b"data", &[7u8; 32]).unwrap().len(), 16);
    }

    #[test]
    fn test_decrypt_rejects_bad_input() {
        assert!(matches!(
            decrypt_from_base64("not base64!", KEY),
            Err(AinfinitError::Base64(_))
        ));
        assert!(matches!(
            decrypt_from_base64(&BASE64.encode([1u8; 10]), KEY),
            Err(AinfinitError::Crypto(_))
        ));
    }
}
