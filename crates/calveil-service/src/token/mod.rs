//! Sealed upstream-URL tokens.
//!
//! A token keeps the upstream calendar address out of user-visible URLs:
//! the URL is encrypted with AES-256-GCM under a random 12-byte nonce, and
//! `nonce || ciphertext` is encoded as unpadded base64url. Unsealing fails
//! with a single opaque error so tokens leak nothing about why they were
//! rejected.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::{ServiceError, ServiceResult};

const NONCE_LEN: usize = 12;

/// Pads or truncates the configured secret to exactly 32 key bytes.
fn derive_key(secret: &str) -> Key<Aes256Gcm> {
    let mut key = [b'0'; 32];
    let bytes = secret.as_bytes();
    let take = bytes.len().min(32);
    key[..take].copy_from_slice(&bytes[..take]);
    key.into()
}

/// ## Summary
/// Seals an upstream URL into a URL-safe token.
///
/// ## Errors
/// Returns an error if encryption fails.
pub fn seal(url: &str, secret: &str) -> ServiceResult<String> {
    let cipher = Aes256Gcm::new(&derive_key(secret));
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, url.as_bytes())
        .map_err(|_err| ServiceError::TokenSealFailed)?;

    let mut buffer = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    buffer.extend_from_slice(&nonce);
    buffer.extend_from_slice(&ciphertext);
    Ok(URL_SAFE_NO_PAD.encode(buffer))
}

/// ## Summary
/// Unseals a token back into the upstream URL it wraps.
///
/// ## Errors
/// Returns `InvalidToken` for any undecodable, truncated, tampered, or
/// wrongly-keyed token.
pub fn unseal(token: &str, secret: &str) -> ServiceResult<String> {
    let buffer = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_err| ServiceError::InvalidToken)?;
    if buffer.len() <= NONCE_LEN {
        return Err(ServiceError::InvalidToken);
    }

    let (nonce, ciphertext) = buffer.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new(&derive_key(secret));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_err| ServiceError::InvalidToken)?;

    String::from_utf8(plaintext).map_err(|_err| ServiceError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";
    const URL: &str = "https://srh-community.campusweb.cloud/ical/feed.ics";

    #[test]
    fn seal_unseal_round_trip() {
        let token = seal(URL, SECRET).unwrap();
        assert_eq!(unseal(&token, SECRET).unwrap(), URL);
    }

    #[test]
    fn tokens_are_url_safe() {
        let token = seal(URL, SECRET).unwrap();
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
        assert!(!token.contains('='));
    }

    #[test]
    fn sealing_twice_yields_different_tokens() {
        // Random nonce per seal.
        let a = seal(URL, SECRET).unwrap();
        let b = seal(URL, SECRET).unwrap();
        assert_ne!(a, b);
        assert_eq!(unseal(&a, SECRET).unwrap(), unseal(&b, SECRET).unwrap());
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = seal(URL, SECRET).unwrap();
        assert!(matches!(
            unseal(&token, "another-secret"),
            Err(ServiceError::InvalidToken)
        ));
    }

    #[test]
    fn tampered_token_rejected() {
        let token = seal(URL, SECRET).unwrap();
        let mut tampered = token.into_bytes();
        let last = tampered.len() - 1;
        tampered[last] = if tampered[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).unwrap();
        assert!(matches!(
            unseal(&tampered, SECRET),
            Err(ServiceError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_token_rejected() {
        for garbage in ["", "!!!", "shortbutvalidb64"] {
            assert!(matches!(
                unseal(garbage, SECRET),
                Err(ServiceError::InvalidToken)
            ));
        }
    }

    #[test]
    fn long_secret_truncated_consistently() {
        let long = "s".repeat(64);
        let token = seal(URL, &long).unwrap();
        assert_eq!(unseal(&token, &long).unwrap(), URL);
        // Only the first 32 bytes of the secret matter.
        let token2 = seal(URL, &"s".repeat(32)).unwrap();
        assert_eq!(unseal(&token2, &long).unwrap(), URL);
    }
}
