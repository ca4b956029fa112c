//! Session token encoding and decoding
//!
//! Tokens are HS256-signed claims binding an account id to an access
//! level under a process-wide secret. They carry no expiry: a token
//! stays decodable until the secret rotates, and stays *usable* only
//! while it remains in the owning account's token list (the store-side
//! membership check lives in `UserService::find_by_valid_token`).

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// The only access level currently issued.
pub const ACCESS_AUTH: &str = "auth";

/// Signed token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (account ID)
    pub sub: String,
    /// Access level ("auth")
    pub access: String,
}

/// Token decode failures
///
/// `SignatureInvalid` means the token parsed but does not verify under
/// the current secret; everything else is `Malformed`. A token that
/// fails either way is never partially trusted.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed token")]
    Malformed,
    #[error("token signature did not verify")]
    SignatureInvalid,
}

/// Pre-computed signing keys, derived once at startup
#[derive(Clone)]
struct TokenKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

/// Token codec with cached keys
///
/// Create one at application startup from the configured secret and
/// store it in `AppState`; cloning is an Arc increment.
#[derive(Clone)]
pub struct TokenCodec {
    keys: TokenKeys,
    validation: Validation,
}

impl TokenCodec {
    /// Create a new codec from the process-wide signing secret
    pub fn new(secret: &str) -> Self {
        // Issued tokens have no exp claim; validity is governed by the
        // account's token list, not by time.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            keys: TokenKeys {
                encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
                decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            },
            validation,
        }
    }

    /// Encode a token binding `account_id` and `access`
    ///
    /// Deterministic for identical input and secret; unforgeable
    /// without the secret.
    pub fn encode(&self, account_id: Uuid, access: &str) -> anyhow::Result<String> {
        let claims = TokenClaims {
            sub: account_id.to_string(),
            access: access.to_string(),
        };
        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to encode token: {}", e))
    }

    /// Decode and verify a token, returning its claims
    pub fn decode(&self, token: &str) -> Result<TokenClaims, DecodeError> {
        decode::<TokenClaims>(token, &self.keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => DecodeError::SignatureInvalid,
                _ => DecodeError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret")
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let codec = codec();
        let account_id = Uuid::new_v4();

        let token = codec.encode(account_id, ACCESS_AUTH).unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.access, ACCESS_AUTH);
    }

    #[test]
    fn test_decoded_claims_compare_equal() {
        let codec = codec();
        let account_id = Uuid::new_v4();
        let token = codec.encode(account_id, ACCESS_AUTH).unwrap();

        let expected = TokenClaims {
            sub: account_id.to_string(),
            access: ACCESS_AUTH.to_string(),
        };
        assert_eq!(codec.decode(&token), Ok(expected));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let codec = codec();
        let account_id = Uuid::new_v4();

        let t1 = codec.encode(account_id, ACCESS_AUTH).unwrap();
        let t2 = codec.encode(account_id, ACCESS_AUTH).unwrap();
        assert_eq!(t1, t2);
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let codec = codec();
        assert_eq!(codec.decode("not-a-token"), Err(DecodeError::Malformed));
        assert_eq!(codec.decode(""), Err(DecodeError::Malformed));
        assert_eq!(codec.decode("a.b"), Err(DecodeError::Malformed));
    }

    #[test]
    fn test_wrong_secret_is_signature_invalid() {
        let account_id = Uuid::new_v4();
        let token = TokenCodec::new("secret-one")
            .encode(account_id, ACCESS_AUTH)
            .unwrap();

        let result = TokenCodec::new("secret-two").decode(&token);
        assert_eq!(result, Err(DecodeError::SignatureInvalid));
    }

    #[test]
    fn test_tampered_payload_does_not_verify() {
        let codec = codec();
        let token = codec.encode(Uuid::new_v4(), ACCESS_AUTH).unwrap();

        // Swap the payload segment for another token's payload
        let other = codec.encode(Uuid::new_v4(), "admin").unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        parts[1] = other_parts[1];
        let tampered = parts.join(".");

        assert!(codec.decode(&tampered).is_err());
    }

    #[test]
    fn test_token_without_expiry_still_decodes() {
        // Claims carry no exp; decoding must not demand one.
        let codec = codec();
        let token = codec.encode(Uuid::new_v4(), ACCESS_AUTH).unwrap();
        assert!(codec.decode(&token).is_ok());
    }

    #[test]
    fn test_codec_clone_is_cheap() {
        let codec = codec();
        let _cloned = codec.clone(); // Arc increments only
    }
}
