use argon2::Argon2;
use argon2::PasswordHasher;
use argon2::password_hash::{Error as PasswordHashError, SaltString};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone)]
pub struct JwtKeys {
    pub enc: EncodingKey,
    pub dec: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            enc: EncodingKey::from_secret(secret.as_bytes()),
            dec: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Session claims carry only the user id and validity window. The caller's
/// role is re-read from the user record at verification time, never from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid token")]
    InvalidToken,
    #[error("expired token")]
    ExpiredToken,
}

pub fn now_ts() -> i64 {
    Utc::now().timestamp()
}

pub fn sign_session(keys: &JwtKeys, user_id: Uuid, ttl_secs: i64) -> Result<String, AuthError> {
    let iat = now_ts();
    let claims = Claims {
        sub: user_id,
        iat,
        exp: iat + ttl_secs,
    };
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &keys.enc)
        .map_err(|_| AuthError::InvalidToken)
}

/// Expiry is reported separately from signature/shape failures so callers can
/// answer with distinct messages.
pub fn verify(keys: &JwtKeys, token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    jsonwebtoken::decode::<Claims>(token, &keys.dec, &validation)
        .map(|d| d.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
}

pub fn hash_password(raw: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut thread_rng());
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(raw.as_bytes(), &salt)?.to_string();
    Ok(hash)
}

pub fn verify_password(raw: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    if let Ok(parsed) = PasswordHash::new(hash) {
        Argon2::default()
            .verify_password(raw.as_bytes(), &parsed)
            .is_ok()
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        for raw in ["password1", "supersecret", "longer passphrase with spaces"] {
            let hash = hash_password(raw).unwrap();
            assert_ne!(hash, raw);
            assert!(verify_password(raw, &hash));
        }
    }

    #[test]
    fn verify_rejects_other_passwords() {
        let hash = hash_password("supersecret").unwrap();
        assert!(!verify_password("supersecret2", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn verify_rejects_garbage_digests() {
        assert!(!verify_password("supersecret", "not-a-phc-string"));
    }

    #[test]
    fn token_round_trips_to_the_same_user() {
        let keys = JwtKeys::from_secret("test_secret_key");
        let user_id = Uuid::new_v4();
        let token = sign_session(&keys, user_id, 3600).unwrap();
        let claims = verify(&keys, &token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_distinguished_from_invalid() {
        let keys = JwtKeys::from_secret("test_secret_key");
        let user_id = Uuid::new_v4();

        // jsonwebtoken applies default leeway when checking exp
        let token = sign_session(&keys, user_id, -120).unwrap();
        assert_eq!(verify(&keys, &token), Err(AuthError::ExpiredToken));

        assert_eq!(
            verify(&keys, "definitely.not.a-jwt"),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn token_signed_with_a_rotated_key_is_invalid() {
        let keys = JwtKeys::from_secret("old_secret");
        let rotated = JwtKeys::from_secret("new_secret");
        let token = sign_session(&keys, Uuid::new_v4(), 3600).unwrap();
        assert_eq!(verify(&rotated, &token), Err(AuthError::InvalidToken));
    }
}
