/**
 * Session Tokens
 *
 * This module issues and verifies the signed tokens carried in the
 * `x-auth-token` header.
 *
 * A token is an HS256 JWT whose payload is `{ user: { id }, iat, exp }`.
 * It is accepted if and only if its signature verifies against the
 * process-wide secret and the current time is strictly before `exp`
 * (`iat + expiry`). There is no revocation list; no other state is
 * consulted.
 */

use std::fmt;

use jsonwebtoken::{
    decode, encode, get_current_timestamp, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Subject embedded in the token payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaim {
    /// User ID
    pub id: Uuid,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user: UserClaim,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Why a request failed authentication
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("No token, authorization denied")]
    MissingToken,
    #[error("Token is not valid")]
    InvalidToken,
}

/// Token signing failure
#[derive(Debug, Error)]
#[error("failed to sign token: {0}")]
pub struct TokenError(#[from] jsonwebtoken::errors::Error);

/// Issues and verifies session tokens under one shared secret
///
/// Built once at startup and shared read-only across requests.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_secs: u64,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("expiry_secs", &self.expiry_secs)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Create a token service
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret
    /// * `expiry_secs` - Token lifetime in seconds
    pub fn new(secret: &str, expiry_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_secs,
        }
    }

    /// Token lifetime in seconds
    pub fn expiry_secs(&self) -> u64 {
        self.expiry_secs
    }

    /// Issue a token for a user, valid from now
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.issue_at(user_id, get_current_timestamp())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, user_id: Uuid, now: u64) -> Result<String, TokenError> {
        let claims = Claims {
            user: UserClaim { id: user_id },
            iat: now,
            exp: now.saturating_add(self.expiry_secs),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Verify a token taken from a request header
    ///
    /// `None` or an empty value means the header was absent.
    pub fn verify(&self, token: Option<&str>) -> Result<Uuid, AuthError> {
        self.verify_at(token, get_current_timestamp())
    }

    /// Verify a token as if the current time were `now`
    pub fn verify_at(&self, token: Option<&str>, now: u64) -> Result<Uuid, AuthError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        // Expiry is checked below against the caller's clock with no leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::warn!(error = %e, "token rejected");
            AuthError::InvalidToken
        })?;

        if now >= data.claims.exp {
            tracing::warn!(user_id = %data.claims.user.id, "token expired");
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims.user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";
    const EXPIRY: u64 = 360_000;

    fn service() -> TokenService {
        TokenService::new(SECRET, EXPIRY)
    }

    #[test]
    fn test_issue_token() {
        let token = service().issue(Uuid::new_v4()).unwrap();
        assert!(!token.is_empty());
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_verify_token() {
        let service = service();
        let user_id = Uuid::new_v4();
        let token = service.issue(user_id).unwrap();

        assert_eq!(service.verify(Some(&token)), Ok(user_id));
    }

    #[test]
    fn test_payload_shape() {
        let service = service();
        let user_id = Uuid::new_v4();
        let token = service.issue_at(user_id, 1_000).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let data = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &validation,
        )
        .unwrap();

        assert_eq!(data.claims["user"]["id"], user_id.to_string());
        assert_eq!(data.claims["iat"], 1_000);
        assert_eq!(data.claims["exp"], 1_000 + EXPIRY);
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(service().verify(None), Err(AuthError::MissingToken));
        assert_eq!(service().verify(Some("")), Err(AuthError::MissingToken));
    }

    #[test]
    fn test_verify_invalid_token() {
        assert_eq!(
            service().verify(Some("invalid.token.here")),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(service().verify(Some("garbage")), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = TokenService::new("other-secret", EXPIRY)
            .issue(Uuid::new_v4())
            .unwrap();
        assert_eq!(service().verify(Some(&token)), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_expiry_boundary() {
        let service = service();
        let user_id = Uuid::new_v4();
        let issued = 1_700_000_000;
        let token = service.issue_at(user_id, issued).unwrap();

        assert_eq!(service.verify_at(Some(&token), issued + EXPIRY - 1), Ok(user_id));
        assert_eq!(
            service.verify_at(Some(&token), issued + EXPIRY),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(
            service.verify_at(Some(&token), issued + EXPIRY + 1),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let claims = serde_json::json!({
            "user": { "id": "5e8f1c2a9b" },
            "iat": get_current_timestamp(),
            "exp": get_current_timestamp() + 100,
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(service().verify(Some(&token)), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_token_without_exp_rejected() {
        let claims = serde_json::json!({ "user": { "id": Uuid::new_v4() } });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(service().verify(Some(&token)), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_debug_hides_keys() {
        let debug = format!("{:?}", service());
        assert!(!debug.contains(SECRET));
        assert!(debug.contains("expiry_secs"));
    }
}
