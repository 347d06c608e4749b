//! Access token issuance and verification
//!
//! Tokens are standard HS256 JWTs carrying a [`RoomGrant`] under the `video`
//! claim, with the API key as issuer and the participant identity as subject.

use crate::auth::grants::RoomGrant;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Default validity window for issued tokens
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("api key and secret must be non-empty")]
    MissingCredentials,

    #[error("room name must be non-empty")]
    EmptyRoom,

    #[error("identity must be non-empty")]
    EmptyIdentity,

    #[error("token has no grant")]
    MissingGrant,

    #[error("token ttl must be positive")]
    InvalidTtl,

    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}

/// API key pair used to sign and verify tokens
///
/// Loaded once at startup and shared read-only across requests.
#[derive(Clone)]
pub struct ApiCredentials {
    key: String,
    secret: String,
}

impl ApiCredentials {
    /// Create a credential pair, rejecting empty key material up front so a
    /// misconfigured process fails at startup rather than on first issuance.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self, TokenError> {
        let key = key.into();
        let secret = secret.into();

        if key.trim().is_empty() || secret.trim().is_empty() {
            return Err(TokenError::MissingCredentials);
        }

        Ok(Self { key, secret })
    }

    /// The key identifier, embedded as the token issuer
    pub fn api_key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiCredentials({}, [REDACTED])", self.key)
    }
}

/// Claims carried by an issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issuer: the API key identifier
    pub iss: String,
    /// Subject: the participant identity
    pub sub: String,
    /// Token ID (mirrors the identity)
    pub jti: String,
    /// Not valid before (unix seconds)
    pub nbf: u64,
    /// Expiry (unix seconds)
    pub exp: u64,
    /// The capability this token grants
    pub video: RoomGrant,
}

/// Builder for a signed room-join token
///
/// Binds credentials, a grant, an identity, and a validity window, then
/// signs the result into a self-contained JWT string.
#[derive(Debug, Clone)]
pub struct AccessToken {
    credentials: ApiCredentials,
    identity: Option<String>,
    grant: Option<RoomGrant>,
    ttl: Duration,
}

impl AccessToken {
    /// Start building a token signed by the given credentials
    pub fn with_credentials(credentials: ApiCredentials) -> Self {
        Self {
            credentials,
            identity: None,
            grant: None,
            ttl: DEFAULT_TTL,
        }
    }

    /// Set the participant identity (token subject)
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Attach the room grant
    pub fn with_grant(mut self, grant: RoomGrant) -> Self {
        self.grant = Some(grant);
        self
    }

    /// Override the validity window (default one hour)
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sign the token and return the JWT string.
    ///
    /// Fails with a distinct error for each missing or invalid input; never
    /// returns an empty string in place of a failure.
    pub fn to_jwt(self) -> Result<String, TokenError> {
        let identity = self.identity.filter(|i| !i.trim().is_empty());
        let identity = identity.ok_or(TokenError::EmptyIdentity)?;
        let grant = self.grant.ok_or(TokenError::MissingGrant)?;

        if self.ttl.is_zero() {
            return Err(TokenError::InvalidTtl);
        }

        let now = unix_now();
        let claims = TokenClaims {
            iss: self.credentials.key.clone(),
            sub: identity.clone(),
            jti: identity,
            nbf: now,
            exp: now + self.ttl.as_secs(),
            video: grant,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.credentials.secret.as_bytes()),
        )
        .map_err(TokenError::Signing)
    }
}

/// Verify a token against the given credentials and recover its claims.
///
/// Not used on the issuance path; exists for downstream consumers and for
/// checking issued tokens in tests.
pub fn verify(jwt: &str, credentials: &ApiCredentials) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[credentials.api_key()]);

    decode::<TokenClaims>(
        jwt,
        &DecodingKey::from_secret(credentials.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e.to_string()),
    })
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock set before unix epoch")
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "K1";
    const TEST_SECRET: &str = "S1";

    fn test_credentials() -> ApiCredentials {
        ApiCredentials::new(TEST_KEY, TEST_SECRET).unwrap()
    }

    fn issue(room: &str, identity: &str, ttl: Duration) -> Result<String, TokenError> {
        AccessToken::with_credentials(test_credentials())
            .with_identity(identity)
            .with_grant(RoomGrant::new(room)?)
            .with_ttl(ttl)
            .to_jwt()
    }

    #[test]
    fn test_issue_and_verify() {
        let jwt = issue("my-room", "identity", Duration::from_secs(3600)).unwrap();
        assert!(!jwt.is_empty());

        let claims = verify(&jwt, &test_credentials()).unwrap();
        assert_eq!(claims.iss, TEST_KEY);
        assert_eq!(claims.sub, "identity");
        assert_eq!(claims.video.room, "my-room");
        assert!(claims.video.room_join);

        let now = unix_now();
        assert!(claims.exp >= now + 3595 && claims.exp <= now + 3605);
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(matches!(
            ApiCredentials::new("", TEST_SECRET),
            Err(TokenError::MissingCredentials)
        ));
        assert!(matches!(
            ApiCredentials::new(TEST_KEY, ""),
            Err(TokenError::MissingCredentials)
        ));
    }

    #[test]
    fn test_empty_identity_rejected() {
        let result = AccessToken::with_credentials(test_credentials())
            .with_identity("")
            .with_grant(RoomGrant::new("my-room").unwrap())
            .to_jwt();

        assert!(matches!(result, Err(TokenError::EmptyIdentity)));
    }

    #[test]
    fn test_missing_grant_rejected() {
        let result = AccessToken::with_credentials(test_credentials())
            .with_identity("identity")
            .to_jwt();

        assert!(matches!(result, Err(TokenError::MissingGrant)));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let result = issue("my-room", "identity", Duration::ZERO);
        assert!(matches!(result, Err(TokenError::InvalidTtl)));
    }

    #[test]
    fn test_wrong_secret_fails_verification() {
        let jwt = issue("my-room", "identity", Duration::from_secs(3600)).unwrap();
        let other = ApiCredentials::new(TEST_KEY, "wrong-secret").unwrap();

        assert!(matches!(verify(&jwt, &other), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_wrong_issuer_fails_verification() {
        let jwt = issue("my-room", "identity", Duration::from_secs(3600)).unwrap();
        let other = ApiCredentials::new("K2", TEST_SECRET).unwrap();

        assert!(matches!(verify(&jwt, &other), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Encode a token whose validity window ended an hour ago.
        let now = unix_now();
        let claims = TokenClaims {
            iss: TEST_KEY.to_string(),
            sub: "identity".to_string(),
            jti: "identity".to_string(),
            nbf: now - 7200,
            exp: now - 3600,
            video: RoomGrant::new("my-room").unwrap(),
        };
        let jwt = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            verify(&jwt, &test_credentials()),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_distinct_inputs_produce_distinct_tokens() {
        let a = issue("my-room", "alice", Duration::from_secs(3600)).unwrap();
        let b = issue("my-room", "bob", Duration::from_secs(3600)).unwrap();
        let c = issue("other-room", "alice", Duration::from_secs(3600)).unwrap();

        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_repeat_issuance_verifies_to_same_grant() {
        let a = issue("my-room", "identity", Duration::from_secs(3600)).unwrap();
        let b = issue("my-room", "identity", Duration::from_secs(3600)).unwrap();

        let ca = verify(&a, &test_credentials()).unwrap();
        let cb = verify(&b, &test_credentials()).unwrap();
        assert_eq!(ca.sub, cb.sub);
        assert_eq!(ca.video, cb.video);
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = ApiCredentials::new(TEST_KEY, "super-secret").unwrap();
        let debug = format!("{:?}", creds);

        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("super-secret"));
    }
}
