//! JWT service for session token generation and validation
//!
//! Tokens are HS256-signed with a shared secret and carry the account,
//! gender and email of the user they were issued to. They are stateless:
//! there is no server-side store and no revocation list, so a token stays
//! valid until its `exp` claim passes or the secret changes.

use anyhow::Result;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::models::User;

/// Default token lifetime: 7 days
pub const DEFAULT_TOKEN_EXPIRY: u64 = 7 * 24 * 60 * 60;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared signing secret
    pub secret: String,
    /// Token expiration time in seconds (default: 7 days)
    pub token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Shared secret used to sign and verify tokens
    /// - `JWT_TOKEN_EXPIRY`: Token expiry in seconds (default: 604800)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let token_expiry = std::env::var("JWT_TOKEN_EXPIRY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_EXPIRY);

        Ok(JwtConfig {
            secret,
            token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Account of the user the token was issued to
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub email: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Reasons a token is refused
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token does not identify an account")]
    MissingAccount,

    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("failed to read the system clock")]
    Clock,
}

/// JWT service
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl TokenService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Result<Self> {
        if config.secret.trim().is_empty() {
            anyhow::bail!("JWT secret must not be empty");
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(TokenService {
            encoding_key,
            decoding_key,
            validation,
            config,
        })
    }

    /// Issue a session token for a user
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let now = now_secs()?;

        let claims = Claims {
            account: user.account.clone(),
            gender: user.gender.clone(),
            email: user.email.clone(),
            iat: now,
            exp: now + self.config.token_expiry,
        };

        self.sign(&claims)
    }

    /// Sign an arbitrary claim set
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(TokenError::Invalid)
    }

    /// Validate a token and return the claims
    ///
    /// Rejects bad signatures, expired tokens, and payloads without an account.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e),
                }
            })?;

        if token_data.claims.account.trim().is_empty() {
            return Err(TokenError::MissingAccount);
        }

        Ok(token_data.claims)
    }

    /// Get the token expiry time in seconds
    pub fn token_expiry(&self) -> u64 {
        self.config.token_expiry
    }
}

fn now_secs() -> Result<u64, TokenError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| TokenError::Clock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serial_test::serial;

    fn service(secret: &str) -> TokenService {
        TokenService::new(JwtConfig {
            secret: secret.to_string(),
            token_expiry: DEFAULT_TOKEN_EXPIRY,
        })
        .unwrap()
    }

    fn student() -> User {
        User {
            id: 1,
            account: "s1120345".to_string(),
            username: "Lin".to_string(),
            gender: "female".to_string(),
            email: "lin@example.edu".to_string(),
            password_hash: String::new(),
            picture: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issued_token_round_trips_identity() {
        let tokens = service("test-secret");
        let token = tokens.issue(&student()).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.account, "s1120345");
        assert_eq!(claims.gender, "female");
        assert_eq!(claims.email, "lin@example.edu");
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_EXPIRY);
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let tokens = service("test-secret");
        let token = tokens.issue(&student()).unwrap();
        let forged = tokens
            .sign(&Claims {
                account: "someone_else".to_string(),
                ..tokens.verify(&token).unwrap()
            })
            .unwrap();

        // Splice the forged payload onto the original signature
        let original: Vec<&str> = token.split('.').collect();
        let forged: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", original[0], forged[1], original[2]);

        assert!(matches!(
            tokens.verify(&spliced),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = service("secret-a").issue(&student()).unwrap();
        assert!(matches!(
            service("secret-b").verify(&token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = service("test-secret");
        let now = now_secs().unwrap();
        let token = tokens
            .sign(&Claims {
                account: "s1120345".to_string(),
                gender: String::new(),
                email: String::new(),
                iat: now - 120,
                exp: now - 60,
            })
            .unwrap();

        assert!(matches!(tokens.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_missing_account_is_rejected() {
        let tokens = service("test-secret");
        let now = now_secs().unwrap();

        #[derive(Serialize)]
        struct Anonymous {
            email: String,
            iat: u64,
            exp: u64,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &Anonymous {
                email: "nobody@example.edu".to_string(),
                iat: now,
                exp: now + 60,
            },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            tokens.verify(&token),
            Err(TokenError::MissingAccount)
        ));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(service("test-secret").verify("not.a.token").is_err());
        assert!(service("test-secret").verify("").is_err());
    }

    #[test]
    fn test_empty_secret_is_refused() {
        assert!(
            TokenService::new(JwtConfig {
                secret: "  ".to_string(),
                token_expiry: 60,
            })
            .is_err()
        );
    }

    #[test]
    #[serial]
    fn test_jwt_config_from_env() {
        unsafe {
            std::env::set_var("JWT_SECRET", "from-env");
            std::env::remove_var("JWT_TOKEN_EXPIRY");
        }

        let config = JwtConfig::from_env().unwrap();
        assert_eq!(config.secret, "from-env");
        assert_eq!(config.token_expiry, DEFAULT_TOKEN_EXPIRY);

        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
        assert!(JwtConfig::from_env().is_err());
    }
}
