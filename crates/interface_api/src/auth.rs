//! Bearer token handling
//!
//! Tokens are HS256 JWTs carrying the user id, username and role. A valid
//! token becomes a [`Session`]; issuing tokens for real users happens
//! elsewhere, so [`create_token`] exists for operators and tests.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use core_kernel::{Actor, Role, Session, UserId};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user UUID)
    pub sub: String,
    /// Username
    pub name: String,
    /// `STAFF` or `VISITOR`
    pub role: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// Creates a new JWT token
///
/// # Arguments
///
/// * `user_id` - User identifier
/// * `username` - Display name carried into the session
/// * `role` - `Role::Staff` or `Role::Visitor`
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    user_id: UserId,
    username: &str,
    role: Role,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    if role == Role::Guest {
        return Err(AuthError::UnknownRole(role.to_string()));
    }

    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: user_id.as_uuid().to_string(),
        name: username.to_string(),
        role: role.as_str().to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Turns validated claims into the session handed to the gateway
pub fn session_from_claims(claims: &Claims) -> Result<Session, AuthError> {
    let id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;
    let actor = Actor::new(UserId::from_uuid(id), claims.name.clone());

    match claims.role.to_ascii_uppercase().as_str() {
        "STAFF" => Ok(Session::Staff(actor)),
        "VISITOR" => Ok(Session::Visitor(actor)),
        other => Err(AuthError::UnknownRole(other.to_string())),
    }
}
