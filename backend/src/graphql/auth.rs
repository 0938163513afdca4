//! Caller identity for GraphQL operations
//!
//! Sessions are issued elsewhere; this service only verifies the bearer JWT attached to a
//! request and exposes the caller id to resolvers. A request without a valid token runs
//! anonymously, it is never rejected here.

use async_graphql::Context;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Caller extracted from a verified JWT, attached to the request data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: Option<String>,
}

/// Claims we read from access tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Token subject is not a user id: {0}")]
    Subject(String),
}

/// Verify an HS256 JWT and extract the caller
pub fn verify_token(token: &str, secret: &str) -> Result<AuthUser, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.validate_aud = false;

    let token_data = decode::<AccessTokenClaims>(
        token,
        &DecodingKey::from_secret(secret.trim().as_bytes()),
        &validation,
    )?;

    let user_id = token_data
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| TokenError::Subject(token_data.claims.sub.clone()))?;

    Ok(AuthUser {
        user_id,
        email: token_data.claims.email,
    })
}

/// Extension trait to read the caller from GraphQL context
pub trait AuthExt {
    /// The verified caller, if the request carried a valid token
    fn try_auth_user(&self) -> Option<&AuthUser>;

    /// Shorthand for the caller's id
    fn caller_id(&self) -> Option<i64> {
        self.try_auth_user().map(|user| user.user_id)
    }
}

impl<'a> AuthExt for Context<'a> {
    fn try_auth_user(&self) -> Option<&AuthUser> {
        self.data_opt::<AuthUser>()
    }
}
