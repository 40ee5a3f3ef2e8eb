//! `AuthUser` extractor — validates the identity-provider bearer token
//! and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use archiva_core::config::auth::AuthConfig;
use archiva_core::error::AppError;
use archiva_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Claims of an identity-provider access token.
///
/// Archiva never issues these tokens; it only verifies the signature and
/// reads the caller's program scope from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Stable subject identifier.
    pub sub: String,
    /// Display name of the caller.
    #[serde(default)]
    pub name: Option<String>,
    /// Academic programs the caller may see.
    #[serde(default)]
    pub programs: Vec<i64>,
    /// Issuer.
    pub iss: String,
    /// Expiry (seconds since epoch).
    pub exp: u64,
    /// Issued-at (seconds since epoch).
    #[serde(default)]
    pub iat: u64,
}

/// Decodes and validates a bearer token against the configured issuer
/// and shared secret.
pub fn verify_token(token: &str, config: &AuthConfig) -> Result<TokenClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.leeway = config.leeway_seconds;

    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.token_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::with_source(archiva_core::error::ErrorKind::Unauthorized, "Invalid token", e))
}

/// Extracted authenticated caller context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let claims = verify_token(token, &state.config.auth)?;

        let username = claims.name.unwrap_or_else(|| claims.sub.clone());
        let ctx = RequestContext::new(claims.sub, username, claims.programs);

        Ok(AuthUser(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn config() -> AuthConfig {
        AuthConfig {
            token_secret: "test-secret".to_string(),
            issuer: "archiva-idp".to_string(),
            leeway_seconds: 5,
        }
    }

    fn sign(claims: &TokenClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims() -> TokenClaims {
        TokenClaims {
            sub: "u-17".to_string(),
            name: Some("Ana".to_string()),
            programs: vec![3, 7],
            iss: "archiva-idp".to_string(),
            exp: jsonwebtoken::get_current_timestamp() + 3600,
            iat: jsonwebtoken::get_current_timestamp(),
        }
    }

    #[test]
    fn valid_token_yields_claims() {
        let token = sign(&claims(), "test-secret");
        let decoded = verify_token(&token, &config()).unwrap();
        assert_eq!(decoded.sub, "u-17");
        assert_eq!(decoded.programs, vec![3, 7]);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign(&claims(), "other-secret");
        assert!(verify_token(&token, &config()).is_err());
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let mut c = claims();
        c.iss = "someone-else".to_string();
        let token = sign(&c, "test-secret");
        assert!(verify_token(&token, &config()).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut c = claims();
        c.exp = jsonwebtoken::get_current_timestamp() - 3600;
        let token = sign(&c, "test-secret");
        assert!(verify_token(&token, &config()).is_err());
    }
}
