//! Identity-provider token validation configuration.
//!
//! Archiva does not issue tokens. The external identity provider signs
//! access tokens carrying the caller's permitted academic-program ids;
//! this section configures how those tokens are verified.

use serde::{Deserialize, Serialize};

/// Token validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret used to verify identity-provider signatures.
    pub token_secret: String,
    /// Expected `iss` claim value.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Clock skew leeway in seconds when validating `exp`.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

fn default_issuer() -> String {
    "archiva-idp".to_string()
}

fn default_leeway() -> u64 {
    5
}
