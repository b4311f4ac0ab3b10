//! Identity Provider Abstraction
//!
//! Models the hosted-authorization boundary: starting a login redirect,
//! parsing the returned URL fragment, and fetching the user profile with the
//! obtained access token.
//!
//! The provider is injected as a capability rather than referenced as an
//! ambient SDK object, so the auth flow can be driven against test doubles.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::platform::PlatformSendSync;

/// Parameters for starting a hosted-authorization redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizeRequest {
    /// Audience the issued access token is intended for
    pub audience: String,
    /// Optional path to land on after the provider redirects back.
    /// Providers may ignore this and use their configured redirect URI.
    pub redirect_path: Option<String>,
}

impl AuthorizeRequest {
    /// Create a request for the given audience with no redirect override.
    pub fn with_audience(audience: impl Into<String>) -> Self {
        Self {
            audience: audience.into(),
            redirect_path: None,
        }
    }
}

/// Credentials extracted from a redirect-callback URL fragment.
///
/// Produced by [`IdentityProvider::parse_hash`] when the fragment carries a
/// completed implicit-flow response.
#[derive(Clone, PartialEq, Eq)]
pub struct ParsedHash {
    /// Opaque access token issued by the provider
    pub access_token: String,
    /// Token type reported by the provider (usually `Bearer`)
    pub token_type: Option<String>,
    /// Token lifetime in seconds, if reported
    pub expires_in: Option<u64>,
    /// Opaque state parameter echoed back by the provider
    pub state: Option<String>,
}

// Access tokens must never leak through logs.
impl fmt::Debug for ParsedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedHash")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("state", &self.state)
            .finish()
    }
}

/// Structured error reported by the identity provider.
///
/// The three named fields mirror what provider SDKs commonly attach to their
/// errors; any of them may be missing on the wire. Additional provider fields
/// are preserved in `extra` so the application can inspect them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderError {
    /// Provider-assigned error name (e.g. `invalid_token`)
    pub name: Option<String>,
    /// Machine-readable error code
    pub code: Option<String>,
    /// HTTP status code, when the error originated from an HTTP call
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
    /// Human-readable description, when provided
    pub description: Option<String>,
    /// Any remaining provider-specific fields
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProviderError {
    /// Create an error carrying only a code and description.
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Attach an HTTP status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.code.as_deref().unwrap_or("unknown");
        match (&self.description, self.status_code) {
            (Some(desc), Some(status)) => {
                write!(f, "provider error {code} (HTTP {status}): {desc}")
            }
            (Some(desc), None) => write!(f, "provider error {code}: {desc}"),
            (None, Some(status)) => write!(f, "provider error {code} (HTTP {status})"),
            (None, None) => write!(f, "provider error {code}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Hosted identity provider boundary.
///
/// The three operations map onto the provider SDK surface the auth flow
/// needs: `authorize` starts the hosted login redirect, `parse_hash`
/// interprets the fragment the provider redirected back with, and
/// `user_info` resolves the profile behind an access token.
///
/// `authorize` navigates the current page away and therefore has no
/// meaningful return value beyond transport errors; the flow resumes through
/// `parse_hash` after the browser returns.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait IdentityProvider: PlatformSendSync {
    /// Begin the hosted-authorization redirect.
    async fn authorize(&self, request: AuthorizeRequest) -> Result<()>;

    /// Parse a redirect-callback URL fragment.
    ///
    /// Returns `Ok(None)` when the fragment is absent or unrelated to an
    /// authorization response, `Ok(Some(_))` when it carries credentials,
    /// and `Err(_)` when the provider reported a login failure.
    async fn parse_hash(
        &self,
        fragment: &str,
    ) -> std::result::Result<Option<ParsedHash>, ProviderError>;

    /// Fetch the user profile associated with an access token.
    ///
    /// The profile is returned as the provider's raw JSON blob; the core
    /// does not interpret its shape.
    async fn user_info(
        &self,
        access_token: &str,
    ) -> std::result::Result<serde_json::Value, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_hash_debug_redacts_token() {
        let hash = ParsedHash {
            access_token: "secret-token".to_string(),
            token_type: Some("Bearer".to_string()),
            expires_in: Some(7200),
            state: None,
        };
        let debug = format!("{:?}", hash);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::new("invalid_token", "token expired").with_status(401);
        let msg = err.to_string();
        assert!(msg.contains("invalid_token"));
        assert!(msg.contains("401"));
        assert!(msg.contains("token expired"));

        let bare = ProviderError::default();
        assert_eq!(bare.to_string(), "provider error unknown");
    }

    #[test]
    fn test_provider_error_serialization_keeps_extra_fields() {
        let raw = serde_json::json!({
            "code": "unauthorized",
            "statusCode": 403,
            "errorDescription": "blocked"
        });
        let err: ProviderError = serde_json::from_value(raw).unwrap();
        assert_eq!(err.code.as_deref(), Some("unauthorized"));
        assert_eq!(err.status_code, Some(403));
        assert!(err.extra.contains_key("errorDescription"));
        assert_eq!(err.name, None);
    }

    #[test]
    fn test_authorize_request_with_audience() {
        let request = AuthorizeRequest::with_audience("https://api.example.com");
        assert_eq!(request.audience, "https://api.example.com");
        assert!(request.redirect_path.is_none());
    }
}
