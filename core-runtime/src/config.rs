//! # Environment Configuration
//!
//! Provides the environment-derived configuration the auth bridge consumes.
//!
//! ## Overview
//!
//! The host environment supplies four values at startup: the backend API
//! base URI, the identity provider's tenant domain, the public OAuth client
//! ID, and the application's own URL (used as the redirect target). The
//! configuration is immutable once built.
//!
//! Construction is builder-based with fail-fast validation, so a missing
//! value surfaces as an actionable error at startup rather than a broken
//! redirect later.
//!
//! ## Usage
//!
//! ### From process environment
//!
//! ```no_run
//! use core_runtime::config::EnvConfig;
//!
//! let config = EnvConfig::from_env().expect("incomplete environment");
//! ```
//!
//! ### Explicit construction
//!
//! ```
//! use core_runtime::config::EnvConfig;
//!
//! let config = EnvConfig::builder()
//!     .backend_uri("https://api.example.com")
//!     .auth_tenant("example.auth0.com")
//!     .auth_client_id("client-id")
//!     .app_url("https://app.example.com")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.auth_tenant, "example.auth0.com");
//! ```

use crate::error::{Error, Result};

/// Environment variable holding the backend API base URI.
pub const ENV_BACKEND_URI: &str = "QUIZ_API_URI";
/// Environment variable holding the identity provider tenant domain.
pub const ENV_AUTH_TENANT: &str = "AUTH0_TENANT";
/// Environment variable holding the OAuth client ID.
pub const ENV_AUTH_CLIENT_ID: &str = "AUTH0_CLIENT_ID";
/// Environment variable holding the application URL (redirect target).
pub const ENV_APP_URL: &str = "URL";

/// Immutable environment-derived configuration.
///
/// Owned by the host environment, read once at startup. None of the values
/// are secrets (the client ID is a public identifier), so `Debug` prints
/// them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    /// Backend API base URI, passed through to the application untouched
    pub backend_uri: String,

    /// Identity provider tenant domain (e.g. `example.auth0.com`)
    pub auth_tenant: String,

    /// OAuth client ID registered with the identity provider
    pub auth_client_id: String,

    /// The application's own URL; the provider redirects back here
    pub app_url: String,
}

impl EnvConfig {
    /// Start building a configuration.
    pub fn builder() -> EnvConfigBuilder {
        EnvConfigBuilder::default()
    }

    /// Read the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first missing variable.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        if let Ok(value) = std::env::var(ENV_BACKEND_URI) {
            builder = builder.backend_uri(value);
        }
        if let Ok(value) = std::env::var(ENV_AUTH_TENANT) {
            builder = builder.auth_tenant(value);
        }
        if let Ok(value) = std::env::var(ENV_AUTH_CLIENT_ID) {
            builder = builder.auth_client_id(value);
        }
        if let Ok(value) = std::env::var(ENV_APP_URL) {
            builder = builder.app_url(value);
        }

        builder.build()
    }
}

/// Builder for [`EnvConfig`] with fail-fast validation.
#[derive(Debug, Default)]
pub struct EnvConfigBuilder {
    backend_uri: Option<String>,
    auth_tenant: Option<String>,
    auth_client_id: Option<String>,
    app_url: Option<String>,
}

impl EnvConfigBuilder {
    /// Set the backend API base URI.
    pub fn backend_uri(mut self, value: impl Into<String>) -> Self {
        self.backend_uri = Some(value.into());
        self
    }

    /// Set the identity provider tenant domain.
    pub fn auth_tenant(mut self, value: impl Into<String>) -> Self {
        self.auth_tenant = Some(value.into());
        self
    }

    /// Set the OAuth client ID.
    pub fn auth_client_id(mut self, value: impl Into<String>) -> Self {
        self.auth_client_id = Some(value.into());
        self
    }

    /// Set the application URL.
    pub fn app_url(mut self, value: impl Into<String>) -> Self {
        self.app_url = Some(value.into());
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for the first missing or empty value, with
    /// a message naming the corresponding environment variable.
    pub fn build(self) -> Result<EnvConfig> {
        let backend_uri = Self::required(self.backend_uri, "backend URI", ENV_BACKEND_URI)?;
        let auth_tenant = Self::required(self.auth_tenant, "auth tenant", ENV_AUTH_TENANT)?;
        let auth_client_id =
            Self::required(self.auth_client_id, "auth client ID", ENV_AUTH_CLIENT_ID)?;
        let app_url = Self::required(self.app_url, "application URL", ENV_APP_URL)?;

        Ok(EnvConfig {
            backend_uri,
            auth_tenant,
            auth_client_id,
            app_url,
        })
    }

    fn required(value: Option<String>, what: &str, env_var: &str) -> Result<String> {
        match value {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(Error::Config(format!(
                "Missing {what}: set the {env_var} environment variable or provide it explicitly"
            ))),
        }
    }
}
