//! # Hosted Authorization Provider
//!
//! Concrete [`IdentityProvider`] for an Auth0-style hosted login using the
//! implicit flow (`response_type=token`).
//!
//! ## Flow
//!
//! 1. `authorize` builds the tenant's `/authorize` URL and navigates the
//!    page there. The browser leaves the application.
//! 2. The provider redirects back to the configured application URL with
//!    the response encoded in the URL fragment.
//! 3. `parse_hash` decodes that fragment into credentials or a provider
//!    error.
//! 4. `user_info` resolves the profile behind the access token via the
//!    tenant's `/userinfo` endpoint.
//!
//! The provider is stateless; every operation derives from the immutable
//! tenant configuration plus the injected HTTP and page capabilities.

use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use bridge_traits::identity::{AuthorizeRequest, IdentityProvider, ParsedHash, ProviderError};
use bridge_traits::page::RedirectPage;
use core_runtime::EnvConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};
use url::Url;

/// Hosted-authorization client for a single tenant.
pub struct HostedAuthProvider {
    tenant: String,
    client_id: String,
    redirect_uri: String,
    http: Arc<dyn HttpClient>,
    page: Arc<dyn RedirectPage>,
}

impl HostedAuthProvider {
    /// Create a provider from the environment configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Tenant domain, client ID, and redirect URI
    /// * `http` - HTTP client for the `/userinfo` call
    /// * `page` - Page capability used to navigate to the hosted login
    pub fn new(config: &EnvConfig, http: Arc<dyn HttpClient>, page: Arc<dyn RedirectPage>) -> Self {
        Self {
            tenant: config.auth_tenant.clone(),
            client_id: config.auth_client_id.clone(),
            redirect_uri: config.app_url.clone(),
            http,
            page,
        }
    }

    fn endpoint(&self, path: &str) -> BridgeResult<Url> {
        Url::parse(&format!("https://{}/{}", self.tenant, path))
            .map_err(|e| BridgeError::OperationFailed(format!("Invalid tenant domain: {e}")))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl IdentityProvider for HostedAuthProvider {
    /// Build the hosted-login URL and navigate the page to it.
    ///
    /// The redirect URI is always the provider-managed one from the
    /// configuration; `request.redirect_path` is not forwarded.
    #[instrument(skip(self))]
    async fn authorize(&self, request: AuthorizeRequest) -> BridgeResult<()> {
        let mut url = self.endpoint("authorize")?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", &self.client_id);
            query.append_pair("response_type", "token");
            query.append_pair("redirect_uri", &self.redirect_uri);
            query.append_pair("audience", &request.audience);
        }

        debug!(tenant = %self.tenant, "Navigating to hosted login");
        self.page.navigate(url.as_str()).await
    }

    async fn parse_hash(
        &self,
        fragment: &str,
    ) -> std::result::Result<Option<ParsedHash>, ProviderError> {
        let fragment = fragment.trim_start_matches('#');
        if fragment.is_empty() {
            return Ok(None);
        }

        // Fragments that are not form-encoded (plain anchors, app routes)
        // are unrelated to an authorization response.
        let fields: HashMap<String, String> = match serde_urlencoded::from_str(fragment) {
            Ok(fields) => fields,
            Err(_) => return Ok(None),
        };

        if let Some(error) = fields.get("error") {
            return Err(ProviderError {
                name: None,
                code: Some(error.clone()),
                status_code: None,
                description: fields.get("error_description").cloned(),
                extra: serde_json::Map::new(),
            });
        }

        let Some(access_token) = fields.get("access_token") else {
            return Ok(None);
        };

        Ok(Some(ParsedHash {
            access_token: access_token.clone(),
            token_type: fields.get("token_type").cloned(),
            expires_in: fields.get("expires_in").and_then(|v| v.parse().ok()),
            state: fields.get("state").cloned(),
        }))
    }

    async fn user_info(
        &self,
        access_token: &str,
    ) -> std::result::Result<serde_json::Value, ProviderError> {
        let url = self
            .endpoint("userinfo")
            .map_err(|e| ProviderError::new("invalid_endpoint", e.to_string()))?;

        let request = HttpRequest::new(HttpMethod::Get, url).bearer_token(access_token);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ProviderError::new("request_failed", e.to_string()))?;

        if !response.is_success() {
            let err = response
                .json::<ProviderError>()
                .unwrap_or_else(|_| ProviderError::new("userinfo_failed", "Profile fetch rejected"));
            return Err(err.with_status(response.status));
        }

        response
            .json()
            .map_err(|e| ProviderError::new("malformed_profile", e.to_string()))
    }
}
