//! # Auth Flow Controller
//!
//! Wires the application's message ports to the identity provider and the
//! session storage, and completes the redirect flow once at startup.
//!
//! ## Wirings
//!
//! 1. **Login command** — each `"start login"` command triggers the hosted
//!    authorization redirect with a fixed audience. The navigation abandons
//!    the page; the flow resumes through the redirect fragment after the
//!    browser returns.
//! 2. **Logout command** — each `"logout"` command clears both session
//!    entries. No confirmation is sent back.
//! 3. **Redirect completion** — once, at startup, the current URL fragment
//!    is parsed. A completed parse publishes exactly one [`AuthResult`] on
//!    the `"auth result"` port and clears the fragment so a refresh does not
//!    replay the login.
//!
//! ## Redirect state machine
//!
//! ```text
//! Idle → ParsingHash → { Failed          (terminal, silent)
//!                      | NoResult        (terminal, silent)
//!                      | FetchingProfile → Completed (terminal, result sent) }
//! ```
//!
//! A hash-parse error is logged and published nowhere; only profile-fetch
//! failures travel back over the auth-result port. This asymmetry is carried
//! over from the original behavior on purpose.
//!
//! No retries anywhere: every failure degrades to "no session" or
//! "no action", never to a crash.

use bridge_traits::identity::{AuthorizeRequest, IdentityProvider};
use bridge_traits::page::RedirectPage;
use bridge_traits::storage::SessionStore;
use core_runtime::ports::{
    AuthCommand, AuthResult, ErrorInfo, PortBus, RecvError, PORT_AUTH_RESULT, PORT_START_LOGIN,
};
use core_runtime::UserSession;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

use crate::error::Result;
use crate::session;

/// Audience requested for every hosted login.
pub const LOGIN_AUDIENCE: &str = "https://auth0-jwt-authorizer";

/// Phase of the one-shot redirect completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectPhase {
    /// Nothing has run yet
    Idle,
    /// The URL fragment is being parsed
    ParsingHash,
    /// The fragment carried credentials; the profile fetch is in flight
    FetchingProfile,
    /// The fragment parse failed; nothing was published
    Failed,
    /// The fragment carried no authorization response; nothing was published
    NoResult,
    /// A result (ok or err) was published on the auth-result port
    Completed,
}

impl RedirectPhase {
    /// Whether the flow has reached a final phase.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RedirectPhase::Failed | RedirectPhase::NoResult | RedirectPhase::Completed
        )
    }

    fn advance(self, next: RedirectPhase) -> RedirectPhase {
        trace!(from = %self, to = %next, "Redirect phase transition");
        next
    }
}

impl fmt::Display for RedirectPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RedirectPhase::Idle => "idle",
            RedirectPhase::ParsingHash => "parsing-hash",
            RedirectPhase::FetchingProfile => "fetching-profile",
            RedirectPhase::Failed => "failed",
            RedirectPhase::NoResult => "no-result",
            RedirectPhase::Completed => "completed",
        };
        write!(f, "{name}")
    }
}

/// Glue between the application ports, the identity provider, the session
/// storage, and the current page.
///
/// Constructed once after the application is ready; [`run`](Self::run)
/// completes the redirect flow and then serves commands until the
/// application side of the port bus is dropped.
pub struct AuthFlowController {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn SessionStore>,
    page: Arc<dyn RedirectPage>,
    ports: PortBus,
}

impl AuthFlowController {
    /// Create a controller over the injected capabilities.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn SessionStore>,
        page: Arc<dyn RedirectPage>,
        ports: PortBus,
    ) -> Self {
        Self {
            provider,
            store,
            page,
            ports,
        }
    }

    /// Complete the redirect flow, then serve commands until shutdown.
    ///
    /// The command subscription is taken before the redirect completion
    /// starts, so commands issued while the profile fetch is in flight are
    /// buffered and served afterwards.
    ///
    /// Redirect-completion failures are logged, never fatal: the controller
    /// keeps serving login/logout commands regardless.
    pub async fn run(self) -> Result<()> {
        let mut commands = self.ports.subscribe_commands();

        match self.complete_redirect().await {
            Ok(phase) => debug!(%phase, "Redirect completion finished"),
            Err(e) => error!(error = %e, "Redirect completion failed"),
        }

        loop {
            match commands.recv().await {
                Ok(command) => self.handle_command(command).await,
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "Command subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }

        debug!("Command ports closed; controller stopping");
        Ok(())
    }

    /// Handle a single command from the application.
    pub async fn handle_command(&self, command: AuthCommand) {
        match command {
            AuthCommand::StartLogin(options) => {
                info!(
                    port = PORT_START_LOGIN,
                    redirect_path = ?options.redirect_path,
                    "Starting hosted login"
                );
                // The redirect-path override is not forwarded; the
                // provider-managed redirect URI is always used.
                let request = AuthorizeRequest::with_audience(LOGIN_AUDIENCE);
                if let Err(e) = self.provider.authorize(request).await {
                    error!(error = %e, "Hosted login redirect failed");
                }
            }
            AuthCommand::Logout => {
                if let Err(e) = session::clear_session(self.store.as_ref()).await {
                    error!(error = %e, "Logout failed to clear session");
                }
            }
        }
    }

    /// Parse the current URL fragment and, when it carries an authorization
    /// response, finish the login.
    ///
    /// Runs once at startup. Returns the terminal [`RedirectPhase`].
    pub async fn complete_redirect(&self) -> Result<RedirectPhase> {
        let phase = RedirectPhase::Idle;

        let fragment = self
            .page
            .current_fragment()
            .await?
            .unwrap_or_default();

        let phase = phase.advance(RedirectPhase::ParsingHash);
        let parsed = match self.provider.parse_hash(&fragment).await {
            Ok(Some(parsed)) => parsed,
            Ok(None) => return Ok(phase.advance(RedirectPhase::NoResult)),
            Err(e) => {
                // Intentionally silent on the auth-result port; only the log
                // records the failed attempt.
                error!(error = %e, "Redirect fragment parse failed");
                return Ok(phase.advance(RedirectPhase::Failed));
            }
        };

        let phase = phase.advance(RedirectPhase::FetchingProfile);
        let token = parsed.access_token;
        let result = match self.provider.user_info(&token).await {
            Ok(profile) => {
                let session = UserSession { profile, token };
                session::persist_session(self.store.as_ref(), &session).await?;
                AuthResult::ok(session)
            }
            Err(e) => {
                warn!(error = %e, "Profile fetch failed after redirect");
                AuthResult::err(ErrorInfo::from(e))
            }
        };

        if self.ports.publish_result(result).is_err() {
            warn!(port = PORT_AUTH_RESULT, "No subscriber on auth-result port");
        }

        self.page.clear_fragment().await?;
        Ok(phase.advance(RedirectPhase::Completed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use async_trait::async_trait;
    use bridge_desktop::page::ManualRedirectPage;
    use bridge_desktop::storage::MemorySessionStore;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::identity::{ParsedHash, ProviderError};
    use core_runtime::LoginOptions;
    use mockall::mock;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Store whose writes always fail, as when the backing storage is full
    /// or access is revoked.
    struct FailingSessionStore;

    #[async_trait]
    impl SessionStore for FailingSessionStore {
        async fn get(&self, _key: &str) -> BridgeResult<Option<String>> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &str) -> BridgeResult<()> {
            Err(BridgeError::OperationFailed("storage unavailable".to_string()))
        }

        async fn remove(&self, _key: &str) -> BridgeResult<()> {
            Ok(())
        }
    }

    mock! {
        Provider {}

        #[async_trait]
        impl IdentityProvider for Provider {
            async fn authorize(&self, request: AuthorizeRequest) -> BridgeResult<()>;
            async fn parse_hash(
                &self,
                fragment: &str,
            ) -> std::result::Result<Option<ParsedHash>, ProviderError>;
            async fn user_info(
                &self,
                access_token: &str,
            ) -> std::result::Result<serde_json::Value, ProviderError>;
        }
    }

    fn controller_with(
        provider: MockProvider,
        store: Arc<MemorySessionStore>,
        page: Arc<ManualRedirectPage>,
        ports: PortBus,
    ) -> AuthFlowController {
        AuthFlowController::new(Arc::new(provider), store, page, ports)
    }

    fn token_hash() -> ParsedHash {
        ParsedHash {
            access_token: "tok-1".to_string(),
            token_type: Some("Bearer".to_string()),
            expires_in: Some(7200),
            state: None,
        }
    }

    #[tokio::test]
    async fn test_login_command_authorizes_with_fixed_audience() {
        let mut provider = MockProvider::new();
        provider
            .expect_authorize()
            .withf(|request| request.audience == LOGIN_AUDIENCE)
            .times(1)
            .returning(|_| Ok(()));

        let controller = controller_with(
            provider,
            Arc::new(MemorySessionStore::new()),
            Arc::new(ManualRedirectPage::new()),
            PortBus::new(4),
        );

        controller
            .handle_command(AuthCommand::StartLogin(LoginOptions::default()))
            .await;
    }

    #[tokio::test]
    async fn test_logout_command_clears_storage() {
        let store = Arc::new(MemorySessionStore::new());
        store.set(session::PROFILE_KEY, "{}").await.unwrap();
        store.set(session::TOKEN_KEY, "tok").await.unwrap();

        let controller = controller_with(
            MockProvider::new(),
            store.clone(),
            Arc::new(ManualRedirectPage::new()),
            PortBus::new(4),
        );

        controller.handle_command(AuthCommand::Logout).await;
        controller.handle_command(AuthCommand::Logout).await;

        assert_eq!(store.get(session::PROFILE_KEY).await.unwrap(), None);
        assert_eq!(store.get(session::TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_redirect_no_fragment_is_no_result() {
        let mut provider = MockProvider::new();
        provider
            .expect_parse_hash()
            .returning(|_| Ok(None));

        let ports = PortBus::new(4);
        let mut results = ports.subscribe_results();

        let controller = controller_with(
            provider,
            Arc::new(MemorySessionStore::new()),
            Arc::new(ManualRedirectPage::new()),
            ports,
        );

        let phase = controller.complete_redirect().await.unwrap();
        assert_eq!(phase, RedirectPhase::NoResult);
        assert!(phase.is_terminal());
        assert!(results.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_redirect_parse_error_publishes_nothing() {
        let mut provider = MockProvider::new();
        provider
            .expect_parse_hash()
            .returning(|_| Err(ProviderError::new("invalid_hash", "bad fragment")));

        let ports = PortBus::new(4);
        let mut results = ports.subscribe_results();
        let page = Arc::new(ManualRedirectPage::new());
        page.set_fragment("error=invalid_hash");

        let controller = controller_with(
            provider,
            Arc::new(MemorySessionStore::new()),
            page.clone(),
            ports,
        );

        let phase = controller.complete_redirect().await.unwrap();
        assert_eq!(phase, RedirectPhase::Failed);
        assert!(results.try_recv().is_err());
        // The fragment is only cleared on a completed parse.
        assert!(page.current_fragment().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_redirect_success_publishes_ok_and_persists() {
        let mut provider = MockProvider::new();
        provider
            .expect_parse_hash()
            .withf(|fragment| fragment.contains("access_token"))
            .returning(|_| Ok(Some(token_hash())));
        provider
            .expect_user_info()
            .withf(|token| token == "tok-1")
            .returning(|_| Ok(json!({"sub": "user-1"})));

        let ports = PortBus::new(4);
        let mut results = ports.subscribe_results();
        let store = Arc::new(MemorySessionStore::new());
        let page = Arc::new(ManualRedirectPage::new());
        page.set_fragment("access_token=tok-1&token_type=Bearer");

        let controller = controller_with(provider, store.clone(), page.clone(), ports);

        let phase = controller.complete_redirect().await.unwrap();
        assert_eq!(phase, RedirectPhase::Completed);

        let result = results.try_recv().unwrap();
        let session = result.ok.expect("result should carry a session");
        assert_eq!(result.err, None);
        assert_eq!(session.profile, json!({"sub": "user-1"}));
        assert_eq!(session.token, "tok-1");
        // Exactly one result.
        assert!(results.try_recv().is_err());

        // Persisted session matches the published one.
        assert_eq!(
            store.get(session::PROFILE_KEY).await.unwrap().unwrap(),
            r#"{"sub":"user-1"}"#
        );
        assert_eq!(
            store.get(session::TOKEN_KEY).await.unwrap().unwrap(),
            "tok-1"
        );

        // Fragment cleared so a refresh does not replay the login.
        assert_eq!(page.current_fragment().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_redirect_profile_fetch_failure_publishes_err_without_persisting() {
        let mut provider = MockProvider::new();
        provider
            .expect_parse_hash()
            .returning(|_| Ok(Some(token_hash())));
        provider.expect_user_info().returning(|_| {
            Err(ProviderError::new("invalid_token", "expired").with_status(401))
        });

        let ports = PortBus::new(4);
        let mut results = ports.subscribe_results();
        let store = Arc::new(MemorySessionStore::new());
        let page = Arc::new(ManualRedirectPage::new());
        page.set_fragment("access_token=tok-1");

        let controller = controller_with(provider, store.clone(), page.clone(), ports);

        let phase = controller.complete_redirect().await.unwrap();
        assert_eq!(phase, RedirectPhase::Completed);

        let result = results.try_recv().unwrap();
        assert_eq!(result.ok, None);
        let err = result.err.expect("result should carry an error");
        assert_eq!(err.code.as_deref(), Some("invalid_token"));
        assert_eq!(err.status_code, Some(401));
        assert!(results.try_recv().is_err());

        assert_eq!(store.get(session::PROFILE_KEY).await.unwrap(), None);
        assert_eq!(store.get(session::TOKEN_KEY).await.unwrap(), None);

        // The fragment is still cleared once a response was present.
        assert_eq!(page.current_fragment().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_redirect_persist_failure_surfaces_as_error() {
        let mut provider = MockProvider::new();
        provider
            .expect_parse_hash()
            .returning(|_| Ok(Some(token_hash())));
        provider
            .expect_user_info()
            .returning(|_| Ok(json!({"sub": "user-1"})));

        let ports = PortBus::new(4);
        let mut results = ports.subscribe_results();
        let page = Arc::new(ManualRedirectPage::new());
        page.set_fragment("access_token=tok-1");

        let controller = AuthFlowController::new(
            Arc::new(provider),
            Arc::new(FailingSessionStore),
            page,
            ports,
        );

        let err = controller.complete_redirect().await.unwrap_err();
        assert!(matches!(err, AuthError::Bridge(_)));
        // Nothing was published for the failed persist.
        assert!(results.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_run_survives_persist_failure_and_keeps_serving_commands() {
        let authorized = Arc::new(AtomicBool::new(false));
        let flag = authorized.clone();

        let mut provider = MockProvider::new();
        provider
            .expect_parse_hash()
            .returning(|_| Ok(Some(token_hash())));
        provider
            .expect_user_info()
            .returning(|_| Ok(json!({"sub": "user-1"})));
        provider.expect_authorize().returning(move |_| {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        let ports = PortBus::new(4);
        let page = Arc::new(ManualRedirectPage::new());
        page.set_fragment("access_token=tok-1");

        let controller = AuthFlowController::new(
            Arc::new(provider),
            Arc::new(FailingSessionStore),
            page,
            ports.clone(),
        );

        let task = tokio::spawn(controller.run());

        let mut sent = false;
        for _ in 0..1000 {
            if !sent {
                sent = ports
                    .send_command(AuthCommand::StartLogin(LoginOptions::default()))
                    .is_ok();
            }
            if authorized.load(Ordering::SeqCst) {
                break;
            }
            tokio::task::yield_now().await;
        }

        assert!(
            authorized.load(Ordering::SeqCst),
            "login command not served after persist failure"
        );
        task.abort();
    }

    #[test]
    fn test_phase_display_and_terminality() {
        assert_eq!(RedirectPhase::Idle.to_string(), "idle");
        assert_eq!(RedirectPhase::Completed.to_string(), "completed");
        assert!(!RedirectPhase::Idle.is_terminal());
        assert!(!RedirectPhase::ParsingHash.is_terminal());
        assert!(!RedirectPhase::FetchingProfile.is_terminal());
        assert!(RedirectPhase::Failed.is_terminal());
        assert!(RedirectPhase::NoResult.is_terminal());
        assert!(RedirectPhase::Completed.is_terminal());
    }
}
