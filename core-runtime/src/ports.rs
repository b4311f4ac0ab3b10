//! # Application Message Ports
//!
//! Named subscribe/publish channels between the auth bridge and the
//! application core, built on `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! The application and the bridge never call each other directly; they
//! exchange typed messages over three named ports:
//!
//! - `"start login"` (application → bridge): begin the hosted login redirect
//! - `"logout"` (application → bridge): clear the persisted session
//! - `"auth result"` (bridge → application): outcome of a completed redirect
//!   flow, published exactly once per redirect event
//!
//! ```text
//! ┌─────────────┐  start login / logout   ┌───────────┐
//! │ Application ├────────────────────────>│           │
//! │    core     │                         │  PortBus  │
//! │             │<────────────────────────┤           │
//! └─────────────┘       auth result       └───────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use core_runtime::ports::{AuthCommand, LoginOptions, PortBus};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let ports = PortBus::new(16);
//! let mut commands = ports.subscribe_commands();
//!
//! ports.send_command(AuthCommand::StartLogin(LoginOptions::default())).ok();
//!
//! let received = commands.recv().await.unwrap();
//! assert!(matches!(received, AuthCommand::StartLogin(_)));
//! # }
//! ```
//!
//! ## Error Handling
//!
//! The broadcast channel reports two receive errors: `Lagged(n)` when a slow
//! subscriber missed `n` messages (non-fatal, keep receiving) and `Closed`
//! when all senders are gone (shutdown signal).

use bridge_traits::identity::ProviderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used channel types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the port channels.
pub const DEFAULT_PORT_BUFFER_SIZE: usize = 16;

/// Name of the inbound port that starts a hosted login.
pub const PORT_START_LOGIN: &str = "start login";
/// Name of the inbound port that clears the session.
pub const PORT_LOGOUT: &str = "logout";
/// Name of the outbound port that carries redirect-flow outcomes.
pub const PORT_AUTH_RESULT: &str = "auth result";

/// Options accompanying a start-login command.
///
/// The redirect-path override is accepted for forward compatibility but the
/// controller does not currently forward it; the provider-configured
/// redirect URI is always used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginOptions {
    /// Path within the application to land on after login
    #[serde(default, rename = "redirectPath")]
    pub redirect_path: Option<String>,
}

/// Command received from the application over an inbound port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum AuthCommand {
    /// Begin the hosted login redirect
    StartLogin(LoginOptions),
    /// Clear the persisted session
    Logout,
}

impl AuthCommand {
    /// The name of the port this command arrives on.
    pub fn port_name(&self) -> &'static str {
        match self {
            AuthCommand::StartLogin(_) => PORT_START_LOGIN,
            AuthCommand::Logout => PORT_LOGOUT,
        }
    }
}

/// An authenticated user session: the provider profile plus the access token.
///
/// This is both what the redirect flow hands to the application and what is
/// persisted between runs.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    /// Raw profile blob as returned by the identity provider
    pub profile: serde_json::Value,
    /// Opaque access token issued by the provider
    pub token: String,
}

// The token must never leak through logs.
impl fmt::Debug for UserSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserSession")
            .field("profile", &self.profile)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Normalized identity-provider error forwarded to the application.
///
/// The three named fields are always present on the wire, serialized as
/// `null` when the provider's raw error omitted them. Remaining provider
/// fields are carried through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Provider-assigned error name
    pub name: Option<String>,
    /// Machine-readable error code
    pub code: Option<String>,
    /// HTTP status code, when applicable
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
    /// Any remaining provider-specific fields
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl From<ProviderError> for ErrorInfo {
    fn from(err: ProviderError) -> Self {
        let mut extra = err.extra;
        if let Some(description) = err.description {
            extra.insert(
                "description".to_string(),
                serde_json::Value::String(description),
            );
        }
        Self {
            name: err.name,
            code: err.code,
            status_code: err.status_code,
            extra,
        }
    }
}

/// Outcome of a completed redirect flow.
///
/// Exactly one of `err`/`ok` is non-null; both fields are always serialized
/// so the application sees an explicit `null` for the other side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResult {
    /// Set when the profile fetch failed after a successful hash parse
    pub err: Option<ErrorInfo>,
    /// Set when the login completed and a session was persisted
    pub ok: Option<UserSession>,
}

impl AuthResult {
    /// A successful outcome carrying the authenticated session.
    pub fn ok(session: UserSession) -> Self {
        Self {
            err: None,
            ok: Some(session),
        }
    }

    /// A failed outcome carrying the normalized provider error.
    pub fn err(info: ErrorInfo) -> Self {
        Self {
            err: Some(info),
            ok: None,
        }
    }

    /// Whether this result carries a session.
    pub fn is_ok(&self) -> bool {
        self.ok.is_some()
    }
}

/// Central hub for the three application ports.
///
/// Cloning is cheap; clones share the underlying channels. The bus is fully
/// thread-safe and can be shared across async tasks.
#[derive(Clone)]
pub struct PortBus {
    commands: broadcast::Sender<AuthCommand>,
    results: broadcast::Sender<AuthResult>,
}

impl PortBus {
    /// Create a port bus whose channels buffer up to `capacity` messages.
    pub fn new(capacity: usize) -> Self {
        let (commands, _) = broadcast::channel(capacity);
        let (results, _) = broadcast::channel(capacity);
        Self { commands, results }
    }

    /// Send a command from the application to the bridge.
    ///
    /// Returns the number of active subscribers, or an error when nobody is
    /// listening on the command ports.
    pub fn send_command(
        &self,
        command: AuthCommand,
    ) -> std::result::Result<usize, SendError<AuthCommand>> {
        tracing::debug!(port = command.port_name(), "Sending command");
        self.commands.send(command)
    }

    /// Subscribe to the inbound command ports.
    pub fn subscribe_commands(&self) -> Receiver<AuthCommand> {
        self.commands.subscribe()
    }

    /// Publish a redirect-flow outcome on the auth-result port.
    ///
    /// Returns the number of active subscribers, or an error when the
    /// application is not listening.
    pub fn publish_result(
        &self,
        result: AuthResult,
    ) -> std::result::Result<usize, SendError<AuthResult>> {
        tracing::debug!(port = PORT_AUTH_RESULT, ok = result.is_ok(), "Publishing result");
        self.results.send(result)
    }

    /// Subscribe to the auth-result port.
    pub fn subscribe_results(&self) -> Receiver<AuthResult> {
        self.results.subscribe()
    }
}

impl Default for PortBus {
    fn default() -> Self {
        Self::new(DEFAULT_PORT_BUFFER_SIZE)
    }
}
