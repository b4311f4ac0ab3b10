//! # Session Loader
//!
//! Reads the persisted session at startup and reports it, together with the
//! environment-derived configuration, as the application's boot flags.
//!
//! ## Storage layout
//!
//! The session is persisted as two independent string entries:
//!
//! | Key       | Contents                          |
//! |-----------|-----------------------------------|
//! | `profile` | Provider profile, JSON-serialized |
//! | `token`   | Access token, raw string          |
//!
//! A session is considered present only if BOTH entries exist and are
//! non-empty; absence of either yields no session. A profile entry that
//! fails to parse as JSON is treated as an absent session, never as a fatal
//! error.

use bridge_traits::SessionStore;
use core_runtime::{EnvConfig, UserSession};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{AuthError, Result};

/// Storage key holding the JSON-serialized profile.
pub const PROFILE_KEY: &str = "profile";
/// Storage key holding the raw access token.
pub const TOKEN_KEY: &str = "token";

/// Initial state handed to the application core at startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootFlags {
    /// The restored session, if a complete one was persisted
    pub user: Option<UserSession>,
    /// Backend API base URI, passed through verbatim from the environment
    #[serde(rename = "backendUri")]
    pub backend_uri: String,
}

/// Load the boot flags from storage and environment configuration.
///
/// Runs once, before the application starts. Never fails: an unreadable
/// store or a malformed profile entry degrades to `user: None`, so the
/// application always boots.
///
/// # Examples
///
/// ```ignore
/// use core_auth::session::load_flags;
///
/// let flags = load_flags(store.as_ref(), &config).await;
/// if flags.user.is_none() {
///     // application starts signed out
/// }
/// ```
pub async fn load_flags(store: &dyn SessionStore, config: &EnvConfig) -> BootFlags {
    info!("Loading persisted session");
    debug!(?config, "Environment configuration");

    let (profile, token) = match (store.get(PROFILE_KEY).await, store.get(TOKEN_KEY).await) {
        (Ok(profile), Ok(token)) => (profile, token),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "Session storage unreadable; starting signed out");
            (None, None)
        }
    };

    let user = match (profile, token) {
        (Some(profile), Some(token)) if !profile.is_empty() && !token.is_empty() => {
            match serde_json::from_str(&profile) {
                Ok(parsed) => Some(UserSession {
                    profile: parsed,
                    token,
                }),
                Err(e) => {
                    // Treat an unreadable profile as no session rather than
                    // refusing to start.
                    warn!(error = %e, "Stored profile is not valid JSON; discarding session");
                    None
                }
            }
        }
        _ => None,
    };

    BootFlags {
        user,
        backend_uri: config.backend_uri.clone(),
    }
}

/// Persist a session as the two storage entries.
pub async fn persist_session(store: &dyn SessionStore, session: &UserSession) -> Result<()> {
    let profile = serde_json::to_string(&session.profile)
        .map_err(|e| AuthError::MalformedSession(e.to_string()))?;

    store.set(PROFILE_KEY, &profile).await?;
    store.set(TOKEN_KEY, &session.token).await?;

    debug!("Persisted session");
    Ok(())
}

/// Remove both session entries. Idempotent.
pub async fn clear_session(store: &dyn SessionStore) -> Result<()> {
    store.remove(PROFILE_KEY).await?;
    store.remove(TOKEN_KEY).await?;

    debug!("Cleared session");
    Ok(())
}
