//! # Authentication Module
//!
//! Session bootstrap and hosted-login glue for the application core.
//!
//! ## Overview
//!
//! Two entry points compose the whole module:
//!
//! - [`session::load_flags`] runs once, before the application starts, and
//!   restores the persisted session (profile + token) plus the
//!   environment-derived configuration as the application's boot flags.
//! - [`AuthFlowController`] runs once the application is ready: it wires the
//!   start-login and logout ports to the identity provider and completes the
//!   redirect flow by parsing the URL fragment, publishing the outcome on
//!   the auth-result port.
//!
//! ## Features
//!
//! - Hosted-authorization (implicit flow) via [`HostedAuthProvider`]
//! - Injected capabilities throughout: storage, provider, page, HTTP
//! - Explicit redirect state machine ([`RedirectPhase`])
//! - No retries; every failure degrades to "no session" or "no action"

pub mod controller;
pub mod error;
pub mod hosted;
pub mod session;

pub use controller::{AuthFlowController, RedirectPhase, LOGIN_AUDIENCE};
pub use error::{AuthError, Result};
pub use hosted::HostedAuthProvider;
pub use session::{load_flags, BootFlags, PROFILE_KEY, TOKEN_KEY};
