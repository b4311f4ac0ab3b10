//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the auth core and platform-specific
//! implementations. Each trait represents a capability the core requires but
//! that must be implemented differently per platform (web, desktop, tests).
//!
//! ## Traits
//!
//! ### Identity & Networking
//! - [`IdentityProvider`](identity::IdentityProvider) - Hosted authorization, fragment parsing, profile lookup
//! - [`HttpClient`](http::HttpClient) - Async HTTP operations with TLS
//!
//! ### Storage & Page
//! - [`SessionStore`](storage::SessionStore) - Key-value persistence for the session entries
//! - [`RedirectPage`](page::RedirectPage) - URL fragment access and navigation
//!
//! ## Platform Requirements
//!
//! Each supported platform must ship concrete adapters for every required bridge trait:
//!
//! | Platform | Implementation Crate |
//! |----------|---------------------|
//! | Web      | `bridge-web`        |
//! | Desktop / tests | `bridge-desktop` |
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type, except
//! the identity provider's parse and profile operations, which report
//! structured [`ProviderError`](identity::ProviderError)s so the core can
//! normalize and forward them to the application.
//!
//! ## Thread Safety
//!
//! Bridge traits are bound by [`PlatformSendSync`](platform::PlatformSendSync):
//! `Send + Sync` on native targets, relaxed on `wasm32` where browser objects
//! are single-threaded.

pub mod error;
pub mod http;
pub mod identity;
pub mod page;
pub mod platform;
pub mod storage;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use identity::{AuthorizeRequest, IdentityProvider, ParsedHash, ProviderError};
pub use page::RedirectPage;
pub use storage::SessionStore;
