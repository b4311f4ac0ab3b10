//! # Web Bridge Implementations
//!
//! Browser implementations of the bridge traits defined in `bridge-traits`,
//! using browser APIs through `web-sys` and `wasm-bindgen`.
//!
//! # Platform Support
//!
//! This crate is designed exclusively for the `wasm32-unknown-unknown`
//! target. It compiles to nothing on native targets.
//!
//! # Implementations
//!
//! - [`LocalSessionStore`]: `localStorage`-backed session storage
//! - [`WindowRedirectPage`]: URL fragment access and navigation via
//!   `window.location`
//!
//! The HTTP capability is host-injected; web shells typically route
//! identity-provider calls through their own fetch wrapper.

#![cfg(target_arch = "wasm32")]
#![warn(missing_docs)]

pub mod error;
pub mod page;
pub mod storage;

pub use page::WindowRedirectPage;
pub use storage::LocalSessionStore;
