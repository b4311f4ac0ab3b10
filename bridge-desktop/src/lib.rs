//! # Desktop Bridge Implementations
//!
//! Native implementations of the bridge traits for desktop hosts and tests:
//!
//! - [`ReqwestHttpClient`](http::ReqwestHttpClient) - HTTP via reqwest with TLS
//! - [`MemorySessionStore`](storage::MemorySessionStore) - volatile session storage
//! - [`JsonFileSessionStore`](storage::JsonFileSessionStore) - file-backed session storage
//! - [`ManualRedirectPage`](page::ManualRedirectPage) - host-driven page shim
//!
//! There is no native [`IdentityProvider`](bridge_traits::IdentityProvider)
//! here: `core-auth` ships the tenant-generic `HostedAuthProvider`, which
//! only needs the HTTP and page capabilities from this crate.

pub mod http;
pub mod page;
pub mod storage;

pub use http::ReqwestHttpClient;
pub use page::ManualRedirectPage;
pub use storage::{JsonFileSessionStore, MemorySessionStore};
