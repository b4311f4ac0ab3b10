//! # Core Runtime
//!
//! Shared runtime services for the auth bridge: environment configuration,
//! structured logging, and the application message ports.
//!
//! ## Modules
//!
//! - [`config`] - Immutable environment-derived configuration with fail-fast
//!   validation
//! - [`logging`] - `tracing` subscriber setup for native and wasm targets
//! - [`ports`] - Named subscribe/publish channels between the bridge and the
//!   application core

pub mod config;
pub mod error;
pub mod logging;
pub mod ports;

pub use config::EnvConfig;
pub use error::{Error, Result};
pub use ports::{AuthCommand, AuthResult, ErrorInfo, LoginOptions, PortBus, UserSession};
