//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the
//! individual workspace crates (e.g., `core-auth`, `bridge-desktop`,
//! `bridge-web`). Host applications can depend on `auth-bridge-workspace`
//! and enable the documented features without needing to wire each crate
//! individually.
