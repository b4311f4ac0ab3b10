//! Manual Redirect Page
//!
//! A [`RedirectPage`] for hosts without a real browser location: the host
//! (or a test) hands the fragment in explicitly and observes requested
//! navigations instead of performing them.

use async_trait::async_trait;
use bridge_traits::{error::Result, page::RedirectPage};
use std::sync::Mutex;
use tracing::debug;

/// Host-driven page shim.
///
/// Native hosts that embed their own webview capture the provider's
/// redirect there, then feed the fragment to this shim before running the
/// auth flow. Navigation requests are recorded for the host to act on.
#[derive(Default)]
pub struct ManualRedirectPage {
    fragment: Mutex<Option<String>>,
    navigations: Mutex<Vec<String>>,
}

impl ManualRedirectPage {
    /// Create a page with no fragment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current fragment (without the leading `#`)
    pub fn set_fragment(&self, fragment: impl Into<String>) {
        *self.fragment.lock().unwrap() = Some(fragment.into());
    }

    /// The most recently requested navigation target, if any
    pub fn last_navigation(&self) -> Option<String> {
        self.navigations.lock().unwrap().last().cloned()
    }

    /// All requested navigation targets, in order
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

#[async_trait]
impl RedirectPage for ManualRedirectPage {
    async fn current_fragment(&self) -> Result<Option<String>> {
        Ok(self.fragment.lock().unwrap().clone())
    }

    async fn clear_fragment(&self) -> Result<()> {
        *self.fragment.lock().unwrap() = None;
        Ok(())
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        debug!(url, "Navigation requested");
        self.navigations.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
