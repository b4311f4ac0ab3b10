//! `window.location`-backed redirect page.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    page::RedirectPage,
};
use tracing::debug;

use crate::error::js_error;

fn location() -> Result<web_sys::Location> {
    web_sys::window()
        .map(|window| window.location())
        .ok_or_else(|| BridgeError::NotAvailable("window".into()))
}

/// Browser implementation of [`RedirectPage`] over `window.location`.
#[derive(Clone, Default)]
pub struct WindowRedirectPage;

impl WindowRedirectPage {
    /// Construct the page capability.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl RedirectPage for WindowRedirectPage {
    async fn current_fragment(&self) -> Result<Option<String>> {
        let hash = location()?
            .hash()
            .map_err(|err| js_error("location.hash", err))?;

        let fragment = hash.trim_start_matches('#');
        if fragment.is_empty() {
            Ok(None)
        } else {
            Ok(Some(fragment.to_string()))
        }
    }

    async fn clear_fragment(&self) -> Result<()> {
        // Setting an empty hash keeps the page in place, matching the
        // pre-bridge behavior of `window.location.hash = ''`.
        location()?
            .set_hash("")
            .map_err(|err| js_error("location.set_hash", err))
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        debug!(url, "Navigating window");
        location()?
            .assign(url)
            .map_err(|err| js_error("location.assign", err))
    }
}
