//! Redirect Page Abstraction
//!
//! Abstracts the piece of browser chrome the auth flow touches: the URL
//! fragment of the current page and outbound navigation.
//!
//! - Web: `window.location` / `history`
//! - Desktop: a host-managed webview or a manual shim for tests

use crate::error::Result;
use crate::platform::PlatformSendSync;

/// Access to the current page URL fragment and navigation.
///
/// The fragment is how the hosted-authorization flow hands credentials back:
/// the provider redirects to the configured URI with the response encoded
/// after `#`. The flow reads it once at startup and clears it after a
/// completed parse so a page refresh does not replay the login.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait RedirectPage: PlatformSendSync {
    /// Read the current URL fragment, without the leading `#`.
    ///
    /// Returns `Ok(None)` when the URL carries no fragment.
    async fn current_fragment(&self) -> Result<Option<String>>;

    /// Clear the URL fragment in place, without reloading the page.
    async fn clear_fragment(&self) -> Result<()>;

    /// Navigate the page to the given URL.
    ///
    /// This abandons the current document; nothing after a successful
    /// `navigate` is expected to run.
    async fn navigate(&self, url: &str) -> Result<()>;
}
