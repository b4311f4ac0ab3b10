//! JavaScript error conversion helpers.

use bridge_traits::error::BridgeError;
use wasm_bindgen::{JsCast, JsValue};

/// Convert an opaque JavaScript error into a `BridgeError` with context.
pub(crate) fn js_error(context: &str, err: JsValue) -> BridgeError {
    let message = if err.is_string() {
        err.as_string().unwrap_or_default()
    } else if let Some(js_err) = err.dyn_ref::<js_sys::Error>() {
        js_err.message().into()
    } else {
        format!("{err:?}")
    };
    BridgeError::OperationFailed(format!("web {context}: {message}"))
}
