use wasm_bindgen::JsCast;

use super::CookieDocument;
use crate::error::{Result, StorageError};
use crate::storage::js_error;

/// `document.cookie` of the current page.
pub struct WebCookieDocument {
    inner: Option<web_sys::HtmlDocument>,
}

impl WebCookieDocument {
    pub fn current() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok());
        if inner.is_none() {
            log::warn!("document.cookie is not accessible");
        }
        Self { inner }
    }

    fn document(&self) -> Result<&web_sys::HtmlDocument> {
        self.inner
            .as_ref()
            .ok_or_else(|| StorageError::unavailable("no HTML document"))
    }
}

impl CookieDocument for WebCookieDocument {
    type Error = StorageError;

    fn cookie(&self) -> Result<String> {
        self.document()?.cookie().map_err(js_error)
    }

    fn set_cookie(&mut self, assignment: &str) -> Result<()> {
        self.document()?.set_cookie(assignment).map_err(js_error)
    }
}
