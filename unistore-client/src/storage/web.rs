use wasm_bindgen::{JsCast, JsValue};

use super::KeyValueStore;
use crate::error::{Result, StorageError};

/// `window.localStorage` or `window.sessionStorage`.
///
/// Holds `None` when the browser refused to hand the store out, in which case
/// every call fails with [`StorageError::Unavailable`].
pub struct WebStorage {
    inner: Option<web_sys::Storage>,
}

impl WebStorage {
    pub fn local() -> Self {
        let inner = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if inner.is_none() {
            log::warn!("localStorage is not accessible");
        }
        Self { inner }
    }

    pub fn session() -> Self {
        let inner = web_sys::window().and_then(|w| w.session_storage().ok().flatten());
        if inner.is_none() {
            log::warn!("sessionStorage is not accessible");
        }
        Self { inner }
    }

    fn storage(&self) -> Result<&web_sys::Storage> {
        self.inner
            .as_ref()
            .ok_or_else(|| StorageError::unavailable("web storage is not accessible"))
    }
}

pub(crate) fn js_error(value: JsValue) -> StorageError {
    let message = match value.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => value.as_string().unwrap_or_else(|| format!("{:?}", value)),
    };
    StorageError::backend(message)
}

impl KeyValueStore for WebStorage {
    type Error = StorageError;

    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.storage()?.remove_item(key).map_err(js_error)
    }

    fn clear(&mut self) -> Result<()> {
        self.storage()?.clear().map_err(js_error)
    }

    fn length(&self) -> Result<usize> {
        Ok(self.storage()?.length().map_err(js_error)? as usize)
    }

    fn key(&self, index: usize) -> Result<Option<String>> {
        self.storage()?.key(index as u32).map_err(js_error)
    }
}
