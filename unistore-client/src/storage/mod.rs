mod memory;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod web;

pub use memory::*;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use web::*;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub(crate) use web::js_error;

use core::fmt::Debug;

/// A host key/value store shaped like the Web Storage interface.
pub trait KeyValueStore {
    type Error: Debug;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    fn remove_item(&mut self, key: &str) -> Result<(), Self::Error>;

    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Number of entries currently in the store.
    fn length(&self) -> Result<usize, Self::Error>;

    /// Name of the entry at `index` in the store's enumeration order.
    fn key(&self, index: usize) -> Result<Option<String>, Self::Error>;
}
