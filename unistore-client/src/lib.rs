//! One JSON key/value API over local storage, session storage and cookies.

pub mod codec;
pub mod config;
pub mod cookie;
pub mod error;
pub mod facade;
pub mod storage;
pub mod store;

pub use config::StoreConfig;
pub use cookie::{CookieDocument, CookieOptions, CookieScope, CookieStore, Expiry, MemoryCookieJar};
pub use error::{Result, StorageError};
pub use facade::StorageFacade;
pub use storage::{KeyValueStore, MemoryStorage};
pub use store::{MemoryStore, Store};

/// Crate version, fixed at build time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use store::WebStore;
