use crate::config::StoreConfig;
use crate::cookie::{CookieDocument, CookieStore, MemoryCookieJar};
use crate::facade::StorageFacade;
use crate::storage::{KeyValueStore, MemoryStorage};

/// The three storage instances of an application: `local` is the default
/// instance over local storage, next to `session` and `cookie`.
///
/// Build one at startup and pass it by reference to whatever needs storage.
pub struct Store<L, S, C>
where
    L: KeyValueStore,
    S: KeyValueStore,
    C: CookieDocument,
{
    pub local: StorageFacade<L>,
    pub session: StorageFacade<S>,
    pub cookie: CookieStore<C>,
}

impl<L, S, C> Store<L, S, C>
where
    L: KeyValueStore,
    S: KeyValueStore,
    C: CookieDocument,
{
    /// Probes `local` and wraps the backends. Session storage is only probed
    /// when the config asks for it; cookies never are.
    pub fn open(local: L, session: S, cookie: C, config: &StoreConfig) -> Self {
        let local = StorageFacade::probed(local, &config.probe_key);
        let session = if config.probe_session {
            StorageFacade::probed(session, &config.probe_key)
        } else {
            StorageFacade::new(session)
        };

        log::debug!(
            "Store opened (local disabled: {}, session disabled: {})",
            local.is_disabled(),
            session.is_disabled()
        );

        Self {
            local,
            session,
            cookie: CookieStore::new(cookie),
        }
    }
}

pub type MemoryStore = Store<MemoryStorage, MemoryStorage, MemoryCookieJar>;

impl MemoryStore {
    pub fn in_memory(config: &StoreConfig) -> Self {
        Self::open(
            MemoryStorage::new(),
            MemoryStorage::new(),
            MemoryCookieJar::new(),
            config,
        )
    }
}

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub type WebStore =
    Store<crate::storage::WebStorage, crate::storage::WebStorage, crate::cookie::WebCookieDocument>;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
impl WebStore {
    /// Binds to `window.localStorage`, `window.sessionStorage` and
    /// `document.cookie` of the current page.
    pub fn from_window(config: &StoreConfig) -> Self {
        Self::open(
            crate::storage::WebStorage::local(),
            crate::storage::WebStorage::session(),
            crate::cookie::WebCookieDocument::current(),
            config,
        )
    }
}
