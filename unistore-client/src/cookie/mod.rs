mod expiry;
mod memory;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod web;

pub use expiry::*;
pub use memory::*;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use web::*;

use std::borrow::Cow;
use std::fmt::Debug;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters `encodeURIComponent` leaves as they are.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const RESERVED_NAMES: [&str; 5] = ["expires", "max-age", "path", "domain", "secure"];

/// The host side of `document.cookie`: reading yields every visible cookie as
/// one `name=value; name2=value2` string, writing takes a single assignment
/// with its attributes.
pub trait CookieDocument {
    type Error: Debug;

    fn cookie(&self) -> Result<String, Self::Error>;

    fn set_cookie(&mut self, assignment: &str) -> Result<(), Self::Error>;
}

/// Path and domain a cookie is scoped to. Removal must name the same scope the
/// cookie was written with, or the browser treats it as a different cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieScope {
    pub path: Option<String>,
    pub domain: Option<String>,
}

impl CookieScope {
    pub fn with_path<S: Into<String>>(mut self, path: S) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.domain = Some(domain.into());
        self
    }

    fn attributes(&self) -> String {
        let mut attributes = String::new();
        if let Some(domain) = self.domain.as_deref().filter(|d| !d.is_empty()) {
            attributes.push_str("; domain=");
            attributes.push_str(domain);
        }
        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            attributes.push_str("; path=");
            attributes.push_str(path);
        }
        attributes
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    pub expiry: Option<Expiry>,
    pub scope: CookieScope,
    pub secure: bool,
}

impl CookieOptions {
    pub fn with_expiry(mut self, expiry: Expiry) -> Self {
        self.expiry = Some(expiry);
        self
    }

    pub fn with_path<S: Into<String>>(mut self, path: S) -> Self {
        self.scope = self.scope.with_path(path);
        self
    }

    pub fn with_domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.scope = self.scope.with_domain(domain);
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }
}

/// Whether `key` can name a cookie. Attribute names are refused so an
/// assignment cannot be misread as an attribute.
pub fn is_valid_cookie_name(key: &str) -> bool {
    !key.is_empty()
        && !RESERVED_NAMES
            .iter()
            .any(|reserved| key.eq_ignore_ascii_case(reserved))
}

fn encode(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

fn decode(text: &str) -> Cow<'_, str> {
    percent_decode_str(text)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(text))
}

/// `(name, value)` pairs of a cookie string in document order, still encoded.
/// Segments without `=` are skipped.
pub(crate) fn parse_pairs(cookie: &str) -> impl DoubleEndedIterator<Item = (&str, &str)> {
    cookie.split(';').filter_map(|segment| {
        let (name, value) = segment.split_once('=')?;
        Some((name.trim(), value.trim()))
    })
}

/// Cookie access over a [`CookieDocument`].
///
/// Cookies are never probed, so this instance is never disabled. Host
/// failures are logged and reported as a missing cookie or a failed write.
pub struct CookieStore<D: CookieDocument> {
    document: D,
}

impl<D: CookieDocument> CookieStore<D> {
    pub fn new(document: D) -> Self {
        Self { document }
    }

    pub fn is_disabled(&self) -> bool {
        false
    }

    fn raw(&self) -> String {
        match self.document.cookie() {
            Ok(cookie) => cookie,
            Err(e) => {
                log::warn!("Failed to read cookies: {:?}", e);
                String::new()
            }
        }
    }

    fn write(&mut self, assignment: &str) -> bool {
        log::trace!("Writing cookie: {}", assignment);
        match self.document.set_cookie(assignment) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to write cookie: {:?}", e);
                false
            }
        }
    }

    /// Writes a session cookie scoped to the document defaults.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        self.set_with(key, value, &CookieOptions::default())
    }

    /// Creates or overwrites `key`. Returns `false` without writing when `key`
    /// is empty or an attribute name.
    pub fn set_with(&mut self, key: &str, value: &str, options: &CookieOptions) -> bool {
        if !is_valid_cookie_name(key) {
            log::debug!("Refusing cookie name {:?}", key);
            return false;
        }

        let mut assignment = format!("{}={}", encode(key), encode(value));
        if let Some(expiry) = &options.expiry {
            assignment.push_str(&expiry.attribute());
        }
        assignment.push_str(&options.scope.attributes());
        if options.secure {
            assignment.push_str("; secure");
        }

        self.write(&assignment)
    }

    /// The decoded value of `key`. When the name appears more than once the
    /// last occurrence wins. An empty value reads as `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        let raw = self.raw();
        let value = parse_pairs(&raw)
            .rfind(|(name, _)| decode(name) == key)
            .map(|(_, value)| decode(value).into_owned())?;

        if value.is_empty() { None } else { Some(value) }
    }

    pub fn has(&self, key: &str) -> bool {
        parse_pairs(&self.raw()).any(|(name, _)| decode(name) == key)
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.remove_with(key, &CookieScope::default())
    }

    /// Expires `key` within `scope`. Returns `false` when `key` is empty or not
    /// currently visible.
    pub fn remove_with(&mut self, key: &str, scope: &CookieScope) -> bool {
        if key.is_empty() || !self.has(key) {
            return false;
        }

        let assignment = format!(
            "{}=; expires={}{}",
            encode(key),
            EPOCH_EXPIRES,
            scope.attributes()
        );

        self.write(&assignment)
    }

    /// Decoded names of every visible cookie in document order.
    pub fn keys(&self) -> Vec<String> {
        parse_pairs(&self.raw())
            .map(|(name, _)| decode(name).into_owned())
            .collect()
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn into_inner(self) -> D {
        self.document
    }
}
