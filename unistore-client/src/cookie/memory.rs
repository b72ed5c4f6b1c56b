use time::{Duration, OffsetDateTime};

use super::{CookieDocument, parse_http_date};
use crate::error::{Result, StorageError};

#[derive(Debug, Clone)]
struct StoredCookie {
    name: String,
    value: String,
    domain: String,
    host_only: bool,
    path: String,
    secure: bool,
    expires_at: Option<OffsetDateTime>,
}

impl StoredCookie {
    fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    fn same_slot(&self, other: &StoredCookie) -> bool {
        self.name == other.name && self.domain == other.domain && self.path == other.path
    }
}

/// In-process stand-in for `document.cookie`, seen from a page at
/// `host` + `path`.
///
/// Follows the browser rules that matter to callers: cookies live per
/// name, domain and path, an expiry in the past deletes, reads only show
/// cookies whose domain and path cover the page, and `secure` cookies need a
/// secure page.
#[derive(Debug, Clone)]
pub struct MemoryCookieJar {
    host: String,
    path: String,
    secure: bool,
    blocked: bool,
    cookies: Vec<StoredCookie>,
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self::for_location("localhost", "/", false)
    }
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_location(host: &str, path: &str, secure: bool) -> Self {
        Self {
            host: host.to_ascii_lowercase(),
            path: if path.starts_with('/') { path.to_string() } else { format!("/{path}") },
            secure,
            blocked: false,
            cookies: Vec::new(),
        }
    }

    /// A document whose cookie accessor throws, as in a sandboxed frame.
    pub fn blocked() -> Self {
        Self {
            blocked: true,
            ..Self::default()
        }
    }

    /// Live cookies held for any scope, visible from this page or not.
    pub fn stored(&self) -> usize {
        let now = OffsetDateTime::now_utc();
        self.cookies.iter().filter(|c| !c.is_expired(now)).count()
    }

    fn default_path(&self) -> String {
        match self.path.rfind('/') {
            Some(0) | None => "/".to_string(),
            Some(index) => self.path[..index].to_string(),
        }
    }

    fn domain_matches(&self, cookie: &StoredCookie) -> bool {
        if cookie.host_only {
            return self.host == cookie.domain;
        }
        covers_host(&cookie.domain, &self.host)
    }

    fn path_matches(&self, cookie: &StoredCookie) -> bool {
        let page = self.path.as_str();
        let scope = cookie.path.as_str();

        page == scope
            || (page.starts_with(scope)
                && (scope.ends_with('/') || page[scope.len()..].starts_with('/')))
    }

    fn parse(&self, assignment: &str, now: OffsetDateTime) -> Option<StoredCookie> {
        let mut segments = assignment.split(';');
        let pair = segments.next().unwrap_or_default();
        let (name, value) = match pair.split_once('=') {
            Some((name, value)) => (name.trim(), value.trim()),
            None => ("", pair.trim()),
        };

        let mut cookie = StoredCookie {
            name: name.to_string(),
            value: value.to_string(),
            domain: self.host.clone(),
            host_only: true,
            path: self.default_path(),
            secure: false,
            expires_at: None,
        };
        let mut max_age: Option<i64> = None;

        for segment in segments {
            let (attribute, argument) = match segment.split_once('=') {
                Some((attribute, argument)) => (attribute.trim(), argument.trim()),
                None => (segment.trim(), ""),
            };

            match attribute.to_ascii_lowercase().as_str() {
                "expires" => {
                    if let Some(at) = parse_http_date(argument) {
                        cookie.expires_at = Some(at);
                    }
                }
                "max-age" => {
                    if let Ok(seconds) = argument.parse::<i64>() {
                        max_age = Some(seconds);
                    }
                }
                "domain" if !argument.is_empty() => {
                    let domain = argument.trim_start_matches('.').to_ascii_lowercase();
                    if !covers_host(&domain, &self.host) {
                        log::debug!("Ignoring cookie for foreign domain {:?}", domain);
                        return None;
                    }
                    cookie.domain = domain;
                    cookie.host_only = false;
                }
                "path" if argument.starts_with('/') => {
                    cookie.path = argument.to_string();
                }
                "secure" => cookie.secure = true,
                _ => {}
            }
        }

        if let Some(seconds) = max_age {
            cookie.expires_at = Some(if seconds <= 0 {
                OffsetDateTime::UNIX_EPOCH
            } else {
                now.checked_add(Duration::seconds(seconds))
                    .unwrap_or(now + Duration::days(365 * 400))
            });
        }

        if cookie.secure && !self.secure {
            log::debug!("Ignoring secure cookie {:?} on an insecure page", cookie.name);
            return None;
        }

        Some(cookie)
    }
}

fn covers_host(domain: &str, host: &str) -> bool {
    host == domain
        || (host.len() > domain.len()
            && host.ends_with(domain)
            && host[..host.len() - domain.len()].ends_with('.'))
}

impl CookieDocument for MemoryCookieJar {
    type Error = StorageError;

    fn cookie(&self) -> Result<String> {
        if self.blocked {
            return Err(StorageError::unavailable("cookie access is denied"));
        }

        let now = OffsetDateTime::now_utc();
        let mut visible: Vec<&StoredCookie> = self
            .cookies
            .iter()
            .filter(|c| !c.is_expired(now))
            .filter(|c| self.domain_matches(c) && self.path_matches(c))
            .filter(|c| !c.secure || self.secure)
            .collect();

        // Longer paths come first, ties keep creation order
        visible.sort_by(|a, b| b.path.len().cmp(&a.path.len()));

        let pairs: Vec<String> = visible
            .iter()
            .map(|c| {
                if c.name.is_empty() {
                    c.value.clone()
                } else {
                    format!("{}={}", c.name, c.value)
                }
            })
            .collect();

        Ok(pairs.join("; "))
    }

    fn set_cookie(&mut self, assignment: &str) -> Result<()> {
        if self.blocked {
            return Err(StorageError::unavailable("cookie access is denied"));
        }

        let now = OffsetDateTime::now_utc();
        let Some(cookie) = self.parse(assignment, now) else {
            return Ok(());
        };

        self.cookies.retain(|c| !c.is_expired(now));
        let existing = self.cookies.iter().position(|c| c.same_slot(&cookie));

        match (existing, cookie.is_expired(now)) {
            (Some(index), true) => {
                self.cookies.remove(index);
            }
            (Some(index), false) => self.cookies[index] = cookie,
            (None, true) => {}
            (None, false) => self.cookies.push(cookie),
        }

        Ok(())
    }
}
