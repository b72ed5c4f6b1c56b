use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// `Date.prototype.toUTCString` layout, also the HTTP date format.
pub(crate) const HTTP_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

pub const NEVER_EXPIRES: &str = "Fri, 31 Dec 9999 23:59:59 GMT";
pub const EPOCH_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// When a cookie written with [`CookieStore::set_with`](super::CookieStore::set_with)
/// should go away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expiry {
    /// `max-age` in seconds from now. Zero writes a session cookie and a
    /// negative count expires it immediately.
    RelativeSeconds(i64),
    /// Used verbatim as the `expires` attribute.
    AbsoluteExpiryText(String),
    AbsoluteDate(OffsetDateTime),
    /// Fixed far-future date.
    Never,
}

impl Expiry {
    /// The attribute appended to the cookie assignment, including the leading
    /// separator, or an empty string for a session cookie.
    pub fn attribute(&self) -> String {
        match self {
            Expiry::Never => format!("; expires={}", NEVER_EXPIRES),
            Expiry::RelativeSeconds(0) => String::new(),
            Expiry::RelativeSeconds(seconds) => format!("; max-age={}", seconds),
            Expiry::AbsoluteExpiryText(text) if text.is_empty() => String::new(),
            Expiry::AbsoluteExpiryText(text) => format!("; expires={}", text),
            Expiry::AbsoluteDate(date) => format!("; expires={}", format_http_date(*date)),
        }
    }
}

pub fn format_http_date(date: OffsetDateTime) -> String {
    let date = date.to_offset(UtcOffset::UTC);
    // Every component in the layout exists on a UTC date, so this cannot fail
    date.format(HTTP_DATE).unwrap_or_else(|_| NEVER_EXPIRES.to_string())
}

pub fn parse_http_date(text: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(text.trim(), HTTP_DATE)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}
