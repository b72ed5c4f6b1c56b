use time::{Duration, OffsetDateTime};

use unistore_client::{
    CookieDocument, CookieOptions, CookieScope, CookieStore, Expiry, MemoryCookieJar,
};

fn cookies() -> CookieStore<MemoryCookieJar> {
    CookieStore::new(MemoryCookieJar::new())
}

#[test]
fn test_set_get_has() {
    let mut store = cookies();

    assert!(store.set("theme", "dark"));
    assert!(store.has("theme"));
    assert_eq!(store.get("theme"), Some("dark".to_string()));
    assert_eq!(store.get("missing"), None);
    assert!(!store.has("missing"));
}

#[test]
fn test_reserved_name_leaves_cookies_unchanged() {
    let mut store = cookies();
    store.set("a", "1");

    assert!(!store.set("path", "x"));
    assert!(!store.set("Max-Age", "x"));
    assert!(!store.set("", "x"));

    assert_eq!(store.document().cookie().unwrap(), "a=1");
}

#[test]
fn test_encoding_round_trip() {
    let mut store = cookies();

    assert!(store.set("user name", "Zoë; admin=true"));
    assert_eq!(
        store.document().cookie().unwrap(),
        "user%20name=Zo%C3%AB%3B%20admin%3Dtrue"
    );
    assert_eq!(store.get("user name"), Some("Zoë; admin=true".to_string()));
    assert_eq!(store.keys(), vec!["user name"]);
    assert!(!store.has("admin"));
}

#[test]
fn test_empty_value_is_present_but_reads_none() {
    let mut store = cookies();
    store.set("blank", "");

    assert!(store.has("blank"));
    assert_eq!(store.get("blank"), None);
}

#[test]
fn test_expiry_forms() {
    let mut store = cookies();

    let future = OffsetDateTime::now_utc() + Duration::days(1);
    let past = OffsetDateTime::now_utc() - Duration::days(1);

    let expiring = |expiry: Expiry| CookieOptions::default().with_expiry(expiry);

    store.set_with("never", "1", &expiring(Expiry::Never));
    store.set_with("hour", "1", &expiring(Expiry::RelativeSeconds(3600)));
    store.set_with("tomorrow", "1", &expiring(Expiry::AbsoluteDate(future)));
    let text = Expiry::AbsoluteExpiryText("Fri, 31 Dec 9999 23:59:59 GMT".to_string());
    store.set_with("text", "1", &expiring(text));
    assert_eq!(store.keys(), vec!["never", "hour", "tomorrow", "text"]);

    store.set_with("gone", "1", &expiring(Expiry::AbsoluteDate(past)));
    store.set_with("now", "1", &expiring(Expiry::RelativeSeconds(-1)));
    assert!(!store.has("gone"));
    assert!(!store.has("now"));
}

#[test]
fn test_remove() {
    let mut store = cookies();
    store.set("a", "1");
    store.set("b", "2");

    assert!(store.remove("a"));
    assert!(!store.has("a"));
    assert_eq!(store.keys(), vec!["b"]);

    assert!(!store.remove("a"));
    assert!(!store.remove(""));
}

#[test]
fn test_remove_needs_matching_scope() {
    let jar = MemoryCookieJar::for_location("example.com", "/app/page", false);
    let mut store = CookieStore::new(jar);
    store.set_with("session", "abc", &CookieOptions::default().with_path("/"));

    // The default scope is /app, a different cookie
    assert!(store.remove("session"));
    assert_eq!(store.get("session"), Some("abc".to_string()));

    assert!(store.remove_with("session", &CookieScope::default().with_path("/")));
    assert!(!store.has("session"));
    assert_eq!(store.document().stored(), 0);
}

#[test]
fn test_domain_cookie() {
    let jar = MemoryCookieJar::for_location("shop.example.com", "/", true);
    let mut store = CookieStore::new(jar);
    let options = CookieOptions::default().with_domain("example.com").with_secure(true);

    assert!(store.set_with("cart", "3", &options));
    assert_eq!(store.get("cart"), Some("3".to_string()));

    assert!(store.remove_with("cart", &CookieScope::default().with_domain("example.com")));
    assert!(!store.has("cart"));
}

#[test]
fn test_blocked_document() {
    let mut store = CookieStore::new(MemoryCookieJar::blocked());

    assert!(!store.is_disabled());
    assert!(!store.set("a", "1"));
    assert_eq!(store.get("a"), None);
    assert!(!store.has("a"));
    assert!(!store.remove("a"));
    assert!(store.keys().is_empty());
}

#[test]
fn test_remove_cookie_written_by_page_script() {
    let mut jar = MemoryCookieJar::new();
    jar.set_cookie("it's=1").unwrap();
    let mut store = CookieStore::new(jar);

    assert_eq!(store.get("it's"), Some("1".to_string()));
    assert!(store.remove("it's"));
    assert!(!store.has("it's"));
    assert_eq!(store.document().cookie().unwrap(), "");
}

#[test]
fn test_uri_component_characters_stay_readable() {
    let mut store = cookies();

    assert!(store.set("it's(x)!", "a'b*c~"));
    assert_eq!(store.document().cookie().unwrap(), "it's(x)!=a'b*c~");
    assert_eq!(store.get("it's(x)!"), Some("a'b*c~".to_string()));
}
