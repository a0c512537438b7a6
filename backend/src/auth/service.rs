//! Session cookie handling.
//!
//! The session is two cookies: `access_token` holds the upstream bearer token and
//! `role` holds the role tag used to gate admin pages. Both are HttpOnly, SameSite=Lax,
//! scoped to `/`, and `Secure` in production.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};

use super::models::Session;
use crate::config::CookieSettings;

pub const SESSION_COOKIE_NAME: &str = "access_token";

pub const ROLE_COOKIE_NAME: &str = "role";

/// Reads the session from every `Cookie` header on the request.
///
/// Empty values are treated as absent.
pub fn session_from_headers(headers: &HeaderMap) -> Session {
    let mut session = Session::default();

    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else {
            continue;
        };
        for pair in raw.split(';') {
            let Some((name, value)) = pair.trim().split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"');
            if value.is_empty() {
                continue;
            }
            match name.trim() {
                SESSION_COOKIE_NAME if session.token.is_none() => {
                    session.token = Some(value.to_string())
                }
                ROLE_COOKIE_NAME if session.role.is_none() => {
                    session.role = Some(value.to_string())
                }
                _ => {}
            }
        }
    }

    session
}

fn cookie(name: &str, value: &str, max_age: i64, settings: CookieSettings) -> String {
    let secure_flag = if settings.secure { "; Secure" } else { "" };
    format!("{name}={value}; HttpOnly{secure_flag}; SameSite=Lax; Path=/; Max-Age={max_age}")
}

pub fn create_session_cookie(token: &str, settings: CookieSettings) -> String {
    cookie(SESSION_COOKIE_NAME, token, settings.max_age_secs, settings)
}

pub fn create_role_cookie(role: &str, settings: CookieSettings) -> String {
    cookie(ROLE_COOKIE_NAME, role, settings.max_age_secs, settings)
}

/// Appends `Set-Cookie` headers for a fresh session.
///
/// Values that cannot appear in a header are skipped; the caller checks
/// [`is_cookie_safe`] first for anything that must be written.
pub fn set_session(
    headers: &mut HeaderMap,
    token: &str,
    role: Option<&str>,
    settings: CookieSettings,
) {
    append(headers, create_session_cookie(token, settings));
    match role.filter(|r| is_cookie_safe(r)) {
        Some(role) => append(headers, create_role_cookie(role, settings)),
        None => append(headers, cookie(ROLE_COOKIE_NAME, "", 0, settings)),
    }
}

/// Appends `Set-Cookie` headers that expire both session cookies.
pub fn clear_session(headers: &mut HeaderMap, settings: CookieSettings) {
    append(headers, cookie(SESSION_COOKIE_NAME, "", 0, settings));
    append(headers, cookie(ROLE_COOKIE_NAME, "", 0, settings));
}

/// Whether a value can be stored as a cookie value without quoting.
pub fn is_cookie_safe(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_graphic() && !matches!(b, b'"' | b',' | b';' | b'\\'))
}

fn append(headers: &mut HeaderMap, cookie: String) {
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.append(SET_COOKIE, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEV: CookieSettings = CookieSettings {
        secure: false,
        max_age_secs: 604_800,
    };

    const PROD: CookieSettings = CookieSettings {
        secure: true,
        max_age_secs: 604_800,
    };

    fn set_cookies(headers: &HeaderMap) -> Vec<String> {
        headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn session_cookie_flags() {
        assert_eq!(
            create_session_cookie("tok123", DEV),
            "access_token=tok123; HttpOnly; SameSite=Lax; Path=/; Max-Age=604800"
        );
        assert_eq!(
            create_session_cookie("tok123", PROD),
            "access_token=tok123; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=604800"
        );
    }

    #[test]
    fn parses_session_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; access_token=tok123; role=admin"),
        );
        let session = session_from_headers(&headers);
        assert_eq!(session.token(), Some("tok123"));
        assert_eq!(session.role.as_deref(), Some("admin"));
    }

    #[test]
    fn reads_multiple_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("access_token=tok123"));
        headers.append(COOKIE, HeaderValue::from_static("role=user"));
        let session = session_from_headers(&headers);
        assert!(session.is_authenticated());
        assert_eq!(session.role.as_deref(), Some("user"));
    }

    #[test]
    fn empty_cookie_is_no_session() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("access_token=; role="));
        assert_eq!(session_from_headers(&headers), Session::default());
        assert_eq!(session_from_headers(&HeaderMap::new()), Session::default());
    }

    #[test]
    fn similar_names_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("my_access_token=nope; roles=admin"),
        );
        assert_eq!(session_from_headers(&headers), Session::default());
    }

    #[test]
    fn set_and_clear_write_both_cookies() {
        let mut headers = HeaderMap::new();
        set_session(&mut headers, "tok123", Some("admin"), DEV);
        assert_eq!(
            set_cookies(&headers),
            vec![
                "access_token=tok123; HttpOnly; SameSite=Lax; Path=/; Max-Age=604800",
                "role=admin; HttpOnly; SameSite=Lax; Path=/; Max-Age=604800",
            ]
        );

        let mut headers = HeaderMap::new();
        clear_session(&mut headers, PROD);
        assert_eq!(
            set_cookies(&headers),
            vec![
                "access_token=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0",
                "role=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0",
            ]
        );
    }

    #[test]
    fn login_without_role_expires_stale_role() {
        let mut headers = HeaderMap::new();
        set_session(&mut headers, "tok123", None, DEV);
        let cookies = set_cookies(&headers);
        assert_eq!(cookies.len(), 2);
        assert!(cookies[1].starts_with("role=;"));
        assert!(cookies[1].ends_with("Max-Age=0"));
    }

    #[test]
    fn cookie_safety() {
        assert!(is_cookie_safe("eyJhbGciOiJIUzI1NiJ9.e30.sig-_"));
        assert!(!is_cookie_safe(""));
        assert!(!is_cookie_safe("a b"));
        assert!(!is_cookie_safe("a;b"));
    }
}
