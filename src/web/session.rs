//! Session cookie helpers shared by the dashboard and the JSON API.

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};

use crate::state::SESSION_COOKIE;

/// Session lifetime in seconds. The backend may expire the token sooner.
pub const SESSION_MAX_AGE: u64 = 12 * 60 * 60;

/// Reads a cookie value from the `Cookie` header(s).
///
/// Handles multiple cookies per header by splitting on semicolons.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

/// The sealed session cookie value, if present.
pub fn session_value(headers: &HeaderMap) -> Option<String> {
    read_cookie(headers, SESSION_COOKIE)
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(sealed: &str, secure: bool) -> HeaderValue {
    let mut cookie = format!(
        "{SESSION_COOKIE}={sealed}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_MAX_AGE}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    // Sealed values are base64url and hex only.
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| clear_session_cookie())
}

/// `Set-Cookie` value removing the session.
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("fleet_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; fleet_session=abc.def; lang=en"),
        );

        assert_eq!(session_value(&headers).as_deref(), Some("abc.def"));
        assert_eq!(read_cookie(&headers, "lang").as_deref(), Some("en"));
        assert!(read_cookie(&headers, "missing").is_none());
    }

    #[test]
    fn test_empty_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("fleet_session="));
        assert!(session_value(&headers).is_none());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc.def", true);
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("fleet_session=abc.def;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.ends_with("; Secure"));

        assert!(!session_cookie("abc.def", false).to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_matches_name() {
        assert!(
            clear_session_cookie()
                .to_str()
                .unwrap()
                .starts_with(&format!("{SESSION_COOKIE}=;"))
        );
    }
}
