//! Session cookie builders.
//!
//! The session identifier is an opaque UUID persisted client-side as an
//! HttpOnly cookie. The server-side session record it points at lives in
//! Redis with the same 24-hour absolute TTL; the cookie is set at login and
//! cleared at logout.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use uuid::Uuid;

/// Cookie name for the session identifier.
pub const SESSION_COOKIE: &str = "matchday_sid";

/// Session lifetime in seconds (24 hours). Absolute, not sliding.
pub const SESSION_TTL_SECS: u64 = 86400;

/// Set the session cookie on the jar.
pub fn set_session_cookie(jar: CookieJar, session_id: Uuid) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .max_age(Duration::seconds(SESSION_TTL_SECS as i64))
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the session cookie by setting Max-Age to 0.
pub fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Read the session id from the jar, if present and well-formed.
pub fn session_id_from_jar(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|c| c.value().parse::<Uuid>().ok())
}
