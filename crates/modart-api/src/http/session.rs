//! Session cookie delivered on login.

use cookie::time::Duration;
use cookie::{Cookie, SameSite};

use modart_types::session::SESSION_COOKIE_NAME;

/// `Authorization=<token>; HttpOnly; SameSite=Lax; Path=/; Max-Age=<max_age_secs>`.
///
/// The cookie's lifetime is independent of the token's own `exp`.
pub fn session_cookie(token: &str, max_age_secs: u32) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(i64::from(max_age_secs)))
        .build()
}
