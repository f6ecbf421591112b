use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::ApiSuccess;
use super::AUTH_COOKIE;

/// Tokens are stateless, so logging out only clears the browser cookie.
pub async fn logout(jar: CookieJar) -> (CookieJar, ApiSuccess<LogoutResponseData>) {
    let jar = jar.remove(Cookie::build(AUTH_COOKIE).path("/"));

    (
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LogoutResponseData {
                message: "Logged out".to_string(),
            },
        ),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
