use auth::IssuedToken;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::AUTH_COOKIE;
use crate::domain::identity::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    Json(body): Json<LoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let issued = state
        .auth_service
        .login(&body.email, &body.password)
        .await
        .map_err(ApiError::from)?;

    let data = LoginResponseData::try_from(&issued)?;

    // Session cookie for browser clients; API clients use the body token
    let cookie = Cookie::build((AUTH_COOKIE, issued.token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path("/");

    Ok((jar.add(cookie), ApiSuccess::new(StatusCode::OK, data)))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

impl TryFrom<&IssuedToken> for LoginResponseData {
    type Error = ApiError;

    fn try_from(issued: &IssuedToken) -> Result<Self, Self::Error> {
        let expires_at = issued.claims.expires_at().ok_or_else(|| {
            ApiError::from(anyhow::anyhow!(
                "issued token expiry {} is out of range",
                issued.claims.exp
            ))
        })?;

        Ok(Self {
            token: issued.token.clone(),
            token_type: "Bearer",
            expires_at,
        })
    }
}
