use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

use super::handlers::ApiError;
use super::handlers::AUTH_COOKIE;
use crate::domain::identity::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Middleware that validates the session token and adds the resolved
/// `Principal` to request extensions.
///
/// The token comes from `Authorization: Bearer`, falling back to the session
/// cookie when the header is absent.
pub async fn authenticate<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(bearer.as_ref(), &jar)
        .ok_or_else(|| ApiError::Unauthorized("Missing authentication token".to_string()))?;

    let principal = state
        .auth_service
        .validate(&token)
        .await
        .map_err(ApiError::from)?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

fn extract_token(
    bearer: Option<&TypedHeader<Authorization<Bearer>>>,
    jar: &CookieJar,
) -> Option<String> {
    bearer
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
        .or_else(|| jar.get(AUTH_COOKIE).map(|cookie| cookie.value().to_string()))
        .filter(|token| !token.is_empty())
}
