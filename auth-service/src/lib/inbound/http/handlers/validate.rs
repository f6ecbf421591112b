use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::domain::identity::models::Principal;

/// Report the principal resolved by the authentication middleware.
pub async fn validate(
    Extension(principal): Extension<Principal>,
) -> ApiSuccess<ValidateResponseData> {
    ApiSuccess::new(StatusCode::OK, (&principal).into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateResponseData {
    pub user_id: String,
    pub role: String,
}

impl From<&Principal> for ValidateResponseData {
    fn from(principal: &Principal) -> Self {
        Self {
            user_id: principal.id.to_string(),
            role: principal.role.as_str().to_string(),
        }
    }
}
