use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Echo the identity carried by the caller's access token.
pub async fn session(
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub id: String,
    pub email: String,
    pub role: String,
    pub expires_at: i64,
}

impl From<&AuthenticatedUser> for SessionResponseData {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            id: user.user_id.to_string(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            expires_at: user.expires_at,
        }
    }
}
