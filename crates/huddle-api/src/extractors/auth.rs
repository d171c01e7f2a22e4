//! Session authentication extractor
//!
//! Reads the session token from the session cookie, falling back to an
//! `Authorization: Bearer` header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization, Cookie},
    TypedHeader,
};
use huddle_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the token subject
    pub user_id: Snowflake,
    /// Display name carried by the token, if any
    pub name: Option<String>,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: Snowflake, name: Option<String>) -> Self {
        Self { user_id, name }
    }

    /// Name to show for this user when the client sends none
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.user_id.to_string())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let cookie_name = &app_state.config().session.cookie_name;

        let from_cookie = TypedHeader::<Cookie>::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|TypedHeader(cookie)| cookie.get(cookie_name).map(str::to_owned));

        let token = match from_cookie {
            Some(token) => token,
            None => {
                let TypedHeader(Authorization(bearer)) =
                    TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                        .await
                        .map_err(|_| ApiError::MissingAuth)?;
                bearer.token().to_owned()
            }
        };

        let claims = app_state.session_service().validate(&token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected session token");
            e
        })?;

        let user_id = claims.user_id()?;

        Ok(AuthUser::new(user_id, claims.name))
    }
}
