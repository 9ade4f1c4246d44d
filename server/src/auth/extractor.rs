use crate::api::ErrorResponse;
use crate::db::DbPool;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::db::get_user_from_token;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Extractor for an authenticated user who belongs to a household.
///
/// The session token is read from the `session` cookie, or from an
/// `Authorization: Bearer` header for non-browser clients.
#[derive(Debug, Clone, Copy)]
pub struct HouseholdMember {
    pub user_id: Uuid,
    pub household_id: Uuid,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingSession,
    InvalidHeader,
    InvalidToken,
    NoHousehold,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingSession => (StatusCode::UNAUTHORIZED, "Not logged in"),
            AuthError::InvalidHeader => (StatusCode::UNAUTHORIZED, "Invalid Authorization header"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired session"),
            AuthError::NoHousehold => (StatusCode::FORBIDDEN, "Join a household first"),
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Session token from the cookie, falling back to a bearer header.
fn session_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty());

    if let Some(token) = from_cookie {
        return Ok(token);
    }

    let Some(auth_header) = headers.get(header::AUTHORIZATION) else {
        return Err(AuthError::MissingSession);
    };
    auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidHeader)?
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidHeader)
}

impl<S> FromRequestParts<S> for HouseholdMember
where
    S: Send + Sync,
    Arc<DbPool>: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = Arc::<DbPool>::from_ref(state);
        let token = session_token(&parts.headers)?;

        let user = get_user_from_token(&pool, token)
            .await
            .ok_or(AuthError::InvalidToken)?;

        let household_id = user.household_id.ok_or(AuthError::NoHousehold)?;

        Ok(HouseholdMember {
            user_id: user.user_id,
            household_id,
        })
    }
}
