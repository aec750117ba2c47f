use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::state::AppState;
use crate::store::Creator;
use crate::utils::jwt;
use crate::views::login_redirect_target;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "token";

/// Authenticated user extracted from the `Authorization: Bearer <token>` header
/// or, failing that, the session cookie.
///
/// Add this as a handler parameter to require authentication on API routes.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
}

impl AuthUser {
    /// The user as recorded on cheeses they create.
    pub fn creator(&self) -> Creator {
        Creator {
            id: self.user_id,
            username: self.username.clone(),
        }
    }
}

fn session_token(parts: &Parts) -> Result<String, AppError> {
    if let Some(header) = parts.headers.get("Authorization") {
        let value = header.to_str().map_err(|_| AppError::TokenInvalid)?;
        return value
            .strip_prefix("Bearer ")
            .map(str::to_string)
            .ok_or(AppError::TokenInvalid);
    }

    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(AppError::TokenMissing)
}

fn authenticate(parts: &Parts, state: &AppState) -> Result<AuthUser, AppError> {
    let token = session_token(parts)?;
    let claims =
        jwt::verify(&token, &state.config.auth.jwt_secret).map_err(|_| AppError::TokenInvalid)?;

    Ok(AuthUser {
        user_id: claims.uid,
        username: claims.sub,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state)
    }
}

/// Logged-in user on an HTML page.
///
/// Required: anonymous visitors are redirected to the log-in page with the
/// current path as `next`. As `Option<PageUser>` it never rejects.
#[derive(Debug, Clone)]
pub struct PageUser(pub AuthUser);

impl FromRequestParts<AppState> for PageUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).map(PageUser).map_err(|e| {
            tracing::debug!(path = %parts.uri.path(), error = ?e, "Redirecting anonymous visitor to log in");
            Redirect::to(&login_redirect_target(parts.uri.path()))
        })
    }
}

impl OptionalFromRequestParts<AppState> for PageUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(authenticate(parts, state).ok().map(PageUser))
    }
}
