use axum_extra::extract::cookie::{Cookie, SameSite};
use sea_orm::*;

use crate::config::AuthConfig;
use crate::entity::user;
use crate::error::AppError;
use crate::extractors::auth::SESSION_COOKIE;
use crate::models::auth::{LoginRequest, RegisterRequest, validate_login_request, validate_register_request};
use crate::utils::{hash, jwt};

/// Validate and insert a new user account.
pub async fn register_user<C: ConnectionTrait>(
    db: &C,
    payload: &RegisterRequest,
) -> Result<user::Model, AppError> {
    validate_register_request(payload)?;

    let username = payload.username.trim().to_string();

    let hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let new_user = user::ActiveModel {
        username: Set(username),
        password: Set(hash),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    new_user.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Registration race condition: unique constraint caught on insert");
            AppError::UsernameTaken
        }
        _ => AppError::from(e),
    })
}

/// Look up a user by username and check the password.
pub async fn authenticate<C: ConnectionTrait>(
    db: &C,
    payload: &LoginRequest,
) -> Result<user::Model, AppError> {
    validate_login_request(payload)?;

    let user = user::Entity::find()
        .filter(user::Column::Username.eq(payload.username.trim()))
        .one(db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(&payload.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

/// Sign a session token for `user`.
pub fn issue_token(config: &AuthConfig, user: &user::Model) -> Result<String, AppError> {
    jwt::sign(
        user.id,
        &user.username,
        &config.jwt_secret,
        config.token_ttl_hours,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))
}

/// Cookie carrying the session token for the HTML pages.
pub fn session_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .build()
}

/// Removal cookie matching [`session_cookie`]'s path.
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}
