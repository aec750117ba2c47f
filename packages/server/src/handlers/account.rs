//! Log-in, sign-up and log-out pages. A successful log-in stores the
//! session token in a cookie.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::instrument;

use crate::entity::user;
use crate::error::{AppError, HtmlError};
use crate::extractors::body::AppForm;
use crate::models::auth::{LoginForm, LoginQuery, RegisterRequest, safe_next};
use crate::state::AppState;
use crate::utils::account;
use crate::views::LIST_PATH;
use crate::views::account::{login_page, signup_page};

pub async fn login_form(Query(query): Query<LoginQuery>) -> Html<String> {
    Html(login_page("", safe_next(query.next.as_deref()), None))
}

#[instrument(skip(state, jar, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppForm(form): AppForm<LoginForm>,
) -> Result<Response, HtmlError> {
    let next = safe_next(form.next.as_deref());

    match account::authenticate(&state.db, &form.credentials()).await {
        Ok(user) => {
            let jar = start_session(&state, jar, &user)?;
            Ok((jar, Redirect::to(next.unwrap_or(LIST_PATH))).into_response())
        }
        Err(e @ (AppError::InvalidCredentials | AppError::Validation(_))) => {
            let (status, body) = e.status_and_body();
            let page = login_page(&form.username, next, Some(&body.message));
            Ok((status, Html(page)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn signup_form() -> Html<String> {
    Html(signup_page("", None))
}

#[instrument(skip(state, jar, form), fields(username = %form.username))]
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    AppForm(form): AppForm<RegisterRequest>,
) -> Result<Response, HtmlError> {
    match account::register_user(&state.db, &form).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "User signed up");
            let jar = start_session(&state, jar, &user)?;
            Ok((jar, Redirect::to(LIST_PATH)).into_response())
        }
        Err(e @ (AppError::UsernameTaken | AppError::Validation(_))) => {
            let (status, body) = e.status_and_body();
            let page = signup_page(&form.username, Some(&body.message));
            Ok((status, Html(page)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (
        jar.remove(account::expired_session_cookie()),
        Redirect::to(LIST_PATH),
    )
}

fn start_session(
    state: &AppState,
    jar: CookieJar,
    user: &user::Model,
) -> Result<CookieJar, AppError> {
    let token = account::issue_token(&state.config.auth, user)?;
    Ok(jar.add(account::session_cookie(&state.config.auth, token)))
}
