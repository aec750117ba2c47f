use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{account, pages};
use crate::state::AppState;

/// HTML routes. Paths are spelled out in full so the trailing slashes
/// survive; nesting would collapse `/cheeses/` into `/cheeses`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .merge(cheese_routes())
        .merge(account_routes())
}

fn cheese_routes() -> Router<AppState> {
    Router::new()
        .route("/cheeses/", get(pages::cheese_list))
        .route(
            "/cheeses/add/",
            get(pages::cheese_add_form).post(pages::cheese_add),
        )
        .route("/cheeses/{slug}/", get(pages::cheese_detail))
        .route(
            "/cheeses/{slug}/update/",
            get(pages::cheese_update_form).post(pages::cheese_update),
        )
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts/login/",
            get(account::login_form).post(account::login),
        )
        .route(
            "/accounts/signup/",
            get(account::signup_form).post(account::signup),
        )
        .route("/accounts/logout/", post(account::logout))
}
