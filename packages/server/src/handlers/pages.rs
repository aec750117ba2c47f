//! Server-rendered cheese pages.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::instrument;

use crate::error::HtmlError;
use crate::extractors::auth::PageUser;
use crate::extractors::body::AppForm;
use crate::models::cheese::CheeseForm;
use crate::models::shared::FieldErrors;
use crate::state::AppState;
use crate::store::StoreError;
use crate::views::cheese::{FormMode, detail_page, form_page, list_page};
use crate::views::{LIST_PATH, detail_path};

fn display_name(user: &Option<PageUser>) -> Option<&str> {
    user.as_ref().map(|PageUser(u)| u.username.as_str())
}

pub async fn home() -> Redirect {
    Redirect::to(LIST_PATH)
}

#[instrument(skip_all)]
pub async fn cheese_list(
    State(state): State<AppState>,
    user: Option<PageUser>,
) -> Result<Html<String>, HtmlError> {
    let cheeses = state.cheeses.list().await?;
    Ok(Html(list_page(&cheeses, display_name(&user))))
}

#[instrument(skip(state, user))]
pub async fn cheese_detail(
    State(state): State<AppState>,
    user: Option<PageUser>,
    Path(slug): Path<String>,
) -> Result<Html<String>, HtmlError> {
    let cheese = state.cheeses.get_by_slug(&slug).await?;
    Ok(Html(detail_page(&cheese, display_name(&user))))
}

#[instrument(skip_all, fields(user_id = user.user_id))]
pub async fn cheese_add_form(
    State(state): State<AppState>,
    PageUser(user): PageUser,
) -> Result<Html<String>, HtmlError> {
    let countries = state.cheeses.countries().await?;
    Ok(Html(form_page(
        FormMode::Add,
        &CheeseForm::default(),
        &FieldErrors::default(),
        &countries,
        Some(&user.username),
    )))
}

#[instrument(skip_all, fields(user_id = user.user_id, name = %form.name))]
pub async fn cheese_add(
    State(state): State<AppState>,
    PageUser(user): PageUser,
    AppForm(form): AppForm<CheeseForm>,
) -> Result<Response, HtmlError> {
    let errors = match form.to_new_cheese(user.creator()) {
        Ok(new) => match state.cheeses.create(new).await {
            Ok(cheese) => {
                tracing::info!(slug = %cheese.slug, "Cheese created");
                return Ok(Redirect::to(&detail_path(&cheese.slug)).into_response());
            }
            Err(StoreError::UnknownCountry(code)) => {
                let mut errors = FieldErrors::default();
                errors.add(
                    "country_of_origin",
                    format!("Select a valid choice. {code} is not one of the available choices."),
                );
                errors
            }
            Err(e) => return Err(e.into()),
        },
        Err(errors) => errors,
    };

    tracing::debug!(?errors, "Add form rejected");
    let countries = state.cheeses.countries().await?;
    Ok(invalid_form(form_page(
        FormMode::Add,
        &form,
        &errors,
        &countries,
        Some(&user.username),
    )))
}

#[instrument(skip(state, user))]
pub async fn cheese_update_form(
    State(state): State<AppState>,
    PageUser(user): PageUser,
    Path(slug): Path<String>,
) -> Result<Html<String>, HtmlError> {
    let cheese = state.cheeses.get_by_slug(&slug).await?;
    Ok(Html(form_page(
        FormMode::Update(&cheese),
        &CheeseForm::from_record(&cheese),
        &FieldErrors::default(),
        &[],
        Some(&user.username),
    )))
}

#[instrument(skip(state, user, form), fields(user_id = user.user_id))]
pub async fn cheese_update(
    State(state): State<AppState>,
    PageUser(user): PageUser,
    Path(slug): Path<String>,
    AppForm(form): AppForm<CheeseForm>,
) -> Result<Response, HtmlError> {
    match form.to_changes() {
        Ok(changes) => {
            let cheese = state.cheeses.update(&slug, changes).await?;
            tracing::info!(slug = %cheese.slug, "Cheese updated");
            Ok(Redirect::to(&detail_path(&cheese.slug)).into_response())
        }
        Err(errors) => {
            let cheese = state.cheeses.get_by_slug(&slug).await?;
            Ok(invalid_form(form_page(
                FormMode::Update(&cheese),
                &form,
                &errors,
                &[],
                Some(&user.username),
            )))
        }
    }
}

fn invalid_form(page: String) -> Response {
    (StatusCode::BAD_REQUEST, Html(page)).into_response()
}
