use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::body::AppJson;
use crate::models::cheese::{CheeseResponse, CreateCheeseRequest, UpdateCheeseRequest};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Cheeses",
    operation_id = "listCheeses",
    summary = "List all cheeses",
    description = "Returns every cheese ordered by name.",
    responses(
        (status = 200, description = "All cheeses", body = Vec<CheeseResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_cheeses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CheeseResponse>>, AppError> {
    let cheeses = state.cheeses.list().await?;
    Ok(Json(cheeses.into_iter().map(CheeseResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{slug}",
    tag = "Cheeses",
    operation_id = "getCheese",
    summary = "Get a cheese by slug",
    params(("slug" = String, Path, description = "Cheese slug")),
    responses(
        (status = 200, description = "Cheese", body = CheeseResponse),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_cheese(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CheeseResponse>, AppError> {
    let cheese = state.cheeses.get_by_slug(&slug).await?;
    Ok(Json(cheese.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Cheeses",
    operation_id = "createCheese",
    summary = "Create a cheese",
    description = "Creates a cheese owned by the caller. The slug is derived from the name and made unique.",
    request_body = CreateCheeseRequest,
    responses(
        (status = 201, description = "Cheese created", body = CheeseResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 409, description = "Slug could not be assigned (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(name = %payload.name, user_id = auth_user.user_id))]
pub async fn create_cheese(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCheeseRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new = payload.into_new_cheese(auth_user.creator())?;
    let cheese = state.cheeses.create(new).await?;
    tracing::info!(slug = %cheese.slug, "Cheese created");

    Ok((StatusCode::CREATED, Json(CheeseResponse::from(cheese))))
}

#[utoipa::path(
    patch,
    path = "/{slug}",
    tag = "Cheeses",
    operation_id = "updateCheese",
    summary = "Update a cheese",
    description = "Updates the description and/or firmness. Name, slug, country and creator are fixed.",
    params(("slug" = String, Path, description = "Cheese slug")),
    request_body = UpdateCheeseRequest,
    responses(
        (status = 200, description = "Cheese updated", body = CheeseResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn update_cheese(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    AppJson(payload): AppJson<UpdateCheeseRequest>,
) -> Result<Json<CheeseResponse>, AppError> {
    let changes = payload.into_changes()?;
    let cheese = state.cheeses.update(&slug, changes).await?;

    Ok(Json(cheese.into()))
}
