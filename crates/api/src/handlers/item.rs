//! Handlers for the `/item` resource.

use axum::extract::{Path, State};
use axum::Json;
use itemstore_core::error::CoreError;
use itemstore_core::types::DbId;
use itemstore_core::validation::validate_input;
use itemstore_db::models::item::{CreateItem, Item, UpdateItem};
use itemstore_db::repositories::ItemRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /item
///
/// A missing owner surfaces as a foreign key violation and maps to 400.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateItem>,
) -> AppResult<Json<Item>> {
    validate_input(&input)?;
    let item = ItemRepo::create(&state.pool, &input).await?;
    tracing::info!(item_id = item.id, user_id = item.user_id, "Item created");
    Ok(Json(item))
}

/// PATCH /item/{id}
///
/// Applies only the supplied fields; unknown fields are ignored.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateItem>,
) -> AppResult<Json<Item>> {
    validate_input(&input)?;
    let item = ItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Item", id }))?;
    tracing::info!(item_id = item.id, "Item updated");
    Ok(Json(item))
}
