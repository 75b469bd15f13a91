use crate::{
    extractor::AuthorizedUser,
    model::item::{CreateItemRequest, CreatedItemResponse, ItemResponse, ItemsResponse},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::id::ItemId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_item(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate(&())?;

    let item_id = registry.item_repository().create(req.into()).await?;

    Ok((StatusCode::CREATED, Json(CreatedItemResponse { item_id })))
}

pub async fn show_item_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ItemsResponse>> {
    registry
        .item_repository()
        .find_all()
        .await
        .map(ItemsResponse::from)
        .map(Json)
}

pub async fn show_item(
    _user: AuthorizedUser,
    Path(item_id): Path<ItemId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ItemResponse>> {
    registry
        .item_repository()
        .find_by_id(item_id)
        .await
        .and_then(|item| match item {
            Some(item) => Ok(Json(item.into())),
            None => Err(AppError::EntityNotFound(format!(
                "物品（{item_id}）が見つかりませんでした。"
            ))),
        })
}
