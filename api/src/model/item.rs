use garde::Validate;
use kernel::model::{
    id::ItemId,
    item::{event::CreateItem, Item},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[garde(length(min = 1))]
    pub item_name: String,
    #[garde(skip)]
    pub description: String,
}

impl From<CreateItemRequest> for CreateItem {
    fn from(value: CreateItemRequest) -> Self {
        let CreateItemRequest {
            item_name,
            description,
        } = value;
        CreateItem {
            item_name,
            description,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedItemResponse {
    pub item_id: ItemId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsResponse {
    pub items: Vec<ItemResponse>,
}

impl From<Vec<Item>> for ItemsResponse {
    fn from(value: Vec<Item>) -> Self {
        Self {
            items: value.into_iter().map(ItemResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub item_id: ItemId,
    pub item_name: String,
    pub description: String,
    pub is_active: bool,
}

impl From<Item> for ItemResponse {
    fn from(value: Item) -> Self {
        let Item {
            item_id,
            item_name,
            description,
            is_active,
        } = value;
        Self {
            item_id,
            item_name,
            description,
            is_active,
        }
    }
}
