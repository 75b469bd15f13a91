use crate::model::{
    id::ItemId,
    item::{event::CreateItem, Item},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, event: CreateItem) -> AppResult<ItemId>;
    async fn find_all(&self) -> AppResult<Vec<Item>>;
    async fn find_by_id(&self, item_id: ItemId) -> AppResult<Option<Item>>;
}
