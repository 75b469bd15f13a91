use crate::model::id::ItemId;

pub mod event;

#[derive(Debug)]
pub struct Item {
    pub item_id: ItemId,
    pub item_name: String,
    pub description: String,
    pub is_active: bool,
}
