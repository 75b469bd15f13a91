use kernel::model::{id::ItemId, item::Item};

#[derive(sqlx::FromRow)]
pub struct ItemRow {
    pub item_id: ItemId,
    pub item_name: String,
    pub description: String,
    pub is_active: bool,
}

impl From<ItemRow> for Item {
    fn from(value: ItemRow) -> Self {
        let ItemRow {
            item_id,
            item_name,
            description,
            is_active,
        } = value;
        Item {
            item_id,
            item_name,
            description,
            is_active,
        }
    }
}
