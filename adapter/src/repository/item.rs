use crate::database::{model::item::ItemRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::ItemId,
    item::{event::CreateItem, Item},
};
use kernel::repository::item::ItemRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ItemRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ItemRepository for ItemRepositoryImpl {
    async fn create(&self, event: CreateItem) -> AppResult<ItemId> {
        let item_id = ItemId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO items (item_id, item_name, description)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(item_id)
        .bind(&event.item_name)
        .bind(&event.description)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No item record has been created".into(),
            ));
        }

        Ok(item_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Item>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
                SELECT item_id, item_name, description, is_active
                FROM items
                ORDER BY created_at ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn find_by_id(&self, item_id: ItemId) -> AppResult<Option<Item>> {
        let row: Option<ItemRow> = sqlx::query_as(
            r#"
                SELECT item_id, item_name, description, is_active
                FROM items
                WHERE item_id = $1
            "#,
        )
        .bind(item_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Item::from))
    }
}
