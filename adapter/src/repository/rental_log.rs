use crate::database::{model::rental_log::RentalLogRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::ReservationId, rental_log::RentalLog};
use kernel::repository::rental_log::RentalLogRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RentalLogRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RentalLogRepository for RentalLogRepositoryImpl {
    async fn find_by_reservation_id(
        &self,
        reservation_id: ReservationId,
    ) -> AppResult<Vec<RentalLog>> {
        let rows: Vec<RentalLogRow> = sqlx::query_as(
            r#"
                SELECT rental_log_id, reservation_id, log_message, action, created_at
                FROM rental_logs
                WHERE reservation_id = $1
                ORDER BY created_at ASC
            "#,
        )
        .bind(reservation_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(RentalLog::from).collect())
    }
}
